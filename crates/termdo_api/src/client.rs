use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::envelope::{ClientError, Envelope, HttpStatusInfo, ServerError};
use crate::error::Failure;
use crate::models::{Account, Task, TaskDraft, TaskPayload};

/// Typed success-or-failure outcome of a remote-backed operation.
pub type ApiResult<T> = Result<T, Failure>;

const REFRESH_PATH: &str = "auth/refresh";

/// Client for the termdo gateway.
///
/// Session state lives in an HTTP-only cookie managed by the gateway; the
/// client carries a cookie store so login/refresh/logout behave like the
/// browser session they replace.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(Failure::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // >----- auth -----< //

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Account> {
        let body = json!({ "username": username, "password": password });
        let envelope: Envelope<Account> =
            self.request(Method::POST, "auth/login", Some(body)).await?;
        Ok(envelope.data)
    }

    pub async fn signup(&self, username: &str, password: &str) -> ApiResult<Account> {
        let body = json!({ "username": username, "password": password });
        let envelope: Envelope<Account> =
            self.request(Method::POST, "auth/signup", Some(body)).await?;
        Ok(envelope.data)
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let _: Envelope<Option<Value>> = self.request(Method::PUT, "auth/logout", None).await?;
        Ok(())
    }

    /// Explicit session refresh. Unlike every other operation this does not
    /// refresh before itself.
    pub async fn refresh(&self) -> ApiResult<()> {
        let _: Envelope<Option<Value>> = self.send(Method::GET, REFRESH_PATH, None).await?;
        Ok(())
    }

    // >----- tasks -----< //

    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let envelope: Envelope<Vec<TaskPayload>> =
            self.request(Method::GET, "tasks/", None).await?;
        envelope.data.into_iter().map(Task::from_payload).collect()
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        let body = serde_json::to_value(draft)?;
        let envelope: Envelope<TaskPayload> =
            self.request(Method::POST, "tasks/", Some(body)).await?;
        Task::from_payload(envelope.data)
    }

    pub async fn get_task(&self, id: i64) -> ApiResult<Task> {
        let envelope: Envelope<TaskPayload> = self
            .request(Method::GET, &format!("tasks/{id}"), None)
            .await?;
        Task::from_payload(envelope.data)
    }

    pub async fn update_task(&self, id: i64, draft: &TaskDraft) -> ApiResult<Task> {
        let body = serde_json::to_value(draft)?;
        let envelope: Envelope<TaskPayload> = self
            .request(Method::PUT, &format!("tasks/{id}"), Some(body))
            .await?;
        Task::from_payload(envelope.data)
    }

    pub async fn delete_task(&self, id: i64) -> ApiResult<()> {
        let _: Envelope<Option<Value>> = self
            .request(Method::DELETE, &format!("tasks/{id}"), None)
            .await?;
        Ok(())
    }

    // >----- plumbing -----< //

    /// Issue a request, refreshing credentials opportunistically first.
    /// The refresh outcome is deliberately ignored; an expired session shows
    /// up as a 401 on the call itself.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Envelope<T>> {
        if let Err(failure) = self.send::<Option<Value>>(Method::GET, REFRESH_PATH, None).await {
            debug!(%failure, "session refresh attempt failed");
        }
        self.send(method, path, body).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Envelope<T>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let json_content = is_json_content(response.headers());
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Failure::Auth);
        }
        if !status.is_success() || !json_content {
            warn!(%status, path, "gateway call failed");
            return Err(classify_failure(status, &text));
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        if !envelope.client_errors.is_empty() {
            return Err(Failure::Validation(envelope.client_error_messages()));
        }
        Ok(envelope)
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("json"))
        .unwrap_or(false)
}

/// Error-body shape: the envelope with every field optional, since failed
/// responses may carry any subset of it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ErrorBody {
    http_status: Option<HttpStatusInfo>,
    server_error: Option<ServerError>,
    client_errors: Vec<ClientError>,
}

fn classify_failure(status: StatusCode, body: &str) -> Failure {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if !parsed.client_errors.is_empty() {
            let messages = parsed
                .client_errors
                .into_iter()
                .map(|error| error.message)
                .collect();
            return Failure::Validation(messages);
        }
        if let Some(server_error) = parsed.server_error {
            return Failure::validation(server_error.message);
        }
        if let Some(http_status) = parsed.http_status {
            if !http_status.message.is_empty() {
                return Failure::validation(http_status.message);
            }
        }
    }

    Failure::transport(status.canonical_reason().unwrap_or("request failed"))
}

#[cfg(test)]
mod tests {
    use super::{classify_failure, is_json_content};
    use crate::error::Failure;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::StatusCode;

    #[test]
    fn client_errors_become_validation_messages() {
        let body = r#"{"clientErrors": [{"message": "Title is required."}]}"#;
        let failure = classify_failure(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            failure,
            Failure::Validation(vec!["Title is required.".to_string()])
        );
    }

    #[test]
    fn server_error_message_becomes_single_validation_line() {
        let body = r#"{"serverError": {"name": "DbError", "message": "Task store unavailable."}}"#;
        let failure = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(
            failure,
            Failure::Validation(vec!["Task store unavailable.".to_string()])
        );
    }

    #[test]
    fn http_status_message_is_the_next_fallback() {
        let body = r#"{"httpStatus": {"code": 409, "message": "Conflict on task."}}"#;
        let failure = classify_failure(StatusCode::CONFLICT, body);
        assert_eq!(
            failure,
            Failure::Validation(vec!["Conflict on task.".to_string()])
        );
    }

    #[test]
    fn unparseable_body_collapses_to_transport() {
        let failure = classify_failure(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(failure, Failure::transport("Bad Gateway"));
    }

    #[test]
    fn empty_error_body_uses_status_text() {
        let failure = classify_failure(StatusCode::NOT_FOUND, "");
        assert_eq!(failure, Failure::transport("Not Found"));
    }

    #[test]
    fn json_content_type_detection() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json_content(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        assert!(!is_json_content(&headers));

        assert!(!is_json_content(&HeaderMap::new()));
    }
}
