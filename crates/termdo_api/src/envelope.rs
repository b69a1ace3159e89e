//! Wire shapes for the gateway's response envelope.
//!
//! Every response wraps its payload with routing metadata, an optional status
//! object, an optional server-error object, and a list of client-error
//! messages. Field names are camelCase on the wire.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub hostnames: Hostnames,
    #[serde(default)]
    pub http_status: Option<HttpStatusInfo>,
    #[serde(default)]
    pub server_error: Option<ServerError>,
    #[serde(default)]
    pub client_errors: Vec<ClientError>,
}

impl<T> Envelope<T> {
    pub fn client_error_messages(&self) -> Vec<String> {
        self.client_errors
            .iter()
            .map(|error| error.message.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostnames {
    #[serde(default)]
    pub gateway_api: Option<String>,
    #[serde(default)]
    pub auth_api: Option<String>,
    #[serde(default)]
    pub tasks_api: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpStatusInfo {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub stack_trace: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientError {
    pub message: String,
}
