//! Flag/option parsing over tokenized arguments.

/// One parsed flag. `value` is `None` for bare flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    pub key: String,
    pub value: Option<String>,
}

/// Extract options from an argument list.
///
/// Long form `--key` requires a key of at least two characters; short form
/// `-k` exactly one. `--key=value` carries its value inline; `--key value`
/// consumes the following token as the value unless it starts with `-`, in
/// which case the flag stays bare. Consumed value tokens are removed from
/// `args`; flag tokens themselves remain, and tokens matching neither form
/// are left untouched (unrecognized keys are the caller's concern).
pub fn parse_options(args: &mut Vec<String>) -> Vec<ParsedOption> {
    let mut options = Vec::new();
    let mut index = 0;

    while index < args.len() {
        let arg = args[index].clone();

        let (key, inline_value) = if let Some(body) = arg.strip_prefix("--") {
            match body.split_once('=') {
                Some((key, value)) => {
                    if key.len() < 2 {
                        index += 1;
                        continue;
                    }
                    (key.to_string(), Some(value.to_string()))
                }
                None => {
                    if body.len() < 2 {
                        index += 1;
                        continue;
                    }
                    (body.to_string(), None)
                }
            }
        } else if let Some(body) = arg.strip_prefix('-') {
            match body.split_once('=') {
                Some((key, value)) => {
                    if key.len() != 1 {
                        index += 1;
                        continue;
                    }
                    (key.to_string(), Some(value.to_string()))
                }
                None => {
                    if body.len() != 1 {
                        index += 1;
                        continue;
                    }
                    (body.to_string(), None)
                }
            }
        } else {
            index += 1;
            continue;
        };

        let value = match inline_value {
            Some(value) => Some(value),
            None => {
                let next_is_value = args
                    .get(index + 1)
                    .map(|next| !next.starts_with('-'))
                    .unwrap_or(false);
                if next_is_value {
                    Some(args.remove(index + 1))
                } else {
                    None
                }
            }
        };

        options.push(ParsedOption { key, value });
        index += 1;
    }

    options
}

/// Arguments that are not flags (what remains between consumed options).
pub fn positionals(args: &[String]) -> Vec<&String> {
    args.iter().filter(|arg| !arg.starts_with('-')).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_options, positionals, ParsedOption};

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn option(key: &str, value: Option<&str>) -> ParsedOption {
        ParsedOption {
            key: key.to_string(),
            value: value.map(|value| value.to_string()),
        }
    }

    #[test]
    fn long_flag_consumes_following_value() {
        let mut tokens = args(&["--title", "My Task", "--completed"]);
        let options = parse_options(&mut tokens);
        assert_eq!(
            options,
            vec![
                option("title", Some("My Task")),
                option("completed", None),
            ]
        );
        assert_eq!(tokens, args(&["--title", "--completed"]));
    }

    #[test]
    fn short_flag_with_inline_value() {
        let mut tokens = args(&["-c=true"]);
        let options = parse_options(&mut tokens);
        assert_eq!(options, vec![option("c", Some("true"))]);
    }

    #[test]
    fn long_flag_with_inline_value() {
        let mut tokens = args(&["--sort=created-at"]);
        let options = parse_options(&mut tokens);
        assert_eq!(options, vec![option("sort", Some("created-at"))]);
    }

    #[test]
    fn value_starting_with_dash_is_not_consumed() {
        let mut tokens = args(&["--sort", "-o", "asc"]);
        let options = parse_options(&mut tokens);
        assert_eq!(
            options,
            vec![option("sort", None), option("o", Some("asc"))]
        );
    }

    #[test]
    fn short_key_must_be_one_character() {
        let mut tokens = args(&["-ab", "x"]);
        let options = parse_options(&mut tokens);
        assert!(options.is_empty());
        assert_eq!(tokens, args(&["-ab", "x"]));
    }

    #[test]
    fn long_key_must_be_two_characters() {
        let mut tokens = args(&["--a", "x"]);
        let options = parse_options(&mut tokens);
        assert!(options.is_empty());
    }

    #[test]
    fn consuming_a_value_does_not_skip_the_next_token() {
        let mut tokens = args(&["-t", "title", "-d", "description"]);
        let options = parse_options(&mut tokens);
        assert_eq!(
            options,
            vec![
                option("t", Some("title")),
                option("d", Some("description")),
            ]
        );
        assert_eq!(tokens, args(&["-t", "-d"]));
    }

    #[test]
    fn plain_tokens_are_ignored_and_kept() {
        let mut tokens = args(&["12", "--title", "x"]);
        let options = parse_options(&mut tokens);
        assert_eq!(options, vec![option("title", Some("x"))]);
        assert_eq!(positionals(&tokens), vec!["12"]);
    }
}
