//! Quote- and escape-aware command-line tokenizer.

/// A submitted line split into a command name and its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Tokenize a raw line.
///
/// Rules:
/// - Backslash outside quotes escapes the next character literally; a trailing
///   unconsumed escape contributes a literal backslash.
/// - Inside quotes every character is literal (including backslash) until the
///   matching quote closes; a closing quote ends the current token, so two
///   adjacent quoted spans yield two tokens.
/// - Unquoted whitespace ends the current token; empty tokens between
///   whitespace runs are not emitted.
pub fn tokenize(line: &str) -> ParsedCommand {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }

        if in_single {
            if ch == '\'' {
                in_single = false;
                tokens.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
            continue;
        }

        if in_double {
            if ch == '"' {
                in_double = false;
                tokens.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '\\' => escape = true,
            '\'' => in_single = true,
            '"' => in_double = true,
            _ if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if escape {
        current.push('\\');
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    let name = if tokens.is_empty() {
        String::new()
    } else {
        tokens.remove(0)
    };
    ParsedCommand { name, args: tokens }
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    fn parts(line: &str) -> (String, Vec<String>) {
        let parsed = tokenize(line);
        (parsed.name, parsed.args)
    }

    #[test]
    fn splits_on_whitespace() {
        let (name, args) = parts("ls --sort title");
        assert_eq!(name, "ls");
        assert_eq!(args, ["--sort", "title"]);
    }

    #[test]
    fn double_quotes_group_words() {
        let (name, args) = parts(r#"a "b c" d"#);
        assert_eq!(name, "a");
        assert_eq!(args, ["b c", "d"]);
    }

    #[test]
    fn backslash_escapes_a_space() {
        let (name, args) = parts(r"a\ b");
        assert_eq!(name, "a b");
        assert!(args.is_empty());
    }

    #[test]
    fn adjacent_quoted_spans_do_not_concatenate() {
        let (name, args) = parts("a 'it''s'");
        assert_eq!(name, "a");
        assert_eq!(args, ["it", "s"]);
    }

    #[test]
    fn backslash_inside_single_quotes_is_literal() {
        let (name, args) = parts(r"echo 'a\b'");
        assert_eq!(name, "echo");
        assert_eq!(args, [r"a\b"]);
    }

    #[test]
    fn trailing_escape_is_a_literal_backslash() {
        let (name, args) = parts("echo a\\");
        assert_eq!(name, "echo");
        assert_eq!(args, ["a\\"]);
    }

    #[test]
    fn empty_line_yields_empty_command() {
        let (name, args) = parts("");
        assert_eq!(name, "");
        assert!(args.is_empty());

        let (name, args) = parts("   ");
        assert_eq!(name, "");
        assert!(args.is_empty());
    }

    #[test]
    fn round_trip_for_plain_tokens() {
        let tokens = ["edit", "12", "--title", "groceries"];
        let line = tokens.join(" ");
        let parsed = tokenize(&line);
        let mut recovered = vec![parsed.name];
        recovered.extend(parsed.args);
        assert_eq!(recovered, tokens);
    }
}
