//! ANSI SGR constants and paint helpers.

pub const RESET: &str = "\x1b[0m";

pub const FG_RED: &str = "\x1b[31m";
pub const FG_YELLOW: &str = "\x1b[33m";
pub const FG_BLUE: &str = "\x1b[34m";
pub const FG_CYAN: &str = "\x1b[36m";
pub const FG_BR_GREEN: &str = "\x1b[92m";
pub const FG_BR_BLUE: &str = "\x1b[94m";
pub const FG_BR_MAGENTA: &str = "\x1b[95m";
pub const FG_BR_CYAN: &str = "\x1b[96m";

/// Prompt palette.
pub const PROMPT_USERNAME: &str = FG_YELLOW;
pub const PROMPT_HOSTNAME: &str = FG_BR_GREEN;
pub const PROMPT_CWD: &str = FG_CYAN;
pub const PROMPT_MARK: &str = FG_BLUE;

/// Output palette.
pub const WELCOME: &str = FG_BR_BLUE;
pub const ERROR: &str = FG_RED;

/// Colorizer palette.
pub const SPAN_COMMAND: &str = FG_BR_BLUE;
pub const SPAN_OPTION: &str = FG_BR_GREEN;
pub const SPAN_ARG: &str = FG_BR_CYAN;
pub const SPAN_VALUE: &str = FG_BR_MAGENTA;

pub fn paint(text: &str, style: &str) -> String {
    format!("{style}{text}{RESET}")
}
