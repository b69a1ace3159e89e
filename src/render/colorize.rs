//! Cosmetic colorizer for the input line.
//!
//! A finite-state machine walks the buffer and assigns each character to a
//! span (command, option, argument, or value). Quote state suspends span
//! detection until the matching quote closes. The output differs from the
//! input only by interleaved SGR codes; stripping them recovers the buffer
//! byte for byte, so cursor math can never be perturbed by coloring.

use crate::render::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Command,
    Option,
    Arg,
    Value,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Quote,
    Equals,
    Dash,
    Other,
}

fn classify(ch: char) -> CharClass {
    match ch {
        ' ' => CharClass::Space,
        '\'' | '"' => CharClass::Quote,
        '=' => CharClass::Equals,
        '-' => CharClass::Dash,
        _ => CharClass::Other,
    }
}

/// Transition table keyed on (current mode, character class).
///
/// `at_token_start` is true for the first character after unquoted whitespace.
/// The command span is sticky: the first token never transitions away except
/// through quotes or `=`.
fn transition(mode: Mode, class: CharClass, at_token_start: bool) -> Mode {
    match (mode, class) {
        (_, CharClass::Quote) => Mode::Value,
        (_, CharClass::Space) => Mode::Idle,
        (_, CharClass::Equals) => Mode::Value,
        (Mode::Command, CharClass::Dash) => Mode::Command,
        (Mode::Command, CharClass::Other) => Mode::Command,
        (current, CharClass::Dash) => {
            if at_token_start {
                Mode::Option
            } else {
                current
            }
        }
        (current, CharClass::Other) => {
            if at_token_start {
                Mode::Arg
            } else {
                current
            }
        }
    }
}

fn span_color(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::Command => Some(style::SPAN_COMMAND),
        Mode::Option => Some(style::SPAN_OPTION),
        Mode::Arg => Some(style::SPAN_ARG),
        Mode::Value => Some(style::SPAN_VALUE),
        Mode::Idle => None,
    }
}

fn set_mode(next: Mode, out: &mut String, mode: &mut Mode) {
    if *mode == next {
        return;
    }
    *mode = next;
    if let Some(color) = span_color(next) {
        out.push_str(color);
    }
}

/// Colorize a raw input line for display.
pub fn colorize_command_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(style::SPAN_COMMAND);

    let mut mode = Mode::Command;
    let mut at_token_start = true;
    let mut in_single = false;
    let mut in_double = false;

    for ch in input.chars() {
        if in_single {
            out.push(ch);
            if ch == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            out.push(ch);
            if ch == '"' {
                in_double = false;
            }
            continue;
        }

        let class = classify(ch);

        if class == CharClass::Quote {
            set_mode(Mode::Value, &mut out, &mut mode);
            if ch == '\'' {
                in_single = true;
            } else {
                in_double = true;
            }
            out.push(ch);
            at_token_start = false;
            continue;
        }

        if class == CharClass::Space {
            out.push(ch);
            at_token_start = true;
            set_mode(Mode::Idle, &mut out, &mut mode);
            continue;
        }

        let next = transition(mode, class, at_token_start);
        at_token_start = false;

        if class == CharClass::Equals {
            out.push(ch);
            set_mode(Mode::Value, &mut out, &mut mode);
            continue;
        }

        set_mode(next, &mut out, &mut mode);
        out.push(ch);
    }

    out.push_str(style::RESET);
    out
}
