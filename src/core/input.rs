//! Key parsing for the shell's constrained key vocabulary.
//!
//! The shell never negotiates an enhanced keyboard protocol, so only the legacy
//! escape sequences common to xterm-family terminals are recognized here.

/// Keys the line editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    CtrlC,
    CtrlD,
    CtrlL,
}

const LEGACY_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const LEGACY_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];
const LEGACY_RIGHT: [&str; 2] = ["\x1b[C", "\x1bOC"];
const LEGACY_LEFT: [&str; 2] = ["\x1b[D", "\x1bOD"];
const LEGACY_HOME: [&str; 4] = ["\x1b[H", "\x1bOH", "\x1b[1~", "\x1b[7~"];
const LEGACY_END: [&str; 4] = ["\x1b[F", "\x1bOF", "\x1b[4~", "\x1b[8~"];
const LEGACY_DELETE: [&str; 1] = ["\x1b[3~"];

fn matches_legacy_sequence(data: &str, sequences: &[&str]) -> bool {
    sequences.iter().any(|seq| *seq == data)
}

/// Parse a raw byte sequence into a key, if it is one the shell understands.
pub fn parse_key(data: &str) -> Option<Key> {
    match data {
        "\r" | "\n" => return Some(Key::Enter),
        "\x7f" | "\x08" => return Some(Key::Backspace),
        "\x03" => return Some(Key::CtrlC),
        "\x04" => return Some(Key::CtrlD),
        "\x0c" => return Some(Key::CtrlL),
        _ => {}
    }

    if matches_legacy_sequence(data, &LEGACY_UP) {
        return Some(Key::Up);
    }
    if matches_legacy_sequence(data, &LEGACY_DOWN) {
        return Some(Key::Down);
    }
    if matches_legacy_sequence(data, &LEGACY_RIGHT) {
        return Some(Key::Right);
    }
    if matches_legacy_sequence(data, &LEGACY_LEFT) {
        return Some(Key::Left);
    }
    if matches_legacy_sequence(data, &LEGACY_HOME) {
        return Some(Key::Home);
    }
    if matches_legacy_sequence(data, &LEGACY_END) {
        return Some(Key::End);
    }
    if matches_legacy_sequence(data, &LEGACY_DELETE) {
        return Some(Key::Delete);
    }

    None
}

/// Decode printable text from a raw sequence.
///
/// Returns `None` when the sequence contains escape or control bytes; those are
/// either keys or sequences the shell does not handle.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if data.chars().any(|ch| ch.is_control()) {
        return None;
    }
    Some(data.to_string())
}
