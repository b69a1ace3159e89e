//! Typed terminal output commands and a single output gate.
//!
//! The command set is the constrained escape vocabulary the renderer is allowed
//! to emit: relative cursor motion, absolute column set, line/screen clears,
//! and raw text. Nothing here parses ANSI; this layer only produces it.
//!
//! Invariant: all terminal writes must flow through `OutputGate::flush(..)`.

use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Literal characters (UTF-8 string) to be written to the terminal.
    Bytes(String),
    /// Static literal characters to be written to the terminal.
    BytesStatic(&'static str),

    /// Cursor motion.
    CursorUp(u16),
    CursorDown(u16),
    /// Absolute column set (1-based).
    Column(u16),
    CarriageReturn,

    /// Clears.
    ClearLine,
    ClearScreenHome,

    /// Cursor visibility.
    HideCursor,
    ShowCursor,

    /// Protocol toggles.
    BracketedPasteEnable,
    BracketedPasteDisable,
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Render buffered commands into their escape-coded form without writing.
    pub fn encode(&mut self) -> String {
        let mut out = String::new();
        for cmd in self.cmds.drain(..) {
            encode_cmd(&cmd, &mut out);
        }
        out
    }

    /// Flush buffered commands to the terminal.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else.
    pub fn flush<T: Terminal>(&mut self, term: &mut T) {
        let encoded = self.encode();
        if !encoded.is_empty() {
            term.write(&encoded);
        }
    }
}

fn encode_cmd(cmd: &TerminalCmd, out: &mut String) {
    match cmd {
        TerminalCmd::Bytes(data) => out.push_str(data),
        TerminalCmd::BytesStatic(data) => out.push_str(data),
        TerminalCmd::CursorUp(count) => {
            if *count > 0 {
                out.push_str(&format!("\x1b[{count}A"));
            }
        }
        TerminalCmd::CursorDown(count) => {
            if *count > 0 {
                out.push_str(&format!("\x1b[{count}B"));
            }
        }
        TerminalCmd::Column(col) => out.push_str(&format!("\x1b[{col}G")),
        TerminalCmd::CarriageReturn => out.push('\r'),
        TerminalCmd::ClearLine => out.push_str("\x1b[2K"),
        TerminalCmd::ClearScreenHome => out.push_str("\x1b[2J\x1b[H"),
        TerminalCmd::HideCursor => out.push_str("\x1b[?25l"),
        TerminalCmd::ShowCursor => out.push_str("\x1b[?25h"),
        TerminalCmd::BracketedPasteEnable => out.push_str("\x1b[?2004h"),
        TerminalCmd::BracketedPasteDisable => out.push_str("\x1b[?2004l"),
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputGate, TerminalCmd};

    #[test]
    fn encodes_cursor_motion_and_clears() {
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::CursorUp(2));
        gate.push(TerminalCmd::Column(5));
        gate.push(TerminalCmd::ClearLine);
        gate.push(TerminalCmd::bytes("hi"));
        assert_eq!(gate.encode(), "\x1b[2A\x1b[5G\x1b[2Khi");
        assert!(gate.is_empty());
    }

    #[test]
    fn zero_row_motion_emits_nothing() {
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::CursorUp(0));
        gate.push(TerminalCmd::CursorDown(0));
        assert_eq!(gate.encode(), "");
    }
}
