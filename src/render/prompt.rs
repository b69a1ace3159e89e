//! Prompt repaint and cursor repositioning across wrapped terminal rows.
//!
//! A fixed-width terminal soft-wraps a long prompt line onto multiple rows.
//! Naive re-printing leaves stale rows behind and desynchronizes the cursor,
//! so the renderer tracks how many rows the previous paint produced and which
//! of them currently holds the cursor, then erases exactly that region before
//! painting again.
//!
//! Row bookkeeping lives in an explicit [`RenderState`] owned by the renderer
//! instance. It is reset to a single fresh row whenever plain output is
//! printed, because output invalidates the wrap bookkeeping.
//!
//! Position convention (used by repaint, nudges, and home/end alike): for a
//! logical position `pos` within the rendered text and width `cols`,
//! `end_row = (total - 1) / cols`, `row = min(pos / cols, end_row)`,
//! `col = pos % cols + 1`. The clamp models the terminal's pending-wrap state
//! when the text ends exactly at a row boundary.

use unicode_width::UnicodeWidthStr;

use crate::core::output::{OutputGate, TerminalCmd};
use crate::render::colorize::colorize_command_line;
use crate::render::style;

/// Prompt decoration inputs.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub username: &'a str,
    pub hostname: &'a str,
    pub cwd: &'a str,
    /// Trailing mode mark: `#` for the elevated identity, `$` otherwise.
    pub mark: char,
    /// True while a submitted command is still in flight.
    pub working: bool,
}

impl PromptContext<'_> {
    fn plain_prefix(&self) -> String {
        let working = if self.working { "*" } else { "" };
        format!(
            "{}@{}:{}{}{} ",
            self.username, self.hostname, self.cwd, working, self.mark
        )
    }

    fn colored_prefix(&self) -> String {
        let working = if self.working { "*" } else { "" };
        format!(
            "{}{}{}@{}{}:{}{}{}{} {}",
            style::PROMPT_USERNAME,
            self.username,
            style::PROMPT_HOSTNAME,
            self.hostname,
            style::PROMPT_CWD,
            self.cwd,
            style::PROMPT_MARK,
            working,
            self.mark,
            style::RESET,
        )
    }

    /// Visible cell width of the prompt prefix.
    pub fn prefix_width(&self) -> usize {
        self.plain_prefix().width()
    }
}

/// Wrap bookkeeping for the currently painted prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Rows the last paint produced, `>= 1`.
    pub rows: usize,
    /// Row currently holding the cursor, 0-based, `< rows`.
    pub cursor_row: usize,
}

impl RenderState {
    fn fresh() -> Self {
        Self {
            rows: 1,
            cursor_row: 0,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::fresh()
    }
}

#[derive(Debug, Default)]
pub struct PromptRenderer {
    state: RenderState,
}

impl PromptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Erase the previously painted prompt and paint it afresh, leaving the
    /// cursor at the logical position `cursor` (a byte offset into `buffer`).
    pub fn repaint(
        &mut self,
        gate: &mut OutputGate,
        ctx: &PromptContext<'_>,
        buffer: &str,
        cursor: usize,
        cols: usize,
    ) {
        let cols = cols.max(1);

        // Drop to the bottom row of the previous paint so the erase loop
        // covers every row regardless of where the cursor currently is.
        let down = self.state.rows - 1 - self.state.cursor_row;
        if down > 0 {
            gate.push(TerminalCmd::CursorDown(down as u16));
        }
        gate.push(TerminalCmd::CarriageReturn);
        for _ in 1..self.state.rows {
            gate.push(TerminalCmd::ClearLine);
            gate.push(TerminalCmd::CursorUp(1));
        }
        gate.push(TerminalCmd::ClearLine);

        gate.push(TerminalCmd::Bytes(ctx.colored_prefix()));
        gate.push(TerminalCmd::Bytes(colorize_command_line(buffer)));

        let prefix_width = ctx.prefix_width();
        let total = prefix_width + buffer.width();
        let rows = if total == 0 { 1 } else { total.div_ceil(cols) };
        self.state.rows = rows;
        // A full paint leaves the terminal cursor on the last rendered row.
        self.state.cursor_row = rows - 1;

        let pos = prefix_width + buffer[..cursor].width();
        self.move_to(gate, pos, total, cols);
    }

    /// Reposition the cursor without repainting. Used for plain cursor moves
    /// (left/right/home/end); crossing a wrap boundary becomes a row move plus
    /// an absolute column set, computed with the same convention as `repaint`.
    pub fn reposition(
        &mut self,
        gate: &mut OutputGate,
        ctx: &PromptContext<'_>,
        buffer: &str,
        cursor: usize,
        cols: usize,
    ) {
        let cols = cols.max(1);
        let prefix_width = ctx.prefix_width();
        let total = prefix_width + buffer.width();
        let pos = prefix_width + buffer[..cursor].width();
        self.move_to(gate, pos, total, cols);
    }

    fn move_to(&mut self, gate: &mut OutputGate, pos: usize, total: usize, cols: usize) {
        let end_row = if total == 0 { 0 } else { (total - 1) / cols };
        let target_row = (pos / cols).min(end_row);
        let target_col = (pos % cols) + 1;

        if target_row < self.state.cursor_row {
            gate.push(TerminalCmd::CursorUp((self.state.cursor_row - target_row) as u16));
        } else if target_row > self.state.cursor_row {
            gate.push(TerminalCmd::CursorDown((target_row - self.state.cursor_row) as u16));
        }
        gate.push(TerminalCmd::Column(target_col as u16));
        self.state.cursor_row = target_row;
    }

    /// Commit the prompt line: drop below the painted rows and start a fresh
    /// one. The committed rows are history now and must never be erased.
    pub fn enter(&mut self, gate: &mut OutputGate) {
        let down = self.state.rows - 1 - self.state.cursor_row;
        if down > 0 {
            gate.push(TerminalCmd::CursorDown(down as u16));
        }
        gate.push(TerminalCmd::BytesStatic("\r\n"));
        self.state = RenderState::fresh();
    }

    /// Print a plain output line. Resets the wrap bookkeeping before the line
    /// terminator is written: the next repaint assumes a single fresh row.
    pub fn print_line(&mut self, gate: &mut OutputGate, line: &str) {
        self.state = RenderState::fresh();
        gate.push(TerminalCmd::Bytes(format!("{line}\r\n")));
    }

    pub fn clear_screen(&mut self, gate: &mut OutputGate) {
        self.state = RenderState::fresh();
        gate.push(TerminalCmd::ClearScreenHome);
    }
}
