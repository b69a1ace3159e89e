//! Line editor state machine: buffer, cursor, and submission history.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::input::Key;
use crate::core::input_event::InputEvent;

/// What the caller must do after the editor consumed an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    /// Nothing changed.
    None,
    /// Buffer content changed; the prompt line needs a full repaint.
    Redraw,
    /// Only the cursor moved; a reposition is enough.
    CursorMoved,
    /// The line was frozen and cleared; dispatch it.
    Submit(String),
}

/// Editable input line with cursor and most-recent-first history.
///
/// Invariant: `cursor` is a byte offset into `buffer`, always on a char
/// boundary and within `0..=buffer.len()`.
#[derive(Debug, Default)]
pub struct InputEditor {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_cursor: Option<usize>,
}

impl InputEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Consume one input event, mutate editor state, and report the required
    /// render action. Events the editor does not own yield `None`.
    pub fn apply(&mut self, event: &InputEvent) -> EditorEffect {
        match event {
            InputEvent::Text { text, .. } => {
                self.insert_text(text);
                EditorEffect::Redraw
            }
            InputEvent::Paste { text, .. } => {
                self.insert_text(&sanitize_paste(text));
                EditorEffect::Redraw
            }
            InputEvent::Key { key, .. } => self.apply_key(*key),
            _ => EditorEffect::None,
        }
    }

    fn apply_key(&mut self, key: Key) -> EditorEffect {
        match key {
            Key::Enter => EditorEffect::Submit(self.submit()),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Home => self.move_home(),
            Key::End => self.move_end(),
            Key::Up => self.history_up(),
            Key::Down => self.history_down(),
            _ => EditorEffect::None,
        }
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut next = String::with_capacity(self.buffer.len() + text.len());
        next.push_str(&self.buffer[..self.cursor]);
        next.push_str(text);
        next.push_str(&self.buffer[self.cursor..]);
        self.buffer = next;
        self.cursor += text.len();
    }

    fn backspace(&mut self) -> EditorEffect {
        if self.cursor == 0 {
            return EditorEffect::None;
        }
        let before_cursor = &self.buffer[..self.cursor];
        let last = before_cursor.graphemes(true).next_back();
        let grapheme_len = last.map(|segment| segment.len()).unwrap_or(1);
        let start = self.cursor.saturating_sub(grapheme_len);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
        EditorEffect::Redraw
    }

    fn delete_forward(&mut self) -> EditorEffect {
        if self.cursor >= self.buffer.len() {
            return EditorEffect::None;
        }
        let after_cursor = &self.buffer[self.cursor..];
        let first = after_cursor.graphemes(true).next();
        let grapheme_len = first.map(|segment| segment.len()).unwrap_or(1);
        let end = (self.cursor + grapheme_len).min(self.buffer.len());
        self.buffer.replace_range(self.cursor..end, "");
        EditorEffect::Redraw
    }

    fn move_left(&mut self) -> EditorEffect {
        if self.cursor == 0 {
            return EditorEffect::None;
        }
        let before_cursor = &self.buffer[..self.cursor];
        let last = before_cursor.graphemes(true).next_back();
        let grapheme_len = last.map(|segment| segment.len()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(grapheme_len);
        EditorEffect::CursorMoved
    }

    fn move_right(&mut self) -> EditorEffect {
        if self.cursor >= self.buffer.len() {
            return EditorEffect::None;
        }
        let after_cursor = &self.buffer[self.cursor..];
        let first = after_cursor.graphemes(true).next();
        let grapheme_len = first.map(|segment| segment.len()).unwrap_or(1);
        self.cursor = (self.cursor + grapheme_len).min(self.buffer.len());
        EditorEffect::CursorMoved
    }

    fn move_home(&mut self) -> EditorEffect {
        if self.cursor == 0 {
            return EditorEffect::None;
        }
        self.cursor = 0;
        EditorEffect::CursorMoved
    }

    fn move_end(&mut self) -> EditorEffect {
        if self.cursor == self.buffer.len() {
            return EditorEffect::None;
        }
        self.cursor = self.buffer.len();
        EditorEffect::CursorMoved
    }

    /// Freeze and clear the current line.
    ///
    /// The trimmed line is recorded in history unless it is empty or equal to
    /// the immediately preceding entry.
    fn submit(&mut self) -> String {
        let line = self.buffer.trim().to_string();
        if !line.is_empty() && self.history.first() != Some(&line) {
            self.history.insert(0, line.clone());
        }
        self.history_cursor = None;
        self.buffer.clear();
        self.cursor = 0;
        line
    }

    fn history_up(&mut self) -> EditorEffect {
        let next = match self.history_cursor {
            None if !self.history.is_empty() => 0,
            Some(index) if index + 1 < self.history.len() => index + 1,
            _ => return EditorEffect::None,
        };
        self.load_history_entry(Some(next));
        EditorEffect::Redraw
    }

    fn history_down(&mut self) -> EditorEffect {
        match self.history_cursor {
            Some(0) => {
                self.load_history_entry(None);
                EditorEffect::Redraw
            }
            Some(index) => {
                self.load_history_entry(Some(index - 1));
                EditorEffect::Redraw
            }
            None => EditorEffect::None,
        }
    }

    fn load_history_entry(&mut self, index: Option<usize>) {
        self.history_cursor = index;
        self.buffer = match index {
            Some(index) => self.history[index].clone(),
            None => String::new(),
        };
        self.cursor = self.buffer.len();
    }

    /// Drop the current line without submitting it (interrupt behavior).
    pub fn abandon_line(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_cursor = None;
    }
}

/// Collapse embedded line breaks to spaces before insertion.
///
/// Bracketed-paste markers are already stripped by the input-event layer.
fn sanitize_paste(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::{EditorEffect, InputEditor};
    use crate::core::input_event::parse_input_events;

    fn send(editor: &mut InputEditor, data: &str) -> Vec<EditorEffect> {
        parse_input_events(data)
            .iter()
            .map(|event| editor.apply(event))
            .collect()
    }

    fn cursor_invariant(editor: &InputEditor) {
        assert!(editor.cursor() <= editor.buffer().len());
        assert!(editor.buffer().is_char_boundary(editor.cursor()));
    }

    #[test]
    fn edits_and_moves_cursor() {
        let mut editor = InputEditor::new();
        send(&mut editor, "hello");
        assert_eq!(editor.buffer(), "hello");
        assert_eq!(editor.cursor(), 5);

        send(&mut editor, "\x1b[D");
        send(&mut editor, "\x1b[D");
        assert_eq!(editor.cursor(), 3);

        send(&mut editor, "p");
        assert_eq!(editor.buffer(), "helplo");
        assert_eq!(editor.cursor(), 4);

        send(&mut editor, "\x7f");
        assert_eq!(editor.buffer(), "hello");
        assert_eq!(editor.cursor(), 3);

        send(&mut editor, "\x1b[C");
        send(&mut editor, "\x1b[C");
        assert_eq!(editor.cursor(), 5);
        cursor_invariant(&editor);
    }

    #[test]
    fn backspace_at_start_is_a_noop() {
        let mut editor = InputEditor::new();
        assert_eq!(send(&mut editor, "\x7f"), vec![EditorEffect::None]);
        send(&mut editor, "ab");
        send(&mut editor, "\x1b[H");
        assert_eq!(send(&mut editor, "\x7f"), vec![EditorEffect::None]);
        assert_eq!(editor.buffer(), "ab");
        cursor_invariant(&editor);
    }

    #[test]
    fn grapheme_aware_backspace() {
        let mut editor = InputEditor::new();
        send(&mut editor, "héllo");
        send(&mut editor, "\x1b[H");
        send(&mut editor, "\x1b[C");
        send(&mut editor, "\x1b[C");
        send(&mut editor, "\x7f");
        assert_eq!(editor.buffer(), "hllo");
        cursor_invariant(&editor);
    }

    #[test]
    fn paste_collapses_newlines_to_spaces() {
        let mut editor = InputEditor::new();
        send(&mut editor, "\x1b[200~hello\r\nworld\nagain\x1b[201~");
        assert_eq!(editor.buffer(), "hello world again");
        cursor_invariant(&editor);
    }

    #[test]
    fn submit_trims_and_clears() {
        let mut editor = InputEditor::new();
        send(&mut editor, "  echo hi  ");
        let effects = send(&mut editor, "\r");
        assert_eq!(effects, vec![EditorEffect::Submit("echo hi".to_string())]);
        assert_eq!(editor.buffer(), "");
        assert_eq!(editor.cursor(), 0);
        assert_eq!(editor.history(), ["echo hi"]);
    }

    #[test]
    fn submit_dedups_against_previous_entry_only() {
        let mut editor = InputEditor::new();
        for line in ["a", "b", "a", "a"] {
            send(&mut editor, line);
            send(&mut editor, "\r");
        }
        // "a" resubmitted after "b" is recorded; the second consecutive "a" is not.
        assert_eq!(editor.history(), ["a", "b", "a"]);
    }

    #[test]
    fn history_up_stops_at_oldest() {
        let mut editor = InputEditor::new();
        for line in ["a", "b", "a"] {
            send(&mut editor, line);
            send(&mut editor, "\r");
        }
        send(&mut editor, "\x1b[A");
        assert_eq!(editor.buffer(), "a");
        send(&mut editor, "\x1b[A");
        assert_eq!(editor.buffer(), "b");
        let effects = send(&mut editor, "\x1b[A");
        assert_eq!(editor.buffer(), "a");
        send(&mut editor, "\x1b[A");
        // Oldest entry reached; further ups are no-ops.
        assert_eq!(editor.buffer(), "a");
        assert_ne!(effects, vec![EditorEffect::None]);
        cursor_invariant(&editor);
    }

    #[test]
    fn history_down_restores_newer_then_clears() {
        let mut editor = InputEditor::new();
        for line in ["first", "second"] {
            send(&mut editor, line);
            send(&mut editor, "\r");
        }
        send(&mut editor, "\x1b[A");
        send(&mut editor, "\x1b[A");
        assert_eq!(editor.buffer(), "first");
        send(&mut editor, "\x1b[B");
        assert_eq!(editor.buffer(), "second");
        send(&mut editor, "\x1b[B");
        assert_eq!(editor.buffer(), "");
        // Already detached from history: another down is a no-op.
        assert_eq!(send(&mut editor, "\x1b[B"), vec![EditorEffect::None]);
    }

    #[test]
    fn empty_submit_is_not_recorded() {
        let mut editor = InputEditor::new();
        let effects = send(&mut editor, "\r");
        assert_eq!(effects, vec![EditorEffect::Submit(String::new())]);
        assert!(editor.history().is_empty());
    }
}
