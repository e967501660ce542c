use ropey::Rope;

use super::format::{self, FormatOp};

/// A selection range in char offsets, always ordered (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection from two endpoints in any order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed selection (caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Clamp both endpoints to `len`.
    #[must_use]
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Caret target produced by a format operation, waiting for the host to
/// reflect the new buffer before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCaret {
    offset: usize,
    revision: u64,
}

impl PendingCaret {
    /// Target caret offset (chars) in the buffer the operation produced.
    pub const fn offset(self) -> usize {
        self.offset
    }
}

/// The editing surface's text and selection, backed by a rope.
///
/// Offsets are char indices. The selection always satisfies
/// `start <= end <= len_chars()`.
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    revision: u64,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string with the caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::default(),
            revision: 0,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// True when the buffer holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.rope.chars().all(char::is_whitespace)
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// The currently selected text (empty for a caret).
    pub fn selected_text(&self) -> String {
        self.rope
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    /// Bumped on every text mutation. Selection changes do not count.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Set the selection, clamping and ordering the endpoints.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamped(self.len_chars());
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len_chars());
    }

    /// Replace the selection with `s` and leave the caret after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() && self.selection.is_empty() {
            return;
        }
        let start = self.remove_selection();
        self.rope.insert(start, s);
        self.selection = Selection::caret(start + s.chars().count());
        self.touch();
    }

    /// Replace the selection with a character.
    pub fn insert_char(&mut self, ch: char) {
        let start = self.remove_selection();
        self.rope.insert_char(start, ch);
        self.selection = Selection::caret(start + 1);
        self.touch();
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if !self.selection.is_empty() {
            let start = self.remove_selection();
            self.selection = Selection::caret(start);
            self.touch();
            return true;
        }
        let caret = self.selection.start;
        if caret == 0 {
            return false;
        }
        self.rope.remove(caret - 1..caret);
        self.selection = Selection::caret(caret - 1);
        self.touch();
        true
    }

    /// Delete the selection, or the character at the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_back();
        }
        let caret = self.selection.start;
        if caret >= self.len_chars() {
            return false;
        }
        self.rope.remove(caret..=caret);
        self.touch();
        true
    }

    /// Move the caret one char, collapsing any selection toward `direction`.
    pub fn move_cursor(&mut self, direction: Direction) {
        let sel = self.selection;
        let target = match direction {
            Direction::Left if !sel.is_empty() => sel.start,
            Direction::Right if !sel.is_empty() => sel.end,
            Direction::Left => sel.start.saturating_sub(1),
            Direction::Right => (sel.end + 1).min(self.len_chars()),
        };
        self.selection = Selection::caret(target);
    }

    /// Move the caret to the start of its line (Home).
    pub fn move_home(&mut self) {
        let line = self.rope.char_to_line(self.selection.start);
        self.selection = Selection::caret(self.rope.line_to_char(line));
    }

    /// Move the caret to the end of its line (End).
    pub fn move_end(&mut self) {
        let line = self.rope.char_to_line(self.selection.end);
        let len = self.line_at(line).map_or(0, |l| l.chars().count());
        self.selection = Selection::caret(self.rope.line_to_char(line) + len);
    }

    /// Replace the whole text. The caret returns to the start.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.selection = Selection::default();
        self.touch();
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// Phase one of a format operation: rewrite the buffer around the
    /// selection and return where the caret belongs.
    ///
    /// The selection is only clamped here. Call [`EditorBuffer::restore_caret`]
    /// once the host shows the new text.
    pub fn apply_format(&mut self, op: &FormatOp) -> PendingCaret {
        let Selection { start, end } = self.selection;
        let selected = self.rope.slice(start..end).to_string();
        let insertion = format::plan(op, &selected, start);

        self.rope.remove(start..end);
        self.rope.insert(start, &insertion.replacement);
        self.touch();
        self.selection = self.selection.clamped(self.len_chars());

        tracing::debug!(
            op = %op,
            start,
            end,
            cursor = insertion.cursor,
            revision = self.revision,
            "applied format operation"
        );

        PendingCaret {
            offset: insertion.cursor,
            revision: self.revision,
        }
    }

    /// Phase two: collapse the selection at the pending caret.
    ///
    /// Returns `false` (and leaves the selection alone) when the buffer was
    /// edited again after the caret was produced.
    pub fn restore_caret(&mut self, pending: PendingCaret) -> bool {
        if pending.revision != self.revision {
            tracing::debug!(
                pending = pending.revision,
                current = self.revision,
                "dropping stale caret"
            );
            return false;
        }
        self.selection = Selection::caret(pending.offset.min(self.len_chars()));
        true
    }

    // --- Private helpers ---

    /// Remove the selected text and return the collapsed insertion point.
    fn remove_selection(&mut self) -> usize {
        let Selection { start, end } = self.selection;
        if end > start {
            self.rope.remove(start..end);
        }
        start
    }

    const fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("selection", &self.selection)
            .field("revision", &self.revision)
            .field("dirty", &self.dirty)
            .finish()
    }
}
