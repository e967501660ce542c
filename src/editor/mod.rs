//! Text buffer, selection and formatting insertion.
//!
//! [`EditorBuffer`] owns the text and the selection. Toolbar actions go
//! through [`format`], a pure mapping from (text, selection, operation) to
//! (new text, caret target).

mod buffer;
pub mod format;

pub use buffer::{Direction, EditorBuffer, PendingCaret, Selection};
pub use format::{Edit, FormatError, FormatOp, HeadingLevel, Insertion};
