use crate::app::Model;
use crate::editor::{Direction, FormatOp};

/// All possible events and actions in the editor.
///
/// These represent typing, toolbar actions and host notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing surface
    /// The input control was mounted (`true`) or torn down (`false`)
    EditorMounted(bool),
    /// Replace the selection with typed text
    InsertText(String),
    /// Delete selection or character before the caret (Backspace)
    DeleteBack,
    /// Delete selection or character at the caret (Delete)
    DeleteForward,
    /// Move the caret
    MoveCursor(Direction),
    /// Set the selection to a char range
    Select(usize, usize),
    /// Select the whole buffer
    SelectAll,
    /// Replace the whole buffer (e.g. after loading a file)
    SetContent(String),

    // Toolbar
    /// Apply a formatting operation around the selection
    Format(FormatOp),
    /// Host finished showing the new buffer; place the pending caret
    CaretReflected,
    /// Ask for confirmation, then clear (side effect)
    RequestClear,
    /// Export the buffer as a Markdown file (side effect)
    Export,
    /// Show or hide the preview pane
    TogglePreview,
    /// Switch the typography theme
    SetPreviewTheme(String),
    /// Switch the code theme
    SetCodeTheme(String),
}

/// Pure function that updates the model based on a message.
///
/// Every text mutation is followed by a preview refresh before returning.
/// Host interaction (confirmation, download) happens in
/// [`crate::app::App::dispatch`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::EditorMounted(mounted) => {
            model.editor_mounted = mounted;
        }
        Message::InsertText(text) => {
            model.buffer_mut().insert_str(&text);
        }
        Message::DeleteBack => {
            model.buffer_mut().delete_back();
        }
        Message::DeleteForward => {
            model.buffer_mut().delete_forward();
        }
        Message::MoveCursor(direction) => {
            model.buffer_mut().move_cursor(direction);
        }
        Message::Select(start, end) => {
            model.buffer_mut().set_selection(start, end);
        }
        Message::SelectAll => {
            model.buffer_mut().select_all();
        }
        Message::SetContent(text) => {
            model.buffer_mut().set_text(&text);
        }

        Message::Format(op) => {
            if model.editor_mounted {
                let pending = model.buffer_mut().apply_format(&op);
                model.set_pending_caret(pending);
            } else {
                tracing::debug!(op = %op, "editor not mounted, ignoring format");
            }
        }
        Message::CaretReflected => {
            if let Some(pending) = model.take_pending_caret() {
                model.buffer_mut().restore_caret(pending);
            }
        }
        Message::TogglePreview => {
            model.show_preview = !model.show_preview;
        }
        Message::SetPreviewTheme(id) => {
            model.preview_theme = id;
        }
        Message::SetCodeTheme(id) => {
            model.code_theme = id;
        }
        // RequestClear/Export: handled in effects (host interaction)
        Message::RequestClear | Message::Export => {}
    }

    model.refresh_preview();
    model
}
