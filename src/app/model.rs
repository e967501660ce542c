use std::time::{Duration, Instant};

use crate::document::{self, Element, Preview, Stats};
use crate::editor::{EditorBuffer, PendingCaret};
use crate::theme;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete editor state.
///
/// The buffer is only reachable mutably through [`super::update`], which
/// re-renders the preview after every change, so [`Model::preview`] always
/// reflects the current text.
#[derive(Debug)]
pub struct Model {
    buffer: EditorBuffer,
    preview: Preview,
    /// Buffer revision the preview was rendered from
    preview_revision: u64,
    /// Whether the preview pane is shown
    pub show_preview: bool,
    /// Active typography theme id
    pub preview_theme: String,
    /// Active code theme id
    pub code_theme: String,
    /// Whether the editing surface is mounted and can take format operations
    pub editor_mounted: bool,
    pending_caret: Option<PendingCaret>,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model over `text` with the default themes.
    pub fn new(text: &str) -> Self {
        let buffer = EditorBuffer::from_text(text);
        let preview = document::render(text);
        Self {
            preview_revision: buffer.revision(),
            buffer,
            preview,
            show_preview: true,
            preview_theme: theme::default_typography().id.to_string(),
            code_theme: theme::default_code().id.to_string(),
            editor_mounted: true,
            pending_caret: None,
            toast: None,
        }
    }

    /// Set the initial themes.
    #[must_use]
    pub fn with_themes(mut self, typography: impl Into<String>, code: impl Into<String>) -> Self {
        self.preview_theme = typography.into();
        self.code_theme = code.into();
        self
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub(super) const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub const fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn stats(&self) -> Stats {
        document::stats(&self.buffer.text())
    }

    /// Caret waiting for the host to confirm the buffer is shown.
    pub const fn pending_caret(&self) -> Option<PendingCaret> {
        self.pending_caret
    }

    pub(super) const fn set_pending_caret(&mut self, pending: PendingCaret) {
        self.pending_caret = Some(pending);
    }

    pub(super) fn take_pending_caret(&mut self) -> Option<PendingCaret> {
        self.pending_caret.take()
    }

    /// Re-render when the buffer changed since the last render.
    pub(super) fn refresh_preview(&mut self) {
        if self.preview_revision == self.buffer.revision() {
            return;
        }
        self.preview = document::render(&self.buffer.text());
        self.preview_revision = self.buffer.revision();
        tracing::debug!(revision = self.preview_revision, "preview refreshed");
    }

    /// The preview container painted with the active themes.
    ///
    /// `None` while the preview pane is hidden.
    pub fn themed_preview(&self) -> Option<Element> {
        if !self.show_preview {
            return None;
        }
        let mut container = self.preview.container();
        theme::apply_typography(Some(&mut container), Some(theme::typography(&self.preview_theme)));
        theme::apply_code(Some(&mut container), Some(theme::code(&self.code_theme)));
        Some(container)
    }

    /// Empty the buffer once the user accepted the clear confirmation.
    ///
    /// Only reachable from [`super::App::dispatch`], after
    /// [`super::ConfirmDialog`] returned `Accepted`.
    pub(super) fn clear_confirmed(&mut self) {
        self.buffer.clear();
        self.pending_caret = None;
        self.show_toast(ToastLevel::Success, "内容已清空");
        self.refresh_preview();
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
