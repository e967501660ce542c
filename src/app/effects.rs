use chrono::NaiveDate;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::export::{self, Blob};

/// Text of the confirmation shown before a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

/// Asked before the buffer is cleared.
pub const CLEAR_CONFIRMATION: ConfirmRequest = ConfirmRequest {
    title: "确认清空",
    message: "确定要清空所有内容吗？此操作不可撤销。",
    confirm_label: "确定",
    cancel_label: "取消",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Cancelled,
}

/// Host primitive that asks the user to accept or cancel.
pub trait ConfirmDialog {
    fn confirm(&mut self, request: &ConfirmRequest) -> Confirmation;
}

/// Host primitive that delivers a file to the user.
pub trait DownloadSink {
    /// # Errors
    /// Returns an error if the blob could not be delivered.
    fn download(&mut self, blob: &Blob) -> anyhow::Result<()>;
}

impl<H: ConfirmDialog + DownloadSink> App<H> {
    /// Run `update`, then any host interaction the message asks for.
    pub fn dispatch(&mut self, model: Model, msg: Message) -> Model {
        let model = update(model, msg.clone());
        self.handle_message_side_effects(model, &msg)
    }

    fn handle_message_side_effects(&mut self, mut model: Model, msg: &Message) -> Model {
        match msg {
            Message::RequestClear => {
                match self.host.confirm(&CLEAR_CONFIRMATION) {
                    Confirmation::Accepted => {
                        tracing::info!("clearing buffer");
                        model.clear_confirmed();
                    }
                    Confirmation::Cancelled => {
                        tracing::debug!("clear cancelled");
                    }
                }
            }
            Message::Export => {
                self.export(&mut model);
            }
            _ => {}
        }
        model
    }

    fn export(&mut self, model: &mut Model) {
        let date = self.export_date.unwrap_or_else(export::today);
        let blob = match export::markdown_blob(&model.text(), date) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!(%err, "export skipped");
                model.show_toast(ToastLevel::Warning, err.to_string());
                return;
            }
        };

        match self.host.download(&blob) {
            Ok(()) => {
                tracing::info!(filename = %blob.filename, bytes = blob.bytes.len(), "exported");
                model.show_toast(ToastLevel::Success, "文件导出成功");
            }
            Err(err) => {
                tracing::warn!(%err, filename = %blob.filename, "download failed");
                model.show_toast(ToastLevel::Error, format!("导出失败: {err}"));
            }
        }
    }
}

impl<H> App<H> {
    /// Pin the date used for export filenames.
    #[must_use]
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }
}
