//! Editor state and host interaction.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::dispatch`]: `update` plus host side effects (confirm, download)

mod effects;
mod model;
mod update;

pub use effects::{CLEAR_CONFIRMATION, ConfirmDialog, ConfirmRequest, Confirmation, DownloadSink};
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use chrono::NaiveDate;

/// Drives a [`Model`] against a host that provides confirmation and
/// download primitives.
pub struct App<H> {
    host: H,
    export_date: Option<NaiveDate>,
}

impl<H> App<H> {
    pub const fn new(host: H) -> Self {
        Self {
            host,
            export_date: None,
        }
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
