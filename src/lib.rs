// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportError)
    clippy::module_name_repetitions
)]

//! # Markdraft
//!
//! The core of a Markdown authoring surface.
//!
//! Markdraft provides:
//! - Selection-aware formatting insertions (bold, headings, links, tables...)
//! - A live preview rendered from the buffer, with character and line counts
//! - Typography and code themes painted onto the preview as inline styles
//! - Export of the buffer as a dated Markdown file, and clearing with confirmation
//!
//! ## Architecture
//!
//! Markdraft uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state (buffer, preview, themes, toast)
//! - **Message**: Edits, toolbar actions and host notifications
//! - **Update**: Pure state transitions
//! - **Effects**: Confirmation and download through host traits
//!
//! ## Modules
//!
//! - [`app`]: Model, messages, update and host effects
//! - [`editor`]: Text buffer and the formatting engine
//! - [`document`]: Markdown parsing, preview markup and stats
//! - [`theme`]: Theme catalogs and theme application
//! - [`highlight`]: Code token classification
//! - [`export`]: Markdown and HTML export
//! - [`host`]: Terminal host primitives
//! - [`config`]: Saved default flags
//! - [`watcher`]: File watching
//! - [`perf`]: Timing and render debug log

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod highlight;
pub mod host;
pub mod perf;
pub mod theme;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Preview, Stats};
    pub use crate::editor::{EditorBuffer, FormatOp, Selection};
}
