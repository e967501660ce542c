//! Terminal implementations of the host primitives.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::{ConfirmDialog, ConfirmRequest, Confirmation, DownloadSink};
use crate::export::Blob;

/// Confirms on stdin and writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    assume_yes: bool,
    output_dir: PathBuf,
    last_download: Option<PathBuf>,
}

impl TerminalHost {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assume_yes: false,
            output_dir: output_dir.into(),
            last_download: None,
        }
    }

    /// Accept every confirmation without prompting.
    #[must_use]
    pub const fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Path written by the most recent successful download.
    pub fn last_download(&self) -> Option<&Path> {
        self.last_download.as_deref()
    }

    /// Prompt on `output` and read one answer line from `input`.
    ///
    /// EOF or a read failure counts as a cancel.
    pub fn ask(
        request: &ConfirmRequest,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> Confirmation {
        let prompted = write!(
            output,
            "{}\n{} [{}/{}] ",
            request.title, request.message, request.confirm_label, request.cancel_label
        )
        .and_then(|()| output.flush());
        if let Err(err) = prompted {
            tracing::warn!(%err, "failed to show confirmation prompt");
            return Confirmation::Cancelled;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(0) | Err(_) => Confirmation::Cancelled,
            Ok(_) => parse_answer(&answer, request),
        }
    }
}

fn parse_answer(answer: &str, request: &ConfirmRequest) -> Confirmation {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes")
        || answer == request.confirm_label
    {
        Confirmation::Accepted
    } else {
        Confirmation::Cancelled
    }
}

impl ConfirmDialog for TerminalHost {
    fn confirm(&mut self, request: &ConfirmRequest) -> Confirmation {
        if self.assume_yes {
            return Confirmation::Accepted;
        }
        Self::ask(request, std::io::stdin().lock(), std::io::stderr())
    }
}

impl DownloadSink for TerminalHost {
    fn download(&mut self, blob: &Blob) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;
        let path = self.output_dir.join(&blob.filename);
        std::fs::write(&path, &blob.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), mime = blob.mime, "blob written");
        self.last_download = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CLEAR_CONFIRMATION;
    use crate::export::MARKDOWN_MIME;
    use tempfile::tempdir;

    fn answer(text: &str) -> Confirmation {
        TerminalHost::ask(&CLEAR_CONFIRMATION, text.as_bytes(), Vec::new())
    }

    #[test]
    fn test_accepts_yes_and_confirm_label() {
        assert_eq!(answer("y\n"), Confirmation::Accepted);
        assert_eq!(answer("YES\n"), Confirmation::Accepted);
        assert_eq!(answer("确定\n"), Confirmation::Accepted);
    }

    #[test]
    fn test_anything_else_cancels() {
        assert_eq!(answer("n\n"), Confirmation::Cancelled);
        assert_eq!(answer("\n"), Confirmation::Cancelled);
        assert_eq!(answer(""), Confirmation::Cancelled);
    }

    #[test]
    fn test_prompt_shows_labels() {
        let mut out = Vec::new();
        TerminalHost::ask(&CLEAR_CONFIRMATION, "n\n".as_bytes(), &mut out);
        let prompt = String::from_utf8(out).unwrap();
        assert!(prompt.contains("确认清空"));
        assert!(prompt.contains("[确定/取消]"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let mut host = TerminalHost::new(".").with_assume_yes(true);
        assert_eq!(host.confirm(&CLEAR_CONFIRMATION), Confirmation::Accepted);
    }

    #[test]
    fn test_download_writes_into_directory() {
        let dir = tempdir().unwrap();
        let mut host = TerminalHost::new(dir.path().join("out"));
        let blob = Blob {
            bytes: b"# hi".to_vec(),
            filename: "markdown-document-2024-01-02.md".into(),
            mime: MARKDOWN_MIME,
        };

        host.download(&blob).unwrap();
        let written = host.last_download().unwrap();
        assert_eq!(written, dir.path().join("out").join(&blob.filename));
        assert_eq!(std::fs::read(written).unwrap(), b"# hi");
    }
}
