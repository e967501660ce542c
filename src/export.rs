//! Export of the buffer as a Markdown file, and themed HTML pages.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::document::Element;
use crate::document::markup::escape_html;

pub const MARKDOWN_MIME: &str = "text/markdown";
pub const HTML_MIME: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("没有内容可导出")]
    Empty,
}

/// Bytes handed to a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub filename: String,
    pub mime: &'static str,
}

/// Current date in UTC, used for export filenames.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `markdown-document-YYYY-MM-DD.md`
pub fn export_filename(date: NaiveDate) -> String {
    format!("markdown-document-{}.md", date.format("%Y-%m-%d"))
}

/// Package `text` as a Markdown download.
///
/// # Errors
/// Returns [`ExportError::Empty`] when the text is empty or whitespace-only.
pub fn markdown_blob(text: &str, date: NaiveDate) -> Result<Blob, ExportError> {
    if text.trim().is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(Blob {
        bytes: text.as_bytes().to_vec(),
        filename: export_filename(date),
        mime: MARKDOWN_MIME,
    })
}

/// Base rules that inline theme styles do not cover.
const PAGE_CSS: &str = "\
body { margin: 0; padding: 24px; }
ul, ol { padding-left: 2em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 6px 12px; }
img { max-width: 100%; }
blockquote { margin: 1em 0; padding: 0 1em; border-left: 4px solid #ddd; color: #666; }";

/// Wrap a (usually themed) preview container in a complete HTML page.
pub fn standalone_html(title: &str, container: &Element) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>\n{PAGE_CSS}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        container.to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_filename_uses_iso_date() {
        assert_eq!(export_filename(date()), "markdown-document-2024-03-09.md");
    }

    #[test]
    fn test_blank_text_is_not_exported() {
        assert_eq!(markdown_blob("", date()), Err(ExportError::Empty));
        assert_eq!(markdown_blob("  \n ", date()), Err(ExportError::Empty));
    }

    #[test]
    fn test_blob_keeps_text_verbatim() {
        let blob = markdown_blob("# 标题\n", date()).unwrap();
        assert_eq!(blob.bytes, "# 标题\n".as_bytes());
        assert_eq!(blob.mime, "text/markdown");
        assert_eq!(blob.filename, "markdown-document-2024-03-09.md");
    }

    #[test]
    fn test_standalone_page_embeds_container() {
        let container = document::render("# Hi").container();
        let page = standalone_html("a <b>", &container);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>a &lt;b&gt;</title>"));
        assert!(page.contains("<div class=\"markdown-preview\"><h1>Hi</h1></div>"));
    }

    #[test]
    fn test_standalone_page_has_no_script_links() {
        let container = document::render("[go](javascript:alert(1)) ![i](vbscript:x)").container();
        let page = standalone_html("t", &container);
        assert!(!page.to_ascii_lowercase().contains("javascript:"));
        assert!(!page.to_ascii_lowercase().contains("vbscript:"));
        assert!(page.contains("<a href=\"\">go</a>"));
    }
}
