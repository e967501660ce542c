//! Live preview rendering and buffer statistics.
//!
//! This module handles:
//! - Parsing markdown with comrak into a styleable markup tree
//! - The placeholder shown for blank buffers
//! - Character and line counts
//! - Text tools: plain text, link and image listings, detailed stats,
//!   backslash escaping
//!
//! Both [`render`] and [`stats`] are pure. Callers re-run them after every
//! buffer mutation; nothing here caches across buffer versions.

pub mod markup;
mod parser;
mod tools;

pub use markup::{Element, Node, StyleDecls};
pub use parser::parse_markup;
pub use tools::{
    DocumentStats, ESCAPABLE, HeadingCounts, ImageRef, LinkRef, ListCounts, detailed_stats,
    escape_markdown, extract_images, extract_links, plain_text, unescape_markdown,
};

/// Shown instead of parsing when the buffer is empty or whitespace-only.
pub const EMPTY_PREVIEW_HTML: &str =
    "<p class=\"empty-preview\">暂无内容，请在左侧编辑器中输入 Markdown 内容</p>";

const EMPTY_PREVIEW_TEXT: &str = "暂无内容，请在左侧编辑器中输入 Markdown 内容";

/// Class of the container element produced by [`Preview::container`].
pub const PREVIEW_CONTAINER_CLASS: &str = "markdown-preview";

/// Rendered markup for one buffer version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    nodes: Vec<Node>,
    empty: bool,
}

impl Preview {
    /// Whether this is the blank-buffer placeholder.
    pub const fn is_placeholder(&self) -> bool {
        self.empty
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Serialized markup fragment.
    pub fn html(&self) -> String {
        markup::nodes_to_html(&self.nodes)
    }

    /// A fresh container element holding a copy of the rendered nodes.
    ///
    /// Themes are applied to containers, never to the preview itself, so the
    /// preview stays a pure function of the buffer.
    pub fn container(&self) -> Element {
        Element::new("div")
            .with_attr("class", PREVIEW_CONTAINER_CLASS)
            .with_children(self.nodes.clone())
    }
}

/// Character and line counts of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Length in chars.
    pub characters: usize,
    /// Number of `\n`-separated segments; an empty buffer has one line.
    pub lines: usize,
}

/// Render markdown source to preview markup.
pub fn render(source: &str) -> Preview {
    if source.trim().is_empty() {
        return placeholder();
    }
    let _scope = crate::perf::scope("preview.render");
    let nodes = parse_markup(source);
    crate::perf::log_event(
        "preview.render",
        format!("chars={} nodes={}", source.chars().count(), nodes.len()),
    );
    Preview {
        nodes,
        empty: false,
    }
}

/// Convenience for `render(source).html()`.
pub fn render_html(source: &str) -> String {
    render(source).html()
}

pub fn stats(source: &str) -> Stats {
    Stats {
        characters: source.chars().count(),
        lines: source.split('\n').count(),
    }
}

fn placeholder() -> Preview {
    let p = Element::new("p")
        .with_attr("class", "empty-preview")
        .with_children(vec![Node::Text(EMPTY_PREVIEW_TEXT.to_string())]);
    Preview {
        nodes: vec![Node::Element(p)],
        empty: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_renders_placeholder() {
        let preview = render("");
        assert!(preview.is_placeholder());
        assert_eq!(preview.html(), EMPTY_PREVIEW_HTML);
    }

    #[test]
    fn test_whitespace_source_renders_placeholder() {
        assert_eq!(render_html("  \n\t \n"), EMPTY_PREVIEW_HTML);
    }

    #[test]
    fn test_content_is_not_placeholder() {
        let preview = render("# Hi");
        assert!(!preview.is_placeholder());
        assert_eq!(preview.html(), "<h1>Hi</h1>");
    }

    #[test]
    fn test_container_wraps_nodes() {
        let container = render("text").container();
        assert_eq!(
            container.to_html(),
            "<div class=\"markdown-preview\"><p>text</p></div>"
        );
    }

    #[test]
    fn test_stats_of_empty_buffer_counts_one_line() {
        assert_eq!(
            stats(""),
            Stats {
                characters: 0,
                lines: 1
            }
        );
    }

    #[test]
    fn test_stats_counts_segments() {
        assert_eq!(
            stats("a\nb"),
            Stats {
                characters: 3,
                lines: 2
            }
        );
        assert_eq!(stats("a\n").lines, 2);
    }

    #[test]
    fn test_stats_counts_chars_not_bytes() {
        assert_eq!(stats("中文😀").characters, 3);
    }
}
