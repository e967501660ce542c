//! Text utilities over a Markdown buffer: plain-text extraction, link and
//! image listings, detailed statistics and backslash escaping.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, parse_document};
use serde::Serialize;

use super::parser::{create_options, extract_text, in_tight_list};

/// Characters that carry Markdown meaning and get a backslash from
/// [`escape_markdown`].
pub const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!',
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRef {
    pub text: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub alt: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
    pub total: usize,
}

impl HeadingCounts {
    fn record(&mut self, level: u8) {
        let slot = match level {
            1 => &mut self.h1,
            2 => &mut self.h2,
            3 => &mut self.h3,
            4 => &mut self.h4,
            5 => &mut self.h5,
            _ => &mut self.h6,
        };
        *slot += 1;
        self.total += 1;
    }
}

/// List items by list kind. Task items count toward their list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ListCounts {
    pub unordered: usize,
    pub ordered: usize,
}

/// Full document statistics, a superset of [`super::Stats`].
///
/// Text counts come from the raw source. Structural counts come from the
/// parsed document, so markers inside code blocks are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentStats {
    pub characters: usize,
    /// Chars other than space, tab and newline.
    pub characters_no_spaces: usize,
    pub words: usize,
    /// Line count as `str::lines` sees it; an empty buffer has none.
    pub lines: usize,
    /// Non-blank chunks between blank-line separators.
    pub paragraphs: usize,
    pub headings: HeadingCounts,
    pub links: usize,
    pub images: usize,
    pub code_blocks: usize,
    pub inline_code: usize,
    pub lists: ListCounts,
    pub tables: usize,
    pub blockquotes: usize,
}

/// Rendered text without markup. Blocks are separated by one blank line,
/// list items and table rows by a newline, table cells by a tab.
pub fn plain_text(source: &str) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    let mut out = String::new();
    collect_plain(root, &mut out);
    collapse_blank_lines(&out)
}

/// Every link in document order, autolinks included.
pub fn extract_links(source: &str) -> Vec<LinkRef> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Link(link) => Some(LinkRef {
                text: extract_text(node),
                url: link.url.clone(),
                title: link.title.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Every image in document order.
pub fn extract_images(source: &str) -> Vec<ImageRef> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Image(image) => Some(ImageRef {
                alt: extract_text(node),
                url: image.url.clone(),
                title: image.title.clone(),
            }),
            _ => None,
        })
        .collect()
}

pub fn detailed_stats(source: &str) -> DocumentStats {
    let _scope = crate::perf::scope("document.detailed_stats");
    let mut stats = DocumentStats {
        characters: source.chars().count(),
        characters_no_spaces: source
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t' | '\n'))
            .count(),
        words: source.split_whitespace().count(),
        lines: source.lines().count(),
        paragraphs: source
            .split("\n\n")
            .filter(|chunk| !chunk.trim().is_empty())
            .count(),
        ..DocumentStats::default()
    };

    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());
    for node in root.descendants() {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => stats.headings.record(heading.level),
            NodeValue::Link(_) => stats.links += 1,
            NodeValue::Image(_) => stats.images += 1,
            NodeValue::CodeBlock(_) => stats.code_blocks += 1,
            NodeValue::Code(_) => stats.inline_code += 1,
            NodeValue::Item(_) | NodeValue::TaskItem(_) => match parent_list_type(node) {
                Some(ListType::Ordered) => stats.lists.ordered += 1,
                Some(ListType::Bullet) => stats.lists.unordered += 1,
                None => {}
            },
            NodeValue::Table(_) => stats.tables += 1,
            NodeValue::BlockQuote => stats.blockquotes += 1,
            _ => {}
        }
    }
    stats
}

/// Backslash-escape every [`ESCAPABLE`] char.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPABLE.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Drop the backslash in front of any [`ESCAPABLE`] char. Other
/// backslashes are kept.
pub fn unescape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && ESCAPABLE.contains(&next)
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

fn parent_list_type<'a>(item: &'a AstNode<'a>) -> Option<ListType> {
    let list = item.parent()?;
    match &list.data.borrow().value {
        NodeValue::List(list) => Some(list.list_type),
        _ => None,
    }
}

fn collect_plain<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        NodeValue::CodeBlock(code_block) => {
            out.push_str(&code_block.literal);
            end_block(out);
        }
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => {}
        NodeValue::ThematicBreak => end_block(out),
        NodeValue::TableCell => {
            collect_children(node, out);
            if node.next_sibling().is_some() {
                out.push('\t');
            }
        }
        NodeValue::Paragraph => {
            collect_children(node, out);
            if in_tight_list(node) {
                end_line(out);
            } else {
                end_block(out);
            }
        }
        NodeValue::Item(_) | NodeValue::TaskItem(_) | NodeValue::TableRow(_) => {
            collect_children(node, out);
            end_line(out);
        }
        NodeValue::Heading(_)
        | NodeValue::BlockQuote
        | NodeValue::List(_)
        | NodeValue::Table(_) => {
            collect_children(node, out);
            end_block(out);
        }
        _ => collect_children(node, out),
    }
}

fn collect_children<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        collect_plain(child, out);
    }
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn end_block(out: &mut String) {
    end_line(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

/// Trim the text and squeeze runs of whitespace-only lines into one blank
/// line.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;
    for line in text.trim().lines() {
        if line.trim().is_empty() {
            pending_blank = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(line.trim_end());
    }
    out
}
