//! Selection-aware formatting insertion.
//!
//! Every toolbar action maps to a [`FormatOp`]. Applying one replaces the
//! selected span with a template built around the selection (or around a
//! placeholder when nothing is selected) and reports where the caret should
//! land afterwards. Offsets are counted in `char`s.
//!
//! Prefix-style operations (headings, list items, blockquotes) insert their
//! prefix once at the selection start. A selection spanning several lines is
//! one opaque span; the prefix is not repeated per line.

use std::fmt;

use thiserror::Error;

use super::Selection;

/// Fence opening used for code blocks, including its trailing newline.
const CODE_FENCE_OPEN: &str = "```javascript\n";
const CODE_FENCE_CLOSE: &str = "\n```";
const CODE_PLACEHOLDER: &str = "console.log('Hello, World!');";

const LINK_URL: &str = "https://example.com";
const IMAGE_URL: &str = "https://example.com/image.jpg";

const TABLE_TEMPLATE: &str = "| 列1 | 列2 | 列3 |\n|-----|-----|-----|\n| 数据1 | 数据2 | 数据3 |\n| 数据4 | 数据5 | 数据6 |";
const HORIZONTAL_RULE: &str = "\n---\n";
const DEFAULT_EMOJI: &str = "😀";

/// Errors raised while building a [`FormatOp`] from loose input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown format operation `{0}`")]
    UnknownOperation(String),
    #[error("heading level must be 1, 2 or 3 (got {0})")]
    InvalidHeadingLevel(u8),
}

/// Heading depth supported by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Number of `#` markers.
    pub const fn depth(self) -> usize {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }

    const fn placeholder(self) -> &'static str {
        match self {
            Self::H1 => "一级标题",
            Self::H2 => "二级标题",
            Self::H3 => "三级标题",
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = FormatError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            other => Err(FormatError::InvalidHeadingLevel(other)),
        }
    }
}

/// A formatting action applied around the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatOp {
    Bold,
    Italic,
    Strikethrough,
    Heading(HeadingLevel),
    Link,
    Image,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    Table,
    HorizontalRule,
    /// Inserts the payload verbatim, or a default emoji when `None`.
    Emoji(Option<String>),
}

impl FormatOp {
    /// Build an operation from its toolbar tag (`bold`, `h2`, `emoji`, ...).
    ///
    /// The payload is only meaningful for `emoji` and is ignored otherwise.
    ///
    /// # Errors
    /// Returns [`FormatError::UnknownOperation`] for unrecognized tags.
    pub fn from_tag(tag: &str, payload: Option<&str>) -> Result<Self, FormatError> {
        let op = match tag.trim().to_ascii_lowercase().as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "strikethrough" => Self::Strikethrough,
            "h1" => Self::Heading(HeadingLevel::H1),
            "h2" => Self::Heading(HeadingLevel::H2),
            "h3" => Self::Heading(HeadingLevel::H3),
            "link" => Self::Link,
            "image" => Self::Image,
            "codeblock" => Self::CodeBlock,
            "unorderedlist" => Self::UnorderedListItem,
            "orderedlist" => Self::OrderedListItem,
            "blockquote" => Self::Blockquote,
            "table" => Self::Table,
            "hr" => Self::HorizontalRule,
            "emoji" => Self::Emoji(payload.map(ToOwned::to_owned)),
            _ => return Err(FormatError::UnknownOperation(tag.to_string())),
        };
        Ok(op)
    }

    /// The toolbar tag accepted by [`FormatOp::from_tag`].
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Heading(HeadingLevel::H1) => "h1",
            Self::Heading(HeadingLevel::H2) => "h2",
            Self::Heading(HeadingLevel::H3) => "h3",
            Self::Link => "link",
            Self::Image => "image",
            Self::CodeBlock => "codeblock",
            Self::UnorderedListItem => "unorderedlist",
            Self::OrderedListItem => "orderedlist",
            Self::Blockquote => "blockquote",
            Self::Table => "table",
            Self::HorizontalRule => "hr",
            Self::Emoji(_) => "emoji",
        }
    }

    /// Placeholder shown when the operation runs without a selection.
    ///
    /// `None` for operations that never look at the selection.
    pub const fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("粗体文本"),
            Self::Italic => Some("斜体文本"),
            Self::Strikethrough => Some("删除线文本"),
            Self::Heading(level) => Some(level.placeholder()),
            Self::Link => Some("链接文本"),
            Self::Image => Some("图片描述"),
            Self::CodeBlock => Some(CODE_PLACEHOLDER),
            Self::UnorderedListItem | Self::OrderedListItem => Some("列表项"),
            Self::Blockquote => Some("引用内容"),
            Self::Table | Self::HorizontalRule | Self::Emoji(_) => None,
        }
    }

    /// Every tag accepted by [`FormatOp::from_tag`].
    pub const TAGS: [&'static str; 15] = [
        "bold",
        "italic",
        "strikethrough",
        "h1",
        "h2",
        "h3",
        "link",
        "image",
        "codeblock",
        "unorderedlist",
        "orderedlist",
        "blockquote",
        "table",
        "hr",
        "emoji",
    ];
}

impl fmt::Display for FormatOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Text that replaces the selection, plus the caret target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub replacement: String,
    /// Absolute char offset into the new buffer.
    pub cursor: usize,
}

/// A fully applied edit: the new buffer and the caret target within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub cursor: usize,
}

/// Compute the replacement for `op` given the selected text and the
/// selection start (in chars).
pub fn plan(op: &FormatOp, selected: &str, start: usize) -> Insertion {
    let selected_len = selected.chars().count();
    let end = start + selected_len;
    let has_selection = selected_len > 0;
    let body = |op: &FormatOp| -> String {
        if has_selection {
            selected.to_string()
        } else {
            op.placeholder().unwrap_or_default().to_string()
        }
    };

    match op {
        FormatOp::Bold => wrap("**", body(op), has_selection, start),
        FormatOp::Italic => wrap("*", body(op), has_selection, start),
        FormatOp::Strikethrough => wrap("~~", body(op), has_selection, start),
        FormatOp::Heading(level) => {
            let prefix = format!("{} ", "#".repeat(level.depth()));
            prefixed(&prefix, body(op), has_selection, start)
        }
        FormatOp::UnorderedListItem => prefixed("- ", body(op), has_selection, start),
        FormatOp::OrderedListItem => prefixed("1. ", body(op), has_selection, start),
        FormatOp::Blockquote => prefixed("> ", body(op), has_selection, start),
        FormatOp::Link => Insertion {
            replacement: format!("[{}]({LINK_URL})", body(op)),
            cursor: if has_selection { end + 3 } else { start + 1 },
        },
        FormatOp::Image => Insertion {
            replacement: format!("![{}]({IMAGE_URL})", body(op)),
            cursor: if has_selection { end + 3 } else { start + 2 },
        },
        FormatOp::CodeBlock => {
            let fence_len = CODE_FENCE_OPEN.chars().count();
            Insertion {
                replacement: format!("{CODE_FENCE_OPEN}{}{CODE_FENCE_CLOSE}", body(op)),
                cursor: if has_selection {
                    end + fence_len
                } else {
                    start + fence_len
                },
            }
        }
        FormatOp::Table => fixed(TABLE_TEMPLATE.to_string(), start),
        FormatOp::HorizontalRule => Insertion {
            replacement: HORIZONTAL_RULE.to_string(),
            cursor: start + HORIZONTAL_RULE.chars().count(),
        },
        FormatOp::Emoji(payload) => {
            let emoji = payload
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_EMOJI);
            fixed(emoji.to_string(), start)
        }
    }
}

/// Apply `op` to `text` around `selection`, producing the new buffer.
///
/// The selection is clamped to the text before use.
pub fn apply(text: &str, selection: Selection, op: &FormatOp) -> Edit {
    let selection = selection.clamped(text.chars().count());
    let start_byte = byte_offset(text, selection.start);
    let end_byte = byte_offset(text, selection.end);
    let insertion = plan(op, &text[start_byte..end_byte], selection.start);

    let mut out =
        String::with_capacity(text.len() - (end_byte - start_byte) + insertion.replacement.len());
    out.push_str(&text[..start_byte]);
    out.push_str(&insertion.replacement);
    out.push_str(&text[end_byte..]);
    Edit {
        text: out,
        cursor: insertion.cursor,
    }
}

fn wrap(marker: &str, body: String, has_selection: bool, start: usize) -> Insertion {
    let replacement = format!("{marker}{body}{marker}");
    let cursor = if has_selection {
        start + replacement.chars().count()
    } else {
        start + marker.chars().count()
    };
    Insertion {
        replacement,
        cursor,
    }
}

fn prefixed(prefix: &str, body: String, has_selection: bool, start: usize) -> Insertion {
    let replacement = format!("{prefix}{body}");
    let cursor = if has_selection {
        start + replacement.chars().count()
    } else {
        start + prefix.chars().count()
    };
    Insertion {
        replacement,
        cursor,
    }
}

fn fixed(replacement: String, start: usize) -> Insertion {
    let cursor = start + replacement.chars().count();
    Insertion {
        replacement,
        cursor,
    }
}

/// Byte offset of the `char_idx`-th char, or the end of the string.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, start: usize, end: usize, op: FormatOp) -> Edit {
        apply(text, Selection::new(start, end), &op)
    }

    // --- Wrap-style operations ---

    #[test]
    fn test_bold_wraps_selection_and_moves_past_markers() {
        let edit = run("Hello", 0, 5, FormatOp::Bold);
        assert_eq!(edit.text, "**Hello**");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn test_bold_without_selection_inserts_placeholder() {
        let edit = run("ab", 1, 1, FormatOp::Bold);
        assert_eq!(edit.text, "a**粗体文本**b");
        assert_eq!(edit.cursor, 3);
    }

    #[test]
    fn test_italic_uses_single_marker() {
        let edit = run("say hi now", 4, 6, FormatOp::Italic);
        assert_eq!(edit.text, "say *hi* now");
        assert_eq!(edit.cursor, 8);

        let edit = run("", 0, 0, FormatOp::Italic);
        assert_eq!(edit.text, "*斜体文本*");
        assert_eq!(edit.cursor, 1);
    }

    #[test]
    fn test_strikethrough_placeholder() {
        let edit = run("", 0, 0, FormatOp::Strikethrough);
        assert_eq!(edit.text, "~~删除线文本~~");
        assert_eq!(edit.cursor, 2);
    }

    // --- Prefix-style operations ---

    #[test]
    fn test_heading_two_on_empty_buffer() {
        let edit = run("", 0, 0, FormatOp::Heading(HeadingLevel::H2));
        assert_eq!(edit.text, "## 二级标题");
        assert_eq!(edit.cursor, 3);
    }

    #[test]
    fn test_heading_with_selection_ends_after_text() {
        let edit = run("Title", 0, 5, FormatOp::Heading(HeadingLevel::H3));
        assert_eq!(edit.text, "### Title");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn test_heading_one_and_two_with_selection() {
        let edit = run("intro text", 0, 5, FormatOp::Heading(HeadingLevel::H1));
        assert_eq!(edit.text, "# intro text");
        assert_eq!(edit.cursor, 7);

        let edit = run("a\nTitle", 2, 7, FormatOp::Heading(HeadingLevel::H2));
        assert_eq!(edit.text, "a\n## Title");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_ordered_list_with_selection_ends_after_text() {
        let edit = run("x item", 2, 6, FormatOp::OrderedListItem);
        assert_eq!(edit.text, "x 1. item");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn test_blockquote_with_selection_ends_after_text() {
        let edit = run("said: 好的", 6, 8, FormatOp::Blockquote);
        assert_eq!(edit.text, "said: > 好的");
        assert_eq!(edit.cursor, 10);
    }

    #[test]
    fn test_heading_placeholders_per_level() {
        assert_eq!(run("", 0, 0, FormatOp::Heading(HeadingLevel::H1)).text, "# 一级标题");
        assert_eq!(run("", 0, 0, FormatOp::Heading(HeadingLevel::H3)).text, "### 三级标题");
    }

    #[test]
    fn test_prefix_applies_once_to_multiline_selection() {
        let edit = run("one\ntwo", 0, 7, FormatOp::UnorderedListItem);
        assert_eq!(edit.text, "- one\ntwo");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn test_ordered_list_and_blockquote_markers() {
        let edit = run("", 0, 0, FormatOp::OrderedListItem);
        assert_eq!(edit.text, "1. 列表项");
        assert_eq!(edit.cursor, 3);

        let edit = run("x", 1, 1, FormatOp::Blockquote);
        assert_eq!(edit.text, "x> 引用内容");
        assert_eq!(edit.cursor, 3);
    }

    // --- Links, images, code ---

    #[test]
    fn test_link_with_selection() {
        let edit = run("see docs", 4, 8, FormatOp::Link);
        assert_eq!(edit.text, "see [docs](https://example.com)");
        assert_eq!(edit.cursor, 11);
    }

    #[test]
    fn test_link_without_selection_lands_inside_brackets() {
        let edit = run("", 0, 0, FormatOp::Link);
        assert_eq!(edit.text, "[链接文本](https://example.com)");
        assert_eq!(edit.cursor, 1);
    }

    #[test]
    fn test_image_with_selection() {
        let edit = run("a pic", 2, 5, FormatOp::Image);
        assert_eq!(edit.text, "a ![pic](https://example.com/image.jpg)");
        assert_eq!(edit.cursor, 8);
    }

    #[test]
    fn test_image_without_selection() {
        let edit = run("", 0, 0, FormatOp::Image);
        assert_eq!(edit.text, "![图片描述](https://example.com/image.jpg)");
        assert_eq!(edit.cursor, 2);
    }

    #[test]
    fn test_code_block_places_cursor_inside_fence() {
        let edit = run("", 0, 0, FormatOp::CodeBlock);
        assert_eq!(
            edit.text,
            "```javascript\nconsole.log('Hello, World!');\n```"
        );
        assert_eq!(edit.cursor, 14);

        let edit = run("let x;", 0, 6, FormatOp::CodeBlock);
        assert_eq!(edit.text, "```javascript\nlet x;\n```");
        assert_eq!(edit.cursor, 20);
    }

    // --- Fixed templates ---

    #[test]
    fn test_horizontal_rule_cursor_is_five_past_start() {
        let edit = run("ab", 1, 1, FormatOp::HorizontalRule);
        assert_eq!(edit.text, "a\n---\nb");
        assert_eq!(edit.cursor, 6);
    }

    #[test]
    fn test_table_ignores_selected_text() {
        let with = plan(&FormatOp::Table, "selected", 3);
        let without = plan(&FormatOp::Table, "", 3);
        assert_eq!(with, without);
        assert_eq!(with.cursor, 3 + TABLE_TEMPLATE.chars().count());
    }

    #[test]
    fn test_emoji_defaults_and_payload() {
        let edit = run("", 0, 0, FormatOp::Emoji(None));
        assert_eq!(edit.text, "😀");
        assert_eq!(edit.cursor, 1);

        let edit = run("hi", 2, 2, FormatOp::Emoji(Some("🎉🎉".to_string())));
        assert_eq!(edit.text, "hi🎉🎉");
        assert_eq!(edit.cursor, 4);
    }

    // --- Offsets are chars, not bytes ---

    #[test]
    fn test_multibyte_prefix_is_counted_in_chars() {
        let edit = run("中文abc", 2, 5, FormatOp::Bold);
        assert_eq!(edit.text, "中文**abc**");
        assert_eq!(edit.cursor, 9);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let edit = run("abc", 1, 99, FormatOp::Italic);
        assert_eq!(edit.text, "a*bc*");
    }

    // --- Tags ---

    #[test]
    fn test_from_tag_round_trips_every_tag() {
        for tag in FormatOp::TAGS {
            let op = FormatOp::from_tag(tag, None).unwrap();
            assert_eq!(op.tag(), tag);
        }
    }

    #[test]
    fn test_from_tag_rejects_unknown() {
        assert_eq!(
            FormatOp::from_tag("underline", None),
            Err(FormatError::UnknownOperation("underline".to_string()))
        );
    }

    #[test]
    fn test_heading_level_bounds() {
        assert_eq!(HeadingLevel::try_from(2), Ok(HeadingLevel::H2));
        assert_eq!(
            HeadingLevel::try_from(4),
            Err(FormatError::InvalidHeadingLevel(4))
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn placeholder_ops() -> impl Strategy<Value = FormatOp> {
            prop_oneof![
                Just(FormatOp::Bold),
                Just(FormatOp::Italic),
                Just(FormatOp::Strikethrough),
                Just(FormatOp::Heading(HeadingLevel::H1)),
                Just(FormatOp::Heading(HeadingLevel::H2)),
                Just(FormatOp::Heading(HeadingLevel::H3)),
                Just(FormatOp::Link),
                Just(FormatOp::Image),
                Just(FormatOp::CodeBlock),
                Just(FormatOp::UnorderedListItem),
                Just(FormatOp::OrderedListItem),
                Just(FormatOp::Blockquote),
            ]
        }

        proptest! {
            #[test]
            fn empty_selection_shows_placeholder_and_cursor_inside(
                op in placeholder_ops(),
                start in 0..50usize,
            ) {
                let insertion = plan(&op, "", start);
                let placeholder = op.placeholder().unwrap();
                let len = insertion.replacement.chars().count();
                prop_assert!(insertion.replacement.contains(placeholder));
                prop_assert!(insertion.cursor > start);
                prop_assert!(insertion.cursor < start + len);
            }

            #[test]
            fn wrap_ops_surround_selection(
                before in "[a-z ]{0,12}",
                selected in "[a-zA-Z0-9中文]{1,12}",
                after in "[a-z ]{0,12}",
                which in 0..3usize,
            ) {
                let (op, marker) = [
                    (FormatOp::Bold, "**"),
                    (FormatOp::Italic, "*"),
                    (FormatOp::Strikethrough, "~~"),
                ][which].clone();
                let text = format!("{before}{selected}{after}");
                let start = before.chars().count();
                let end = start + selected.chars().count();

                let edit = apply(&text, Selection::new(start, end), &op);

                prop_assert_eq!(
                    &edit.text,
                    &format!("{before}{marker}{selected}{marker}{after}")
                );
                prop_assert_eq!(edit.cursor, end + 2 * marker.chars().count());
            }

            #[test]
            fn prefix_ops_end_after_selected_text(
                before in "[a-z ]{0,12}",
                selected in "[a-zA-Z0-9中文]{1,12}",
                which in 0..6usize,
            ) {
                let (op, prefix) = [
                    (FormatOp::Heading(HeadingLevel::H1), "# "),
                    (FormatOp::Heading(HeadingLevel::H2), "## "),
                    (FormatOp::Heading(HeadingLevel::H3), "### "),
                    (FormatOp::UnorderedListItem, "- "),
                    (FormatOp::OrderedListItem, "1. "),
                    (FormatOp::Blockquote, "> "),
                ][which].clone();
                let text = format!("{before}{selected}");
                let start = before.chars().count();
                let end = start + selected.chars().count();

                let edit = apply(&text, Selection::new(start, end), &op);

                prop_assert_eq!(&edit.text, &format!("{before}{prefix}{selected}"));
                prop_assert_eq!(edit.cursor, end + prefix.chars().count());
            }

            #[test]
            fn table_and_rule_ignore_selection(
                text in "[a-z\n]{0,20}",
                start in 0..20usize,
                len in 0..10usize,
                rule in any::<bool>(),
            ) {
                let op = if rule { FormatOp::HorizontalRule } else { FormatOp::Table };
                let total = text.chars().count();
                let start = start.min(total);
                let end = (start + len).min(total);
                let selected: String = text.chars().skip(start).take(end - start).collect();

                prop_assert_eq!(plan(&op, &selected, start), plan(&op, "", start));
            }
        }
    }
}
