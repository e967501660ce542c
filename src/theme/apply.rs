//! Painting rendered containers with theme styles.
//!
//! Both functions only assign declarations, replacing same-named ones, so
//! applying a theme twice leaves the container unchanged.

use super::{CodeTheme, TypographyTheme};
use crate::document::Element;
use crate::highlight::TokenKind;

const INLINE_CODE_PADDING: &str = "2px 4px";
const INLINE_CODE_RADIUS: &str = "3px";
const INLINE_CODE_FONT_SIZE: &str = "0.9em";

/// Style the container itself, then every `h1`-`h6` inside it.
///
/// All heading levels get the same declarations. Does nothing when either
/// argument is missing.
pub fn apply_typography(container: Option<&mut Element>, theme: Option<&TypographyTheme>) {
    let (Some(container), Some(theme)) = (container, theme) else {
        return;
    };

    container.style.assign(theme.container_style);
    container.walk_descendants_mut(&mut |el, _| {
        if el.is_heading() {
            el.style.assign(theme.heading_style);
        }
    });
}

/// Style code blocks and inline code inside the container.
///
/// `pre` elements take the whole block style. Inline `code` (outside any
/// `pre`) only borrows the block background and the keyword color, plus
/// fixed padding, radius and size. Token spans inside blocks take the
/// matching theme color.
pub fn apply_code(container: Option<&mut Element>, theme: Option<&CodeTheme>) {
    let (Some(container), Some(theme)) = (container, theme) else {
        return;
    };

    let background = theme.block_value("backgroundColor");
    container.walk_descendants_mut(&mut |el, inside_pre| {
        if el.tag() == "pre" {
            el.style.assign(theme.block_style);
        } else if el.tag() == "code" && !inside_pre {
            if let Some(background) = background {
                el.style.set("backgroundColor", background);
            }
            el.style.set("color", theme.keyword_color);
            el.style.set("padding", INLINE_CODE_PADDING);
            el.style.set("borderRadius", INLINE_CODE_RADIUS);
            el.style.set("fontSize", INLINE_CODE_FONT_SIZE);
        } else if el.tag() == "span" && inside_pre {
            if let Some(color) = token_color(el, theme) {
                el.style.set("color", color);
            }
        }
    });
}

fn token_color(span: &Element, theme: &CodeTheme) -> Option<&'static str> {
    let kind = span
        .attr("class")?
        .split_whitespace()
        .find_map(TokenKind::from_class)?;
    match kind {
        TokenKind::Keyword => Some(theme.keyword_color),
        TokenKind::String => Some(theme.string_color),
        TokenKind::Comment => Some(theme.comment_color),
        TokenKind::Function => Some(theme.function_color),
        TokenKind::Plain => None,
    }
}
