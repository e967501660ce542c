//! Markdown to markup conversion with comrak.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

use super::markup::{Element, Node};
use crate::highlight;

/// Parse markdown source into a list of top-level markup nodes.
pub fn parse_markup(source: &str) -> Vec<Node> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut out = Vec::new();
    process_children(root, &mut out);
    out
}

pub(super) fn create_options() -> Options {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    options
}

fn process_children<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    for child in node.children() {
        process_node(child, out);
    }
}

/// Convert one AST node (and its subtree) into markup.
fn process_node<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Document => process_children(node, out),

        NodeValue::Heading(heading) => {
            out.push(element(&format!("h{}", heading.level), node));
        }

        NodeValue::Paragraph => {
            if in_tight_list(node) {
                process_children(node, out);
            } else {
                out.push(element("p", node));
            }
        }

        NodeValue::Text(text) => out.push(Node::Text(text)),
        NodeValue::SoftBreak => out.push(Node::Text("\n".to_string())),
        NodeValue::LineBreak => out.push(Node::Element(Element::new("br"))),

        NodeValue::Emph => out.push(element("em", node)),
        NodeValue::Strong => out.push(element("strong", node)),
        NodeValue::Strikethrough => out.push(element("del", node)),

        NodeValue::Code(code) => {
            let el = Element::new("code").with_children(vec![Node::Text(code.literal)]);
            out.push(Node::Element(el));
        }

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .filter(|s| !s.is_empty())
                .map(ToString::to_string);
            out.push(Node::Element(code_block_element(
                language.as_deref(),
                &code_block.literal,
            )));
        }

        NodeValue::Link(link) => {
            let mut el = Element::new("a").with_attr("href", safe_url(link.url));
            if !link.title.is_empty() {
                el = el.with_attr("title", link.title);
            }
            out.push(Node::Element(el.with_children(child_nodes(node))));
        }

        NodeValue::Image(image) => {
            let mut el = Element::new("img")
                .with_attr("src", safe_url(image.url))
                .with_attr("alt", extract_text(node));
            if !image.title.is_empty() {
                el = el.with_attr("title", image.title);
            }
            out.push(Node::Element(el));
        }

        NodeValue::List(list) => {
            let el = match list.list_type {
                ListType::Bullet => Element::new("ul"),
                ListType::Ordered if list.start != 1 => {
                    Element::new("ol").with_attr("start", list.start.to_string())
                }
                ListType::Ordered => Element::new("ol"),
            };
            out.push(Node::Element(el.with_children(child_nodes(node))));
        }

        NodeValue::Item(_) => out.push(element("li", node)),

        NodeValue::TaskItem(symbol) => {
            let mut checkbox = Element::new("input")
                .with_attr("type", "checkbox")
                .with_attr("disabled", "");
            if symbol.is_some() {
                checkbox = checkbox.with_attr("checked", "");
            }
            let mut children = vec![Node::Element(checkbox), Node::Text(" ".to_string())];
            children.extend(child_nodes(node));
            out.push(Node::Element(Element::new("li").with_children(children)));
        }

        NodeValue::BlockQuote => out.push(element("blockquote", node)),
        NodeValue::ThematicBreak => out.push(Node::Element(Element::new("hr"))),

        NodeValue::Table(_) => out.push(Node::Element(table_element(node))),
        NodeValue::TableRow(_) | NodeValue::TableCell => {
            // Reached only through `table_element`; keep content if nested oddly.
            process_children(node, out);
        }

        NodeValue::HtmlBlock(html) => out.push(Node::Raw(html.literal)),
        NodeValue::HtmlInline(html) => out.push(Node::Raw(html)),

        _ => process_children(node, out),
    }
}

fn element<'a>(tag: &str, node: &'a AstNode<'a>) -> Node {
    Node::Element(Element::new(tag).with_children(child_nodes(node)))
}

fn child_nodes<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut children = Vec::new();
    process_children(node, &mut children);
    children
}

/// `<pre><code class="language-x">` with token spans.
fn code_block_element(language: Option<&str>, literal: &str) -> Element {
    let mut code = Element::new("code");
    if let Some(lang) = language {
        code = code.with_attr("class", format!("language-{lang}"));
    }
    let spans = highlight::classify(language, literal)
        .into_iter()
        .map(|token| match token.kind.class() {
            Some(class) => Node::Element(
                Element::new("span")
                    .with_attr("class", class)
                    .with_children(vec![Node::Text(token.text)]),
            ),
            None => Node::Text(token.text),
        })
        .collect();
    Element::new("pre").with_children(vec![Node::Element(code.with_children(spans))])
}

/// First row goes into `thead`, the rest into `tbody`.
fn table_element<'a>(node: &'a AstNode<'a>) -> Element {
    let mut head = Vec::new();
    let mut body = Vec::new();

    for row in node.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cell_tag = if is_header { "th" } else { "td" };
        let cells = row
            .children()
            .map(|cell| element(cell_tag, cell))
            .collect();
        let tr = Node::Element(Element::new("tr").with_children(cells));
        if is_header {
            head.push(tr);
        } else {
            body.push(tr);
        }
    }

    let mut children = Vec::new();
    if !head.is_empty() {
        children.push(Node::Element(Element::new("thead").with_children(head)));
    }
    if !body.is_empty() {
        children.push(Node::Element(Element::new("tbody").with_children(body)));
    }
    Element::new("table").with_children(children)
}

/// Schemes that can run script or read local files when followed.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "file:"];

/// `data:` URLs are only allowed for these image types.
const ALLOWED_DATA_IMAGES: [&str; 4] = ["image/png", "image/gif", "image/jpeg", "image/webp"];

/// Same rule as comrak's HTML renderer: blocked destinations become empty.
fn safe_url(url: String) -> String {
    if is_dangerous_url(&url) {
        tracing::debug!(url, "dropping unsafe link destination");
        String::new()
    } else {
        url
    }
}

fn is_dangerous_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return true;
    }
    lower.strip_prefix("data:").is_some_and(|rest| {
        !ALLOWED_DATA_IMAGES
            .iter()
            .any(|mime| rest.starts_with(mime))
    })
}

pub(super) fn in_tight_list<'a>(node: &'a AstNode<'a>) -> bool {
    let Some(item) = node.parent() else {
        return false;
    };
    if !matches!(
        item.data.borrow().value,
        NodeValue::Item(_) | NodeValue::TaskItem(_)
    ) {
        return false;
    }
    item.parent().is_some_and(|list| match &list.data.borrow().value {
        NodeValue::List(list) => list.tight,
        _ => false,
    })
}

pub(super) fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}
