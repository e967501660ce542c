//! End-to-end editing flows through the public API.

use chrono::NaiveDate;
use markdraft::app::{App, Message, Model, ToastLevel, update};
use markdraft::document;
use markdraft::editor::{FormatOp, HeadingLevel, Selection, format};
use markdraft::host::TerminalHost;
use markdraft::theme;

fn apply(model: Model, op: FormatOp) -> Model {
    let model = update(model, Message::Format(op));
    update(model, Message::CaretReflected)
}

#[test]
fn test_write_document_with_toolbar() {
    let mut model = Model::new("");
    model = apply(model, FormatOp::Heading(HeadingLevel::H1));
    model = update(model, Message::SelectAll);
    model = update(model, Message::InsertText("# 周报".into()));
    model = update(model, Message::InsertText("\n\n".into()));
    model = apply(model, FormatOp::UnorderedListItem);
    assert_eq!(model.buffer().selection(), Selection::caret(8));
    let end = model.buffer().len_chars();
    model = update(model, Message::Select(end, end));
    model = update(model, Message::InsertText("\n".into()));
    model = apply(model, FormatOp::CodeBlock);

    let text = model.text();
    assert!(text.starts_with("# 周报\n\n- 列表项\n```javascript\n"));
    assert!(text.ends_with("console.log('Hello, World!');\n```"));

    let html = model.preview().html();
    assert!(html.contains("<h1>周报</h1>"));
    assert!(html.contains("<li>列表项</li>"));
    assert!(html.contains("language-javascript"));
    assert_eq!(model.stats().lines, text.split('\n').count());
}

#[test]
fn test_engine_and_buffer_agree() {
    let source = "say hello world";
    for op in [
        FormatOp::Bold,
        FormatOp::Link,
        FormatOp::Blockquote,
        FormatOp::Table,
        FormatOp::Emoji(Some("🎉".into())),
    ] {
        let expected = format::apply(source, Selection::new(4, 9), &op);
        let model = update(Model::new(source), Message::Select(4, 9));
        let model = apply(model, op);
        assert_eq!(model.text(), expected.text);
        assert_eq!(model.buffer().selection(), Selection::caret(expected.cursor));
    }
}

#[test]
fn test_themed_code_block_gets_block_and_token_styles() {
    let model = Model::new("```rust\nfn main() {}\n```").with_themes("magazine", "dracula");
    let container = model.themed_preview().unwrap();
    let code = theme::code("dracula");

    let pre = container.find_all(|el| el.tag() == "pre");
    assert_eq!(pre.len(), 1);
    assert_eq!(pre[0].style.get("backgroundColor"), code.block_value("backgroundColor"));

    let keywords = container.find_all(|el| el.has_class("tok-keyword"));
    assert!(!keywords.is_empty());
    assert_eq!(keywords[0].style.get("color"), Some(code.keyword_color));
}

#[test]
fn test_render_placeholder_for_blank_buffer() {
    assert!(document::render("").is_placeholder());
    assert!(document::render(" \n\t").is_placeholder());
    assert_eq!(document::stats("").lines, 1);
}

#[test]
fn test_export_and_clear_through_terminal_host() {
    let dir = tempfile::tempdir().unwrap();
    let host = TerminalHost::new(dir.path()).with_assume_yes(true);
    let mut app = App::new(host).with_export_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

    let model = app.dispatch(Model::new("draft\n"), Message::Export);
    assert_eq!(model.active_toast(), Some(("文件导出成功", ToastLevel::Success)));
    let path = dir.path().join("markdown-document-2025-12-31.md");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft\n");

    let model = app.dispatch(model, Message::RequestClear);
    assert_eq!(model.text(), "");
    assert_eq!(model.active_toast(), Some(("内容已清空", ToastLevel::Success)));

    let model = app.dispatch(model, Message::Export);
    assert_eq!(
        model.active_toast(),
        Some(("没有内容可导出", ToastLevel::Warning))
    );
}

#[test]
fn test_toolbar_links_show_up_in_text_tools() {
    let mut model = Model::new("");
    model = apply(model, FormatOp::Link);
    let end = model.buffer().len_chars();
    model = update(model, Message::Select(end, end));
    model = update(model, Message::InsertText("\n\n".into()));
    model = apply(model, FormatOp::Image);

    let text = model.text();
    let links = document::extract_links(&text);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].text, "链接文本");
    assert_eq!(links[0].url, "https://example.com");

    let images = document::extract_images(&text);
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].alt, "图片描述");

    let stats = document::detailed_stats(&text);
    assert_eq!((stats.links, stats.images, stats.paragraphs), (1, 1, 2));
    assert_eq!(document::plain_text(&text), "链接文本\n\n图片描述");
}
