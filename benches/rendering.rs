//! Benchmarks for preview rendering and theming.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markdraft::document;
use markdraft::theme;

const SAMPLE: &str = "# Title\n\nSome **bold** and *italic* text with `code`.\n\n\
- one\n- two\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n\
```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n";

fn bench_render(c: &mut Criterion) {
    let source = SAMPLE.repeat(20);
    c.bench_function("render_html", |b| {
        b.iter(|| document::render_html(black_box(&source)));
    });
}

fn bench_apply_themes(c: &mut Criterion) {
    let preview = document::render(&SAMPLE.repeat(20));
    let typography = theme::typography("academic");
    let code = theme::code("monokai");
    c.bench_function("apply_themes", |b| {
        b.iter(|| {
            let mut container = preview.container();
            theme::apply_typography(Some(&mut container), Some(typography));
            theme::apply_code(Some(&mut container), Some(code));
            container
        });
    });
}

criterion_group!(benches, bench_render, bench_apply_themes);
criterion_main!(benches);
