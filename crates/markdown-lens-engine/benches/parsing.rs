use criterion::{Criterion, criterion_group, criterion_main};
use markdown_lens_engine::Document;

fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with [a link](http://example.com) and *emphasis* and `code`.\n\n- Bullet point\n- [x] Task item\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = generate_markdown_content(100);
    group.bench_function("document_parse", |b| {
        b.iter(|| {
            let doc = Document::parse(std::hint::black_box(&content));
            std::hint::black_box(doc);
        });
    });
    group.bench_function("summary", |b| {
        let doc = Document::parse(&content);
        b.iter(|| {
            std::hint::black_box(doc.summary());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_parse);
criterion_main!(benches);
