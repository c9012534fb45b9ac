use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ladle_core::{Document, Query};

/// Builds a page with `n` sibling sections, each holding a few classed divs.
fn synthetic_page(n: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..n {
        html.push_str(&format!(
            r#"<section id="s{i}"><div class="card item">Card {i}</div><div class="item">Item <b>{i}</b></div><p>Para {i}</p></section>"#
        ));
    }
    html.push_str(r#"<div id="last" class="card">Last</div></body></html>"#);
    html
}

/// Builds `depth` levels of nested divs.
fn deeply_nested(depth: usize) -> String {
    let mut html = String::from("<html><body>");
    html.push_str(&"<div>".repeat(depth));
    html.push_str(r#"<span class="leaf">leaf</span>"#);
    html.push_str(&"</div>".repeat(depth));
    html.push_str("</body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/hello_world.html").unwrap();
    let large = synthetic_page(2_000);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "fixture"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "2000 sections"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let doc = Document::parse(&synthetic_page(2_000)).unwrap();
    let root = doc.root();

    c.bench_function("find_last_by_id", |b| {
        b.iter(|| root.find(black_box(("div", "id", "last"))))
    });

    c.bench_function("find_all_loose_class", |b| {
        b.iter(|| root.find_all(black_box(("div", "class", "card"))))
    });

    c.bench_function("find_all_strict_class", |b| {
        b.iter(|| root.find_all_strict(black_box(("div", "class", "card item"))))
    });
}

fn bench_deep(c: &mut Criterion) {
    let doc = Document::parse(&deeply_nested(5_000)).unwrap();
    let root = doc.root();

    c.bench_function("find_deep_leaf", |b| {
        b.iter(|| root.find(black_box(Query::any().attr("class", "leaf"))))
    });

    c.bench_function("full_text_deep", |b| b.iter(|| root.full_text()));
}

criterion_group!(benches, bench_parse, bench_find, bench_deep);
criterion_main!(benches);
