use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sling::path::{normalize, PathRelationship, ResourcePathIterator};
use sling::PathParser;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    // Plain path, no parameter block
    group.bench_function("no_parameters", |b| {
        b.iter(|| PathParser::parse(black_box("/content/site/en/page.print.html/suffix")));
    });

    // Parameters before the extension
    group.bench_function("before_extension", |b| {
        b.iter(|| PathParser::parse(black_box("/a/b;foo=bar;v=2.html/suffix")));
    });

    // Parameters after the extension
    group.bench_function("after_extension", |b| {
        b.iter(|| PathParser::parse(black_box("/a/b.html;foo=bar;v=2/suffix")));
    });

    // Quoted value
    group.bench_function("quoted_value", |b| {
        b.iter(|| PathParser::parse(black_box("/a/b;foo='bar,baz.qux'.html")));
    });

    // Malformed block
    group.bench_function("invalid", |b| {
        b.iter(|| PathParser::parse(black_box("/a.;x")));
    });

    group.finish();
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");

    for count in [1, 8, 32] {
        let block: String = (0..count).map(|i| format!(";p{i}=v{i}")).collect();
        let path = format!("/content/page{block}.html/suffix");
        group.bench_with_input(BenchmarkId::from_parameter(count), &path, |b, path| {
            b.iter(|| PathParser::parse(black_box(path)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("clean", |b| {
        b.iter(|| normalize::normalize(black_box("/absolute/path/to/resource")));
    });

    group.bench_function("with_dots", |b| {
        b.iter(|| normalize::normalize(black_box("/a/b/../c/./d//e/")));
    });

    group.finish();
}

fn bench_relationship(c: &mut Criterion) {
    let mut group = c.benchmark_group("relationship");

    let ancestor = "/content/site/en";
    let descendant = "/content/site/en/page/child";
    let unrelated = "/content/site/english";

    group.bench_function("ancestor", |b| {
        b.iter(|| PathRelationship::between(black_box(ancestor), black_box(descendant)));
    });

    group.bench_function("unrelated_prefix", |b| {
        b.iter(|| PathRelationship::between(black_box(ancestor), black_box(unrelated)));
    });

    group.finish();
}

fn bench_candidates(c: &mut Criterion) {
    c.bench_function("resource_path_iterator", |b| {
        b.iter(|| ResourcePathIterator::new(black_box("/a/b.sel1.sel2.html/s/x.y")).count());
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_parse_scaling,
    bench_normalize,
    bench_relationship,
    bench_candidates
);
criterion_main!(benches);
