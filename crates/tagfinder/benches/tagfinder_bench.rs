use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tagfinder::perf_fixtures::{make_blocks, make_rawtext_adversarial};
use tagfinder::{Decomposer, decompose, find_tag};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn bench_decompose_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_decompose_small", |b| {
        b.iter(|| {
            let result = decompose(black_box(&input));
            black_box(result.tags.len());
        });
    });
}

fn bench_decompose_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_decompose_large", |b| {
        b.iter(|| {
            let result = decompose(black_box(&input));
            black_box(result.contents.len());
        });
    });
}

fn bench_decompose_reused(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let mut decomposer = Decomposer::default();
    c.bench_function("bench_decompose_reused", |b| {
        b.iter(|| {
            let result = decomposer.decompose(black_box(&input));
            black_box(result.tags.len());
        });
    });
}

fn bench_rawtext_adversarial(c: &mut Criterion) {
    let input = make_rawtext_adversarial(1 << 20);
    c.bench_function("bench_rawtext_adversarial", |b| {
        b.iter(|| {
            let result = decompose(black_box(&input));
            black_box(result.contents.len());
        });
    });
}

fn bench_find_tag_scan(c: &mut Criterion) {
    let input = "< a <b x=' <c/".repeat(50_000);
    c.bench_function("bench_find_tag_scan", |b| {
        b.iter(|| black_box(find_tag(black_box(&input), 0)));
    });
}

criterion_group!(
    benches,
    bench_decompose_small,
    bench_decompose_large,
    bench_decompose_reused,
    bench_rawtext_adversarial,
    bench_find_tag_scan
);
criterion_main!(benches);
