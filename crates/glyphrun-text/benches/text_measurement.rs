//! Benchmarks for text measurement operations

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glyphrun_core::geometry::Size;
use glyphrun_text::{BitmapFont, DrawingPrimitive, Monospacing, RenderOptions, TextAlign};

fn setup(options: RenderOptions) -> DrawingPrimitive {
    let chars: String = ('!'..='~').collect();
    let mut font =
        BitmapFont::grid(&chars, Size::new(9.0, 16.0), 16).expect("Failed to build font");
    font.set_kerning_pair('A', 'V', -2.0);
    font.set_kerning_pair('T', 'o', -1.0);
    DrawingPrimitive::new(Arc::new(font), options)
}

fn bench_measure_basic(c: &mut Criterion) {
    let mut primitive = setup(RenderOptions::default());
    let mut group = c.benchmark_group("measure_basic");

    let long_text = "Lorem ipsum dolor sit amet. ".repeat(20);
    let texts: Vec<(&str, &str)> = vec![
        ("single_char", "A"),
        ("single_word", "Hello"),
        ("short_sentence", "Hello, World!"),
        ("medium_text", "The quick brown fox jumps over the lazy dog"),
        ("long_text", &long_text),
    ];

    for (name, content) in texts {
        group.bench_function(name, |b| {
            b.iter(|| black_box(primitive.measure(black_box(content), TextAlign::Left)));
        });
    }

    group.finish();
}

fn bench_measure_wrapped(c: &mut Criterion) {
    let mut primitive = setup(RenderOptions::default());
    let mut group = c.benchmark_group("measure_wrapped");
    let content = "The quick brown fox jumps over the lazy dog. ".repeat(10);

    for width in [50.0, 100.0, 200.0, 400.0, 800.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(width as u32),
            &width,
            |b, &width| {
                b.iter(|| black_box(primitive.measure_width(&content, width, TextAlign::Left)));
            },
        );
    }

    group.finish();
}

fn bench_measure_varying_lengths(c: &mut Criterion) {
    let mut primitive = setup(RenderOptions::default());
    let mut group = c.benchmark_group("measure_varying_lengths");

    for length in [10, 50, 100, 500, 1000, 5000] {
        let content = "a".repeat(length);
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &content, |b, content| {
            b.iter(|| black_box(primitive.measure(content, TextAlign::Left)));
        });
    }

    group.finish();
}

fn bench_measure_monospaced(c: &mut Criterion) {
    let mut natural = setup(RenderOptions::default());
    let mut mono = setup(RenderOptions::default().monospacing(Monospacing::Yes));
    let mut group = c.benchmark_group("measure_monospacing");
    let content = "fn main() { println!(\"Hello, world!\"); }";

    group.bench_function("natural", |b| {
        b.iter(|| black_box(natural.measure(content, TextAlign::Left)));
    });
    group.bench_function("monospaced", |b| {
        b.iter(|| black_box(mono.measure(content, TextAlign::Left)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_measure_basic,
    bench_measure_wrapped,
    bench_measure_varying_lengths,
    bench_measure_monospaced
);
criterion_main!(benches);
