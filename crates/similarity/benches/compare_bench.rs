use canonical::{segment, SegmentConfig, SentenceUnit};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use similarity::{char_ratio, compare, diff_texts, CoverageStrategy, SimilarityConfig};

const PDF_PARAGRAPH: &str = "we measured the response of the samples under load. \
the results agree with the model within two percent. further work is needed. ";
const DOCX_PARAGRAPH: &str = "we measured the response of all samples under load. \
the results agree with our model within 2 percent. further work is required. ";

fn texts(paragraphs: usize) -> (String, String) {
    (
        PDF_PARAGRAPH.repeat(paragraphs).trim_end().to_string(),
        DOCX_PARAGRAPH.repeat(paragraphs).trim_end().to_string(),
    )
}

fn sentences(text: &str) -> Vec<SentenceUnit> {
    segment(text, &SegmentConfig::default()).collect()
}

fn bench_char_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_ratio");
    for paragraphs in [1, 10, 100] {
        let (a, b) = texts(paragraphs);
        group.throughput(Throughput::Bytes((a.len() + b.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &(a, b), |bench, (a, b)| {
            bench.iter(|| char_ratio(black_box(a), black_box(b)))
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    group.sample_size(20);
    let (a, b) = texts(50);
    let units = sentences(&a);

    let configs = [
        ("substring", SimilarityConfig::default()),
        (
            "substring_parallel",
            SimilarityConfig::new().with_parallel(true),
        ),
        (
            "best_sentence",
            SimilarityConfig::new().with_strategy(CoverageStrategy::BestSentence),
        ),
    ];
    for (name, cfg) in configs.iter() {
        group.bench_function(*name, |bench| {
            bench.iter(|| compare(black_box(&a), black_box(&b), black_box(&units), cfg))
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let (a, b) = texts(100);
    c.bench_function("diff_texts_100_paragraphs", |bench| {
        bench.iter(|| diff_texts(black_box(&a), black_box(&b)).len())
    });
}

criterion_group!(benches, bench_char_ratio, bench_compare, bench_diff);
criterion_main!(benches);
