use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use caret::Counters;
use caret::math::{Accuracy, Consistency, Wpm};

fn benchmark_wpm_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("wpm_calculations");

    let test_cases = vec![
        (100, 5, 15),        // Short test
        (1000, 50, 120),     // Long test
        (10000, 500, 1200),  // Endurance
    ];

    for (correct, incorrect, seconds) in test_cases {
        group.bench_with_input(
            BenchmarkId::new("calculate", format!("{correct}chars_{seconds}s")),
            &(correct, incorrect, seconds),
            |b, &(correct, incorrect, seconds)| {
                b.iter(|| {
                    Wpm::calculate(
                        black_box(correct),
                        black_box(incorrect),
                        black_box(seconds),
                    )
                })
            },
        );
    }

    group.finish();
}

fn benchmark_ratio_calculations(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratio_calculations");

    let test_cases = vec![(100, 5, 2), (1000, 50, 20), (10000, 500, 200)];

    for (correct, incorrect, missed) in test_cases {
        let total = correct + incorrect + missed;

        group.bench_with_input(
            BenchmarkId::new("accuracy", format!("{total}chars")),
            &(correct, total),
            |b, &(correct, total)| b.iter(|| Accuracy::calculate(black_box(correct), black_box(total))),
        );

        group.bench_with_input(
            BenchmarkId::new("consistency", format!("{total}chars")),
            &(correct, incorrect, total),
            |b, &(correct, incorrect, total)| {
                b.iter(|| {
                    Consistency::calculate(
                        black_box(correct),
                        black_box(incorrect),
                        black_box(total),
                    )
                })
            },
        );
    }

    group.finish();
}

fn benchmark_counter_metrics(c: &mut Criterion) {
    let counters = Counters {
        correct_char: 1250,
        incorrect_char: 40,
        missed_char: 12,
        extra_char: 8,
        correct_word: 230,
        completed_words: 250,
    };

    c.bench_function("counters_all_metrics", |b| {
        b.iter(|| {
            let counters = black_box(&counters);
            (
                counters.wpm(black_box(60)),
                counters.accuracy(),
                counters.consistency(),
            )
        })
    });
}

criterion_group!(
    benches,
    benchmark_wpm_calculations,
    benchmark_ratio_calculations,
    benchmark_counter_metrics
);
criterion_main!(benches);
