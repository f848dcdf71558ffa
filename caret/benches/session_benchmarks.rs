use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use caret::render::LineRenderConfig;
use caret::{Configuration, KeyInput, Mode, Session, WordList, WordSource};

fn words(count: usize) -> Vec<String> {
    WordList::english()
        .with_seed(1)
        .generate(count)
        .unwrap_or_default()
}

// Type every word, with an error on every tenth character
fn keystrokes(words: &[String]) -> Vec<KeyInput> {
    words
        .iter()
        .flat_map(|word| word.chars().chain(std::iter::once(' ')))
        .enumerate()
        .map(|(i, c)| if i % 10 == 9 && c != ' ' { KeyInput::Char('#') } else { KeyInput::from(c) })
        .collect()
}

fn benchmark_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_typing");
    let config = Configuration::default();

    for count in [25, 100, 500] {
        let words = words(count);
        let keys = keystrokes(&words);

        group.bench_with_input(BenchmarkId::new("handle_key", count), &keys, |b, keys| {
            b.iter(|| {
                let Some(mut session) = Session::new(Mode::words(count), &words, &config) else {
                    return;
                };
                for (i, key) in keys.iter().enumerate() {
                    session.handle_key(black_box(*key));
                    if i % 5 == 0 {
                        session.tick();
                    }
                }
                black_box(session.counters());
            })
        });
    }

    group.finish();
}

fn benchmark_render_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_render_lines");
    let config = Configuration::default();

    for count in [50, 250] {
        let words = words(count);
        let Some(session) = Session::new(Mode::time(60), &words, &config) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("line_80", count), &session, |b, session| {
            b.iter(|| {
                session.render_lines(
                    |line| Some(line.words.len()),
                    LineRenderConfig::new(black_box(80)),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_typing, benchmark_render_lines);
criterion_main!(benches);
