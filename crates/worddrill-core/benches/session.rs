use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use worddrill_core::drill::DrillMode;
use worddrill_core::model::{Gender, NounRecord, Record};
use worddrill_core::options::make_options;
use worddrill_core::session::{PracticeSession, Selection};

fn pool(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            Record::Noun(NounRecord {
                sr_no: i as u32 + 1,
                noun: format!("noun {i}"),
                german_word: format!("Wort{i}"),
                article: "das".into(),
                gender: Gender::Neutral,
                plural: String::new(),
                example: String::new(),
            })
        })
        .collect()
}

fn bench_make_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_options");
    let words: Vec<String> = (0..1000).map(|i| format!("Wort{i}")).collect();
    let mut rng = StdRng::seed_from_u64(1);

    group.bench_function("pool_1000", |b| {
        b.iter(|| {
            make_options(
                black_box("Wort7"),
                words.iter().map(String::as_str),
                &mut rng,
            )
        })
    });

    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_drain");
    let records = pool(500);

    group.bench_function("translation_500", |b| {
        b.iter(|| {
            let mut session = PracticeSession::seeded(DrillMode::Translation, 7);
            session.load_pool(records.clone());
            let mut shown = 1usize;
            while let Selection::Item(_) = session.advance() {
                shown += 1;
            }
            black_box(shown)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_make_options, bench_drain);
criterion_main!(benches);
