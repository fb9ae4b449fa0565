//! Detection pass benchmark

use anomaly_detect::ZScoreDetector;
use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};

fn build_table(rows: usize, columns: usize) -> TimeIndexedTable {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let mut headers = vec!["Date".to_string()];
    headers.extend((0..columns).map(|c| format!("metric_{c}")));

    let records = (0..rows)
        .map(|i| {
            let day = (i % 28) + 1;
            let month = (i / 28) % 12 + 1;
            let mut record = vec![format!("{day:02}/{month:02}/2024")];
            record.extend((0..columns).map(|_| format!("{:.6}", rng.gen::<f64>() * 100.0)));
            record
        })
        .collect();

    let raw = RawTable::new(headers, records).unwrap();
    TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap()
}

fn bench_detect_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_all");

    for (rows, columns) in [(1_000, 4), (10_000, 4), (10_000, 16)] {
        let table = build_table(rows, columns);
        let detector = ZScoreDetector::default();
        group.bench_function(format!("{rows}x{columns}"), |b| {
            b.iter(|| detector.detect_all(black_box(&table)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_detect_all);
criterion_main!(benches);
