//! Integration tests: detection over realistic generated series

use std::io::Cursor;

use anomaly_detect::{column_stats, Classification, ZScoreDetector};
use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};
use approx::assert_abs_diff_eq;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// A table of `n` rows with gaussian noise columns and a few injected
/// spikes in the second column.
fn generated_table(n: usize) -> (TimeIndexedTable, Vec<usize>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let noise = Normal::new(10.0, 2.0).unwrap();

    let spike_rows = vec![n / 4, n / 2, 3 * n / 4];
    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        let day = (i % 28) + 1;
        let month = (i / 28) % 12 + 1;
        let steady: f64 = noise.sample(&mut rng);
        let spiky: f64 = if spike_rows.contains(&i) {
            10.0 + 40.0 * (1.0 + rng.gen::<f64>())
        } else {
            noise.sample(&mut rng)
        };
        records.push(vec![
            format!("{day:02}/{month:02}/2024"),
            format!("{steady:.6}"),
            format!("{spiky:.6}"),
        ]);
    }

    let raw = RawTable::new(
        vec!["Date".into(), "steady".into(), "spiky".into()],
        records,
    )
    .unwrap();
    let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap();
    (table, spike_rows)
}

#[test]
fn scores_standardize_each_column() {
    let (table, _) = generated_table(500);
    let result = ZScoreDetector::default().detect_all(&table).unwrap();

    for column in result.columns() {
        let finite: Vec<f64> = column
            .scores()
            .iter()
            .copied()
            .filter(|s| s.is_finite())
            .collect();
        let stats = column_stats(&finite).unwrap();
        assert_abs_diff_eq!(stats.mean, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(stats.std_dev, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn injected_spikes_are_flagged() {
    let (table, spike_rows) = generated_table(500);
    let result = ZScoreDetector::default().detect_all(&table).unwrap();

    let spiky = result.column("spiky").unwrap();
    for &row in &spike_rows {
        assert_eq!(
            spiky.is_anomaly(row),
            Some(true),
            "spike at row {row} not flagged"
        );
    }
}

#[test]
fn anomalies_align_with_the_index() {
    let (table, _) = generated_table(300);
    let result = ZScoreDetector::new(2.0).detect_all(&table).unwrap();

    for column in result.columns() {
        assert!(column.anomalies().len() <= table.len());
        for point in column.anomalies() {
            // Every flagged row's timestamp exists in the original index
            assert_eq!(table.timestamp(point.row), Some(point.timestamp));
            assert!(table.index().contains(&point.timestamp));
            // And the classification sequence agrees
            assert_eq!(column.classifications()[point.row], Classification::Anomaly);
        }
    }
}

#[test]
fn csv_to_annotated_table_end_to_end() {
    let csv = "\
Date,requests
01/02/2024,100
02/02/2024,102
03/02/2024,98
04/02/2024,101
05/02/2024,99
06/02/2024,100
07/02/2024,500
08/02/2024,101
";
    let raw = RawTable::from_reader(Cursor::new(csv)).unwrap();
    let mut table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default()).unwrap();

    let result = ZScoreDetector::default().annotate(&mut table).unwrap();

    // The augmented table carries score and classification columns
    let names: Vec<&str> = table.column_names().collect();
    assert_eq!(names, vec!["requests", "score_requests", "classification_requests"]);

    let requests = result.column("requests").unwrap();
    assert_eq!(requests.anomaly_count(), 1);
    let spike = &requests.anomalies()[0];
    assert_eq!(spike.row, 6);
    assert_eq!(spike.value, 500.0);
    assert_eq!(
        spike.timestamp.format("%Y-%m-%d").to_string(),
        "2024-02-07"
    );
    assert_eq!(table.values("classification_requests").unwrap()[6], 1.0);
}
