//! Basic anomaly detection example

use anomaly_detect::{DetectorProperties, ZScoreDetector};
use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Z-Score Anomaly Detection Examples ===\n");

    // Example 1: a spike well beyond the default threshold
    println!("1. Spike Detection (default threshold)");
    let mut records: Vec<Vec<String>> = (1..=14)
        .map(|day| vec![format!("{day:02}/02/2024"), "100".to_string()])
        .collect();
    records[9][1] = "900".to_string();
    let raw = RawTable::new(vec!["Date".into(), "requests".into()], records)?;
    let table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default())?;

    let detector = ZScoreDetector::default();
    let result = detector.detect_all(&table)?;

    println!("  Algorithm: {}", detector.algorithm_name());
    println!("  Data: 14 days of ~100 requests with one 900-request day");
    println!("  Found {} anomalies", result.total_anomalies());
    for point in result.column("requests").unwrap().anomalies() {
        println!("    {point}");
    }

    // Example 2: threshold sensitivity
    println!("\n2. Threshold Sensitivity");
    for threshold in [2.0, 3.0, 3.5] {
        let result = ZScoreDetector::new(threshold).detect_all(&table)?;
        println!(
            "  threshold {threshold}: {} anomalies",
            result.total_anomalies()
        );
    }

    // Example 3: augmenting the table for a rendering collaborator
    println!("\n3. Table Augmentation");
    let mut table = table;
    ZScoreDetector::new(2.5).annotate(&mut table)?;
    let names: Vec<&str> = table.column_names().collect();
    println!("  Columns after annotation: {names:?}");

    Ok(())
}
