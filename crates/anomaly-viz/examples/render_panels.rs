//! Load, detect and render a synthetic dataset

use anomaly_detect::ZScoreDetector;
use anomaly_frame::{RawTable, ReadOptions, TimeIndexedTable};
use anomaly_viz::render_detection;

fn main() -> anyhow::Result<()> {
    // A month of three metrics with a couple of planted incidents
    let mut records: Vec<Vec<String>> = (1..=30)
        .map(|day| {
            let drift = (day as f64) * 0.1;
            vec![
                format!("{day:02}/04/2024"),
                format!("{:.2}", 40.0 + drift),
                format!("{:.2}", 2.0 + (day % 3) as f64 * 0.05),
                format!("{:.2}", 250.0 - drift),
            ]
        })
        .collect();
    records[17][1] = "95.00".to_string();
    records[23][3] = "20.00".to_string();

    let raw = RawTable::new(
        vec![
            "Date".into(),
            "cpu_pct".into(),
            "load".into(),
            "free_mb".into(),
        ],
        records,
    )?;
    let mut table = TimeIndexedTable::from_raw(&raw, "Date", &ReadOptions::default())?;

    let detector = ZScoreDetector::default();
    let result = detector.annotate(&mut table)?;
    println!("{result}");

    let paths = render_detection(&table, &result, "anomaly_panels")?;
    for path in paths {
        println!("wrote {path}");
    }

    Ok(())
}
