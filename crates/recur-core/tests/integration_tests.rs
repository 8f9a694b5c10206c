//! Integration tests for recur-core
//!
//! These tests exercise the full load → merge → detect workflow.

use chrono::NaiveDate;
use recur_core::{
    config::ConfigFile,
    detect::RecurrenceDetector,
    import::{load_csv, load_json, merge_files, CsvLayout},
    models::Frequency,
};

/// Chase export with three obvious subscriptions (Netflix, Spotify, Hulu),
/// one irregular merchant, and one corrupt row
fn chase_csv_with_subscriptions() -> &'static str {
    r#"Transaction Date,Post Date,Description,Category,Type,Amount,Memo
07/15/2023,07/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
08/15/2023,08/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
09/15/2023,09/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
10/15/2023,10/16/2023,NETFLIX.COM,Entertainment,Sale,-15.49,
07/20/2023,07/21/2023,SPOTIFY USA,Entertainment,Sale,-10.99,
08/20/2023,08/21/2023,SPOTIFY USA,Entertainment,Sale,-10.99,
09/20/2023,09/21/2023,SPOTIFY USA,Entertainment,Sale,-10.99,
10/20/2023,10/21/2023,SPOTIFY USA,Entertainment,Sale,-10.99,
07/01/2023,07/02/2023,HULU,Entertainment,Sale,-17.99,
08/01/2023,08/02/2023,HULU,Entertainment,Sale,-17.99,
09/01/2023,09/02/2023,HULU,Entertainment,Sale,-17.99,
10/01/2023,10/02/2023,HULU,Entertainment,Sale,-17.99,
07/03/2023,07/04/2023,HARDWARE STORE,Home,Sale,-42.10,
07/09/2023,07/10/2023,HARDWARE STORE,Home,Sale,-8.75,
09/28/2023,09/29/2023,HARDWARE STORE,Home,Sale,-120.00,
??/??/2023,10/30/2023,NETFLIX.COM,Entertainment,Sale,-15.49,"#
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_import_and_detect_subscriptions() {
    let report = load_csv(chase_csv_with_subscriptions().as_bytes(), CsvLayout::Chase)
        .expect("Failed to parse CSV");
    assert_eq!(report.transactions.len(), 15);
    assert_eq!(report.skipped.len(), 1);

    let patterns = RecurrenceDetector::new().detect(&report.transactions);
    let names: Vec<&str> = patterns.iter().map(|p| p.description.as_str()).collect();

    // Expenses are negative, so the cheapest charge sorts first
    assert_eq!(names, vec!["SPOTIFY USA", "NETFLIX.COM", "HULU"]);
    assert!(patterns.iter().all(|p| p.frequency == Frequency::Monthly));

    let netflix = &patterns[1];
    assert_eq!(netflix.occurrences, 4);
    assert_eq!(netflix.last_occurrence, date(2023, 10, 15));
    assert_eq!(netflix.next_occurrence, date(2023, 11, 15));
    assert!((netflix.estimated_monthly_savings - -15.49).abs() < 1e-9);
}

#[test]
fn test_overlapping_exports_do_not_break_detection() {
    let first = r#"[
        {"description": "Netflix", "amount": -39.90, "date": "2025-01-05"},
        {"description": "Netflix", "amount": -39.90, "date": "2025-02-05"}
    ]"#;
    let second = r#"[
        {"description": "Netflix", "amount": "-39.90", "date": "2025-02-05"},
        {"description": "Netflix", "amount": -39.90, "date": "2025-03-05"}
    ]"#;

    let files = vec![
        load_json(first.as_bytes()).unwrap().transactions,
        load_json(second.as_bytes()).unwrap().transactions,
    ];

    // Without merging, the repeated Feb 5 row adds a zero-day gap
    let unmerged: Vec<_> = files.iter().flatten().cloned().collect();
    assert!(RecurrenceDetector::new().detect(&unmerged).is_empty());

    let merged = merge_files(files);
    assert_eq!(merged.duplicates, 1);

    let patterns = RecurrenceDetector::new().detect(&merged.transactions);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].next_occurrence, date(2025, 4, 5));
}

#[test]
fn test_config_file_tightens_detection() {
    let transactions = load_json(
        r#"[
            {"description": "Gym", "amount": -100, "date": "2025-01-01"},
            {"description": "Gym", "amount": -100, "date": "2025-01-20"}
        ]"#
        .as_bytes(),
    )
    .unwrap()
    .transactions;

    let default_config = ConfigFile::parse("").unwrap();
    assert_eq!(
        RecurrenceDetector::with_config(default_config.detection)
            .detect(&transactions)
            .len(),
        1
    );

    let strict = ConfigFile::parse("[detection]\nmin_occurrences = 3\n").unwrap();
    assert!(RecurrenceDetector::with_config(strict.detection)
        .detect(&transactions)
        .is_empty());
}
