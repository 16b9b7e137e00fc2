//! Behavior-driven tests for the full pipeline
//!
//! These tests build a dataset tree on disk and verify what a run leaves in
//! the results directory: which tables produce output, how many are
//! inspected per exchange, and what each output file contains.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use pricecast_core::{
    predict_and_write, CoreError, DatasetError, Diagnostics, DirectoryDataset, ResultsDir,
    RunReport, SkipReason, TradeDate,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn write_table(exchange: &Path, file: &str, stock: &str, days: usize) {
    fs::create_dir_all(exchange).expect("exchange dir");
    let body: String = (0..days)
        .rev()
        .map(|day| {
            let date = TradeDate::parse_day_first("01-03-2024")
                .expect("valid")
                .add_days(day as i64)
                .expect("in range")
                .into_inner();
            format!(
                "{stock},{:02}-{:02}-{},{}.5\n",
                date.day(),
                u8::from(date.month()),
                date.year(),
                100 + day
            )
        })
        .collect();
    fs::write(exchange.join(file), body).expect("write table");
}

fn run(root: &Path, results: &Path, cap: usize, seed: u64) -> Result<RunReport, CoreError> {
    let dataset = DirectoryDataset::open(root)?;
    let results = ResultsDir::new(results);
    let cap = NonZeroUsize::new(cap).expect("non-zero");
    predict_and_write(
        &dataset,
        &results,
        cap,
        &mut StdRng::seed_from_u64(seed),
        Diagnostics::Silent,
    )
}

fn output_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(str::to_owned)
        .collect()
}

// =============================================================================
// Pipeline: File Cap
// =============================================================================

#[test]
fn when_cap_is_smaller_than_exchange_only_cap_files_are_inspected() {
    // Given: Two exchanges with three and one valid tables
    let temp = tempdir().expect("tempdir");
    let root = temp.path().join("data");
    for stock in ["AAA", "BBB", "CCC"] {
        write_table(&root.join("LSE"), &format!("{stock}.csv"), stock, 20);
    }
    write_table(&root.join("NYSE"), "DDD.csv", "DDD", 20);

    // When: The pipeline runs with a cap of two
    let report = run(&root, &temp.path().join("out"), 2, 11).expect("run");

    // Then: Each exchange inspects min(total, cap) entries
    let mut inspected: Vec<(String, usize)> = report
        .exchanges
        .iter()
        .map(|exchange| (exchange.name.clone(), exchange.inspected))
        .collect();
    inspected.sort();
    assert_eq!(
        inspected,
        vec![(String::from("LSE"), 2), (String::from("NYSE"), 1)]
    );
    assert_eq!(report.written.len(), 3);

    let files = fs::read_dir(temp.path().join("out")).expect("results").count();
    assert_eq!(files, 3, "one output file per written series");
}

// =============================================================================
// Pipeline: Rejected Tables
// =============================================================================

#[test]
fn when_tables_are_short_mixed_or_empty_they_produce_no_output() {
    // Given: One valid table next to three that must be rejected
    let temp = tempdir().expect("tempdir");
    let exchange = temp.path().join("data").join("LSE");
    write_table(&exchange, "GOOD.csv", "GOOD", 15);
    write_table(&exchange, "SHORT.csv", "SHORT", 9);
    fs::write(exchange.join("EMPTY.csv"), "").expect("write empty");
    let mixed: String = (1..=12)
        .map(|day| {
            let stock = if day == 6 { "OTHER" } else { "MIX" };
            format!("{stock},{day:02}-04-2024,10.0\n")
        })
        .collect();
    fs::write(exchange.join("MIX.csv"), mixed).expect("write mixed");

    // When: Every file is inspected
    let out = temp.path().join("out");
    let report = run(&temp.path().join("data"), &out, 10, 3).expect("run");

    // Then: Only the valid table is written and the rest are reported
    assert_eq!(report.written.len(), 1);
    assert!(out.join("GOOD.csv").is_file());
    for absent in ["SHORT.csv", "EMPTY.csv", "MIX.csv", "OTHER.csv"] {
        assert!(!out.join(absent).exists(), "{absent} must not be written");
    }
    assert_eq!(report.total_skipped(), 3);
    assert!(report.exchanges[0]
        .skipped
        .iter()
        .all(|skip| matches!(skip.reason, SkipReason::Rejected(_))));
}

#[test]
fn when_a_table_has_garbage_prices_the_run_continues() {
    // Given: A table with a non-numeric price beside a valid one
    let temp = tempdir().expect("tempdir");
    let exchange = temp.path().join("data").join("LSE");
    write_table(&exchange, "GOOD.csv", "GOOD", 12);
    fs::write(exchange.join("BAD.csv"), "BAD,01-01-2024,n/a\n").expect("write bad");

    // When: The pipeline runs
    let report = run(&temp.path().join("data"), &temp.path().join("out"), 5, 8).expect("run");

    // Then: The bad table is skipped as unreadable
    assert_eq!(report.written.len(), 1);
    let skip = &report.exchanges[0].skipped[0];
    assert_eq!(skip.entry, "BAD.csv");
    assert!(matches!(skip.reason, SkipReason::Unreadable { .. }));
}

// =============================================================================
// Pipeline: Output Shape
// =============================================================================

#[test]
fn when_a_series_is_written_it_has_ten_sorted_rows_and_three_predictions() {
    // Given: A table stored newest-first
    let temp = tempdir().expect("tempdir");
    write_table(&temp.path().join("data").join("NYSE"), "ASH.csv", "ASH", 30);

    // When: The pipeline runs
    let out = temp.path().join("out");
    run(&temp.path().join("data"), &out, 1, 21).expect("run");

    // Then: The output holds 13 rows with ascending, consecutive dates
    let lines = output_lines(&out.join("ASH.csv"));
    assert_eq!(lines.len(), 13);
    let dates: Vec<&str> = lines
        .iter()
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 3, "line '{line}'");
            assert_eq!(fields[0], "ASH");
            fields[1]
        })
        .collect();
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));

    let parsed: Vec<TradeDate> = dates
        .iter()
        .map(|date| TradeDate::parse_day_first(date).expect("iso date"))
        .collect();
    for step in 10..13 {
        assert_eq!(parsed[step - 1].days_until(parsed[step]), 1);
    }
}

// =============================================================================
// Pipeline: Results Directory
// =============================================================================

#[test]
fn when_a_run_starts_previous_results_are_replaced() {
    // Given: A results directory holding stale files and a subdirectory
    let temp = tempdir().expect("tempdir");
    write_table(&temp.path().join("data").join("LSE"), "NEW.csv", "NEW", 12);
    let out = temp.path().join("out");
    fs::create_dir_all(out.join("archive")).expect("subdir");
    fs::write(out.join("STALE.csv"), "old").expect("stale");

    // When: The pipeline runs
    run(&temp.path().join("data"), &out, 1, 4).expect("run");

    // Then: Stale files are gone and subdirectories survive
    assert!(!out.join("STALE.csv").exists());
    assert!(out.join("archive").is_dir());
    assert!(out.join("NEW.csv").is_file());
}

#[test]
fn when_dataset_root_is_missing_the_run_fails_before_touching_results() {
    // Given: No dataset root and an existing results file
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("out");
    fs::create_dir_all(&out).expect("results");
    fs::write(out.join("KEEP.csv"), "kept").expect("keep");

    // When: The pipeline is started
    let err = run(&temp.path().join("missing"), &out, 1, 0).expect_err("must fail");

    // Then: The failure is fatal and old results stay
    assert!(matches!(
        err,
        CoreError::Dataset(DatasetError::RootNotFound { .. })
    ));
    assert!(out.join("KEEP.csv").is_file());
}

#[test]
fn when_seed_is_fixed_runs_are_reproducible() {
    // Given: A long table
    let temp = tempdir().expect("tempdir");
    write_table(&temp.path().join("data").join("LSE"), "SEED.csv", "SEED", 200);

    // When: Two runs share the same seed
    let first_out = temp.path().join("first");
    let second_out = temp.path().join("second");
    run(&temp.path().join("data"), &first_out, 1, 99).expect("first run");
    run(&temp.path().join("data"), &second_out, 1, 99).expect("second run");

    // Then: Their outputs match byte for byte
    assert_eq!(
        output_lines(&first_out.join("SEED.csv")),
        output_lines(&second_out.join("SEED.csv"))
    );
}
