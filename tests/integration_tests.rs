use clap::Parser;
use sankey_snippets::core::{ColumnSelection, ConfigProvider, FlowSource};
use sankey_snippets::{CliConfig, CsvLoader, SankeyEngine, SankeyError, SankeyPipeline};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(csv: &Path, args: &[&str]) -> sankey_snippets::Result<String> {
    let mut argv = vec!["sankey-snippets", csv.to_str().unwrap()];
    argv.extend_from_slice(args);
    let config = CliConfig::try_parse_from(argv).unwrap();

    let loader = CsvLoader::new(config.csv_path(), config.columns());
    let pipeline = SankeyPipeline::new(loader, config);
    SankeyEngine::new(pipeline).run()
}

#[test]
fn test_loader_returns_every_row_in_order() {
    let csv = write_csv("source,target,value\nWages,Budget,1500\nBudget,Rent,800\nBudget,Food,300.50\nBudget,Savings,399.5\n");

    let table = CsvLoader::new(csv.path(), ColumnSelection::default()).load().unwrap();

    assert_eq!(table.records.len(), 4);
    assert_eq!(table.records[0].source, "Wages");
    assert_eq!(table.records[3].target, "Savings");
    assert_eq!(table.path.as_deref(), Some(csv.path()));
}

#[test]
fn test_sankeymatic_edges() {
    let csv = write_csv("source,target,value\nA,B,10\nB,C,5\n");

    let out = run(csv.path(), &["--output", "sankeymatic"]).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.contains(&"A [10] B"));
    assert!(lines.contains(&"B [5] C"));
}

#[test]
fn test_all_contains_every_dialect() {
    let csv = write_csv("source,target,value\nA,B,10\nB,C,5\n");

    let out = run(csv.path(), &["--output", "all"]).unwrap();

    assert!(out.contains("import plotly.graph_objects as go"));
    assert!(out.contains("library(networkD3)"));
    assert!(out.contains("A [10] B"));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let csv = write_csv("source,target,value\nCoal,Power,10\nGas,Power,4.25\nPower,Homes,9\nPower,Industry,5.25\nCoal,Power,1\n");

    let first = run(csv.path(), &["--output", "all"]).unwrap();
    let second = run(csv.path(), &["--output", "all"]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_duplicates_are_summed_without_losing_precision() {
    let csv = write_csv("source,target,value\nA,B,1.25\nA,B,2\n");

    let out = run(csv.path(), &["--output", "sankeymatic"]).unwrap();

    assert!(out.lines().any(|l| l == "A [3.25] B"));
}

#[test]
fn test_empty_value_fails_with_parse_error() {
    let csv = write_csv("source,target,value\nA,B,\n");

    let err = run(csv.path(), &["--output", "sankeymatic"]).unwrap_err();

    assert!(matches!(err, SankeyError::ParseError { line: 2, .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_file_fails_with_file_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");

    let err = run(&missing, &["--output", "all"]).unwrap_err();

    assert!(matches!(err, SankeyError::FileError { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_color_file_is_applied() {
    let csv = write_csv("source,target,value\nCoal,Power,10\n");
    let mut colors = NamedTempFile::new().unwrap();
    writeln!(
        colors,
        "[nodes]\nCoal = \"#444444\"\n\n[[flows]]\nsource = \"Coal\"\ntarget = \"Power\"\ncolor = \"#ff0000\""
    )
    .unwrap();

    let out = run(
        csv.path(),
        &[
            "--output",
            "sankeymatic",
            "--no-auto-colors",
            "--colors",
            colors.path().to_str().unwrap(),
        ],
    )
    .unwrap();

    assert!(out.lines().any(|l| l == "Coal [10] Power #ff0000"));
    assert!(out.lines().any(|l| l == ":Coal #444444"));
    assert!(!out.lines().any(|l| l.starts_with(":Power")));
}

#[test]
fn test_named_columns_and_file_mode() {
    let csv = write_csv("Engine,Weight,Species\nV8,12.5,Cod\nV6,3,Haddock\n");

    let out = run(
        csv.path(),
        &[
            "--output",
            "r",
            "--source-col",
            "Engine",
            "--target-col",
            "Species",
            "--value-col",
            "Weight",
            "--data-mode",
            "file",
        ],
    )
    .unwrap();

    assert!(out.contains(r#"source_col <- "Engine""#));
    assert!(out.contains(r#"value_col <- "Weight""#));
    assert!(out.contains("read_csv("));
}

#[test]
fn test_unnamed_columns_without_flags_pick_free_positions() {
    let csv = write_csv("Engine,Weight,Species\nV8,12,Cod\n");

    let out = run(csv.path(), &["--output", "sankeymatic"]).unwrap();

    assert!(out.lines().any(|l| l == "V8 [12] Cod"));
}

#[test]
fn test_bracketed_label_is_rejected_for_sankeymatic_but_not_python() {
    let csv = write_csv("source,target,value\nPlant [old],Grid,4\n");

    let err = run(csv.path(), &["--output", "sankeymatic"]).unwrap_err();
    assert!(matches!(err, SankeyError::UnsupportedLabel { .. }));
    assert_eq!(err.exit_code(), 2);

    let out = run(csv.path(), &["--output", "python"]).unwrap();
    assert!(out.contains("\"Plant [old]\""));
}

#[test]
fn test_sums_keep_digits_beyond_f64() {
    let csv = write_csv("source,target,value\nA,B,0.1234567890123456789\nA,B,1\n");

    let out = run(csv.path(), &["--output", "sankeymatic"]).unwrap();

    assert!(out.lines().any(|l| l == "A [1.1234567890123456789] B"));
}
