//! Integration tests for table loading.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use autoclust_ingest::{IngestError, LoadOptions, load_dataset};
use autoclust_model::{CellValue, SemanticType};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

/// 10 rows, identifier plus three real-valued columns.
fn sample_real_location(dir: &TempDir) -> PathBuf {
    let mut content = String::from("gene\tcolA\tcolB\tcolC\n");
    for i in 0..10 {
        content.push_str(&format!("g{i}\t{}.5\t{i}.0\t0.{i}\n", i + 1));
    }
    write_file(dir, "sample-real-location.tsv", &content)
}

#[test]
fn loads_ten_rows_and_three_columns() {
    let dir = TempDir::new().unwrap();
    let path = sample_real_location(&dir);
    let ds = load_dataset(&path, &LoadOptions::new(SemanticType::RealLocation)).unwrap();

    assert_eq!(ds.row_count(), 10);
    assert_eq!(ds.columns, vec!["colA", "colB", "colC"]);
    assert_eq!(ds.row_id_name, "gene");
    for (_, meta) in ds.column_meta.iter() {
        assert_eq!(meta.semantic_type, SemanticType::RealLocation);
        assert_eq!(meta.error, Some(0.01));
        assert!(!meta.missing);
    }
}

#[test]
fn missing_file_is_reported_before_any_parse() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-file.tsv");
    let err = load_dataset(&path, &LoadOptions::new(SemanticType::Discrete)).unwrap_err();
    assert!(matches!(err, IngestError::MissingInputFile { .. }));
}

#[test]
fn duplicate_header_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "dup.tsv", "gene\tcolA\tcolA\ng1\t1\t2\n");
    let err = load_dataset(&path, &LoadOptions::new(SemanticType::RealLocation)).unwrap_err();
    match err {
        IngestError::DuplicateColumnNames { names } => {
            assert!(names.contains(&"'colA'".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn column_names_are_sanitized() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "names.tsv",
        "gene(name)\tcol\u{e9}\u{e8}\u{e0}\tok.col\ng1\t1.0\t2.0\n",
    );
    let ds = load_dataset(&path, &LoadOptions::new(SemanticType::RealLocation)).unwrap();

    assert_eq!(ds.row_id_name, "gene_name_");
    assert_eq!(ds.columns, vec!["col_", "ok.col"]);
    assert!(ds.column_meta.get("col_").is_some());
}

#[test]
fn non_numeric_value_in_real_column_names_the_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "discrete-as-real.tsv",
        "gene\tcolD\ng1\ton\ng2\toff\n",
    );
    let err = load_dataset(&path, &LoadOptions::new(SemanticType::RealLocation)).unwrap_err();
    match err {
        IngestError::NumericCast { column, value } => {
            assert_eq!(column, "colD");
            assert_eq!(value, "on");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discrete_columns_accept_text() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "discrete.tsv", "gene\tcolD\ng1\ton\ng2\toff\n");
    let ds = load_dataset(&path, &LoadOptions::new(SemanticType::Discrete)).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.distinct_count(0), 2);
}

#[test]
fn missing_marker_and_empty_cells_load_as_missing() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "missing.tsv",
        "gene\tcolI\tcolJ\ng1\tNA\t1.0\ng2\t\t2.0\ng3\t3.0\t4.0\n",
    );
    let options = LoadOptions::new(SemanticType::RealLocation).with_missing("NA");
    let ds = load_dataset(&path, &options).unwrap();

    assert_eq!(ds.rows[0].cells[0], CellValue::Missing);
    assert_eq!(ds.rows[1].cells[0], CellValue::Missing);
    assert!(ds.column_meta.get("colI").unwrap().missing);
    assert!(!ds.column_meta.get("colJ").unwrap().missing);
}

#[test]
fn windows_1252_input_is_decoded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin.tsv");
    // 'é' encoded as windows-1252 (0xE9) in a column name.
    std::fs::write(&path, b"gene\tcol\xe9\ng1\t1.0\n").unwrap();
    let ds = load_dataset(&path, &LoadOptions::new(SemanticType::RealLocation)).unwrap();
    // decoded then sanitized
    assert_eq!(ds.columns, vec!["col_"]);
}

#[test]
fn comma_separated_input_is_supported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "comma.csv", "gene,colA\ng1,1.0\ng2,2.0\n");
    let options = LoadOptions::new(SemanticType::RealScalar).with_separator(b',');
    let ds = load_dataset(&path, &options).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.columns, vec!["colA"]);
}
