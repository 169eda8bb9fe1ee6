//! Serialization round-trips for the core model types.

use autoclust_model::{CellValue, ColumnMeta, DataRow, Dataset, SemanticType};

fn sample() -> Dataset {
    let mut ds = Dataset::new(
        "sample.tsv",
        "gene",
        vec!["colA".to_string(), "colB".to_string()],
    );
    ds.column_meta
        .insert("colA", ColumnMeta::new(SemanticType::RealScalar, Some(0.01)));
    let mut col_b = ColumnMeta::new(SemanticType::Discrete, None);
    col_b.missing = true;
    ds.column_meta.insert("colB", col_b);
    ds.push_row(DataRow {
        id: "g1".to_string(),
        cells: vec![CellValue::Text("1.5".to_string()), CellValue::Missing],
    })
    .unwrap();
    ds
}

#[test]
fn cell_value_serializes_tagged() {
    let text = serde_json::to_string(&CellValue::Text("1.5".to_string())).unwrap();
    assert_eq!(text, r#"{"kind":"Text","value":"1.5"}"#);
    let missing = serde_json::to_string(&CellValue::Missing).unwrap();
    assert_eq!(missing, r#"{"kind":"Missing"}"#);
}

#[test]
fn semantic_type_serializes_snake_case() {
    let json = serde_json::to_string(&SemanticType::RealLocation).unwrap();
    assert_eq!(json, r#""real_location""#);
}

#[test]
fn dataset_round_trips_through_json() {
    let ds = sample();
    let json = serde_json::to_string(&ds).unwrap();
    let back: Dataset = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ds);
}
