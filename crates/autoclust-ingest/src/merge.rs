//! Outer-union merge of several datasets into one row-aligned table.

use std::collections::{HashMap, HashSet};

use autoclust_model::{CellValue, DataRow, Dataset};
use tracing::info;

use crate::error::{IngestError, Result};
use crate::names::check_unique_names;
use crate::validate::scan_missing_values;

/// Combine datasets into one table via an outer union on row identifier.
///
/// One uniform algorithm covers every input count; a single dataset is the
/// degenerate case and comes back structurally identical. Row identifiers
/// keep first-seen order across inputs; a row absent from an input
/// contributes missing cells for that input's columns. Merged column order
/// is the concatenation of the inputs' column orders. Metadata merges by
/// union with last-write-wins per name, but a name collision in the final
/// header is always a hard error.
pub fn merge_datasets(datasets: Vec<Dataset>) -> Result<Dataset> {
    if datasets.is_empty() {
        return Err(IngestError::NoInputDatasets);
    }
    info!("Preparing input data");

    // Row identifiers in first-seen order.
    let mut id_order: Vec<String> = Vec::new();
    let mut id_seen: HashSet<String> = HashSet::new();
    for dataset in &datasets {
        for row in &dataset.rows {
            if id_seen.insert(row.id.clone()) {
                id_order.push(row.id.clone());
            }
        }
    }

    // Column order is the concatenation of input column orders; metadata
    // merges by union, later inputs winning per name.
    let mut columns: Vec<String> = Vec::new();
    let mut merged = Dataset::new("", datasets[0].row_id_name.clone(), Vec::new());
    for dataset in &datasets {
        columns.extend(dataset.columns.iter().cloned());
        merged.column_meta.extend(&dataset.column_meta);
    }
    // The metadata union above silently overwrites on collision; the final
    // header check keeps a collision from ever passing unnoticed.
    check_unique_names(&columns)?;
    merged.columns = columns;

    // Per-dataset row lookup by identifier.
    let lookups: Vec<HashMap<&str, &DataRow>> = datasets
        .iter()
        .map(|dataset| {
            dataset
                .rows
                .iter()
                .map(|row| (row.id.as_str(), row))
                .collect()
        })
        .collect();

    for id in &id_order {
        let mut cells = Vec::with_capacity(merged.columns.len());
        for (dataset, lookup) in datasets.iter().zip(&lookups) {
            match lookup.get(id.as_str()) {
                Some(row) => cells.extend(row.cells.iter().cloned()),
                None => cells.extend(std::iter::repeat_n(
                    CellValue::Missing,
                    dataset.column_count(),
                )),
            }
        }
        merged
            .push_row(DataRow {
                id: id.clone(),
                cells,
            })
            .map_err(|e| IngestError::CsvParse {
                path: merged.source.clone(),
                message: e.to_string(),
            })?;
    }

    info!(
        "Final table has {} lines and {} columns",
        merged.row_count(),
        merged.column_count() + 1
    );
    scan_missing_values(&mut merged);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoclust_model::{ColumnMeta, SemanticType};

    fn dataset(name: &str, columns: &[&str], rows: Vec<(&str, Vec<&str>)>) -> Dataset {
        let mut ds = Dataset::new(
            format!("{name}.tsv"),
            "gene",
            columns.iter().map(|c| c.to_string()).collect(),
        );
        for column in columns {
            ds.column_meta.insert(
                column.to_string(),
                ColumnMeta::new(SemanticType::RealLocation, Some(0.01)),
            );
        }
        for (id, cells) in rows {
            ds.push_row(DataRow {
                id: id.to_string(),
                cells: cells.iter().map(|raw| CellValue::from_raw(raw, "")).collect(),
            })
            .unwrap();
        }
        ds
    }

    #[test]
    fn single_input_is_identity() {
        let input = dataset("a", &["colA", "colB"], vec![
            ("g1", vec!["1.0", "2.0"]),
            ("g2", vec!["3.0", "4.0"]),
        ]);
        let merged = merge_datasets(vec![input.clone()]).unwrap();
        assert_eq!(merged.columns, input.columns);
        assert_eq!(merged.rows, input.rows);
        assert_eq!(merged.column_meta, input.column_meta);
        assert_eq!(merged.row_id_name, input.row_id_name);
    }

    #[test]
    fn disjoint_identifiers_sum_rows_and_fill_missing() {
        let a = dataset("a", &["colA"], vec![("g1", vec!["1.0"]), ("g2", vec!["2.0"])]);
        let b = dataset("b", &["colB"], vec![("g3", vec!["3.0"]), ("g4", vec!["4.0"])]);
        let merged = merge_datasets(vec![a, b]).unwrap();

        assert_eq!(merged.row_count(), 4);
        assert_eq!(merged.columns, vec!["colA", "colB"]);
        // g1 has no colB value, g3 has no colA value.
        assert_eq!(merged.rows[0].cells[1], CellValue::Missing);
        assert_eq!(merged.rows[2].cells[0], CellValue::Missing);
        assert!(merged.column_meta.get("colA").unwrap().missing);
        assert!(merged.column_meta.get("colB").unwrap().missing);
    }

    #[test]
    fn shared_identifiers_align_rows() {
        let a = dataset("a", &["colA"], vec![("g1", vec!["1.0"]), ("g2", vec!["2.0"])]);
        let b = dataset("b", &["colB"], vec![("g2", vec!["20.0"]), ("g1", vec!["10.0"])]);
        let merged = merge_datasets(vec![a, b]).unwrap();

        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.rows[0].id, "g1");
        assert_eq!(merged.rows[0].cells, vec![
            CellValue::Text("1.0".to_string()),
            CellValue::Text("10.0".to_string()),
        ]);
        assert!(!merged.column_meta.get("colA").unwrap().missing);
    }

    #[test]
    fn column_collision_is_a_hard_error() {
        let a = dataset("a", &["colA"], vec![("g1", vec!["1.0"])]);
        let b = dataset("b", &["colA"], vec![("g1", vec!["2.0"])]);
        let err = merge_datasets(vec![a, b]).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateColumnNames { .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            merge_datasets(Vec::new()),
            Err(IngestError::NoInputDatasets)
        ));
    }
}
