//! Property tests for name handling and merge shape guarantees.

use proptest::prelude::*;

use autoclust_ingest::{check_unique_names, find_duplicates, merge_datasets, sanitize_name};
use autoclust_model::{CellValue, ColumnMeta, DataRow, Dataset, SemanticType};

fn dataset(prefix: &str, columns: usize, ids: &[String]) -> Dataset {
    let names: Vec<String> = (0..columns).map(|i| format!("{prefix}{i}")).collect();
    let mut ds = Dataset::new(format!("{prefix}.tsv"), "gene", names.clone());
    for name in &names {
        ds.column_meta.insert(
            name.clone(),
            ColumnMeta::new(SemanticType::RealLocation, Some(0.01)),
        );
    }
    for id in ids {
        ds.push_row(DataRow {
            id: id.clone(),
            cells: vec![CellValue::Text("1.0".to_string()); columns],
        })
        .unwrap();
    }
    ds
}

proptest! {
    /// Any list with at least one repeated name is rejected.
    #[test]
    fn repeated_names_always_fail(
        mut names in proptest::collection::vec("[a-z]{1,6}", 1..8),
        dup_index in any::<prop::sample::Index>(),
    ) {
        let dup = names[dup_index.index(names.len())].clone();
        names.push(dup);
        prop_assert!(check_unique_names(&names).is_err());
        prop_assert!(!find_duplicates(&names).is_empty());
    }

    /// Distinct names always pass.
    #[test]
    fn distinct_names_always_pass(
        names in proptest::collection::btree_set("[a-z]{1,6}", 0..8),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        prop_assert!(check_unique_names(&names).is_ok());
    }

    /// Sanitation is idempotent and only emits allowed characters.
    #[test]
    fn sanitize_is_idempotent(name in "\\PC{0,24}") {
        let cleaned = sanitize_name(&name);
        prop_assert_eq!(sanitize_name(&cleaned), cleaned.clone());
        prop_assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
        );
    }

    /// Merging datasets with disjoint identifiers sums row counts, and every
    /// column of every input gains missing cells when both sides are
    /// non-empty.
    #[test]
    fn disjoint_merge_sums_row_counts(rows_a in 1usize..12, rows_b in 1usize..12) {
        let ids_a: Vec<String> = (0..rows_a).map(|i| format!("a{i}")).collect();
        let ids_b: Vec<String> = (0..rows_b).map(|i| format!("b{i}")).collect();
        let a = dataset("colA", 2, &ids_a);
        let b = dataset("colB", 3, &ids_b);

        let merged = merge_datasets(vec![a, b]).unwrap();
        prop_assert_eq!(merged.row_count(), rows_a + rows_b);
        prop_assert_eq!(merged.column_count(), 5);
        for (_, meta) in merged.column_meta.iter() {
            prop_assert!(meta.missing);
        }
    }
}
