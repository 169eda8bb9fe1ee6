//! Column-name sanitation and duplicate detection.

use std::collections::BTreeSet;

use crate::error::{IngestError, Result};

/// Replace runs of characters outside `[A-Za-z0-9._+-]` with a single `_`.
///
/// This is the character set the classifier accepts in attribute names.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Names appearing more than once, in first-appearance order.
pub fn find_duplicates(names: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut duplicates = Vec::new();
    for name in names {
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            duplicates.push(name.clone());
        }
    }
    duplicates
}

/// Fail with [`IngestError::DuplicateColumnNames`] when any name repeats.
///
/// The error lists every header name (quoted), matching the rename notices
/// an analyst sees, so the offending file can be fixed in one pass.
pub fn check_unique_names(names: &[String]) -> Result<()> {
    if find_duplicates(names).is_empty() {
        return Ok(());
    }
    Err(IngestError::DuplicateColumnNames {
        names: names.iter().map(|name| format!("'{name}'")).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_runs() {
        assert_eq!(sanitize_name("gene(name)"), "gene_name_");
        assert_eq!(sanitize_name("col[]()/"), "col_");
        assert_eq!(sanitize_name("col\u{e9}\u{e8}\u{e0}"), "col_");
        assert_eq!(sanitize_name("ok.name_1+x-y"), "ok.name_1+x-y");
    }

    #[test]
    fn sanitize_keeps_underscore_between_runs() {
        assert_eq!(sanitize_name("a(_)b"), "a___b");
    }

    #[test]
    fn duplicates_fail_with_all_names_listed() {
        let names: Vec<String> = ["A", "B", "B"].iter().map(|s| s.to_string()).collect();
        let err = check_unique_names(&names).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'A' 'B' 'B'"));
    }

    #[test]
    fn unique_names_pass() {
        let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        assert!(check_unique_names(&names).is_ok());
    }
}
