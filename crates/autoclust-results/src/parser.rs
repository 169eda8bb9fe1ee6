//! Case-classification output parsing.
//!
//! The classifier's report is line-oriented: `#`-prefixed and `DATA`-prefixed
//! lines are structural, every other non-empty line is one case record of
//! the form `caseId classId1 prob1 [classId2 prob2 ...]`, where the first
//! pair is the case's most probable class. A case need not report a
//! probability for every class, so the per-case distribution is sparse.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, ResultsError};

/// One case's classification: most probable class plus the sparse
/// distribution over all reported classes.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClassification {
    pub case_id: u32,
    pub main_class: i64,
    pub main_prob: f64,
    /// Sparse class-id to probability mapping, first pair included.
    pub probs: BTreeMap<i64, f64>,
}

/// All parsed case records plus the global class enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResults {
    pub cases: Vec<CaseClassification>,
    /// Distinct class ids seen anywhere in the report, ascending.
    pub class_ids: Vec<i64>,
}

impl CaseResults {
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn class_count(&self) -> usize {
        self.class_ids.len()
    }
}

/// Read and parse a case-classification report file.
pub fn read_case_results(path: &Path) -> Result<CaseResults> {
    if !path.exists() {
        return Err(ResultsError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| ResultsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_case_results(&text)
}

/// Parse a case-classification report.
///
/// Two passes over the text: the first determines the case count and the
/// set of distinct class ids across all pairs; the second fills the
/// per-case distributions. Parsing has no hidden state, so parsing the
/// same text twice yields identical results.
pub fn parse_case_results(text: &str) -> Result<CaseResults> {
    info!("Extracting classification results");

    // Pass one: case count and global class enumeration.
    let mut case_count = 0usize;
    let mut classes: BTreeSet<i64> = BTreeSet::new();
    for (line_number, line) in case_records(text) {
        case_count += 1;
        for (class_id, _prob) in record_pairs(line_number, line)? {
            classes.insert(class_id);
        }
    }
    let class_ids: Vec<i64> = classes.into_iter().collect();
    info!(
        "Found {} cases classified in {} classes",
        case_count,
        class_ids.len()
    );

    // Pass two: per-case distributions.
    let mut cases = Vec::with_capacity(case_count);
    for (line_number, line) in case_records(text) {
        let mut tokens = line.split_whitespace();
        let case_token = tokens.next().unwrap_or_default();
        let case_id: u32 =
            case_token
                .parse()
                .map_err(|_| ResultsError::MalformedRecord {
                    line_number,
                    line: line.to_string(),
                })?;
        let pairs = record_pairs(line_number, line)?;
        let (main_class, main_prob) = pairs[0];
        let probs: BTreeMap<i64, f64> = pairs.into_iter().collect();
        cases.push(CaseClassification {
            case_id,
            main_class,
            main_prob,
            probs,
        });
    }

    Ok(CaseResults { cases, class_ids })
}

/// Case-record lines with their 1-based line numbers; structural lines
/// (`#`, `DATA`) and blank lines are skipped.
fn case_records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| {
            !line.is_empty() && !line.starts_with('#') && !line.starts_with("DATA")
        })
}

/// The `(classId, probability)` pairs of one record, first pair first.
///
/// A record needs at least one full pair after the case id; a dangling
/// class id without a probability or any unparseable numeric token is
/// malformed.
fn record_pairs(line_number: usize, line: &str) -> Result<Vec<(i64, f64)>> {
    let malformed = || ResultsError::MalformedRecord {
        line_number,
        line: line.to_string(),
    };
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 || tokens.len() % 2 == 0 {
        return Err(malformed());
    }
    let mut pairs = Vec::with_capacity((tokens.len() - 1) / 2);
    for pair in tokens[1..].chunks(2) {
        let class_id: i64 = pair[0].parse().map_err(|_| malformed())?;
        let prob: f64 = pair[1].parse().map_err(|_| malformed())?;
        pairs.push((class_id, prob));
    }
    Ok(pairs)
}
