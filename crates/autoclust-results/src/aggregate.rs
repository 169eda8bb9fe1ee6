//! Joining classifications back onto the prepared table and deriving
//! the analyst-facing outputs.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use autoclust_model::CellValue;
use tracing::info;

use crate::error::{Result, ResultsError};
use crate::parser::CaseResults;
use crate::table::PreparedTable;

/// Number of spacer rows emitted between class blocks in the cdt matrix.
const CDT_SPACER_ROWS: usize = 5;

/// One classified row: original cells plus the classification columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    /// 1-based row position before the class sort.
    pub position: usize,
    pub id: String,
    pub cells: Vec<CellValue>,
    pub main_class: i64,
    pub main_prob: f64,
    /// Probabilities aligned to [`ClassifiedTable::class_ids`]; `None`
    /// where the case reported nothing for that class.
    pub probs: Vec<Option<f64>>,
}

/// The prepared table joined with its classifications, rows ordered by
/// `(main_class ascending, main_prob descending)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTable {
    pub row_id_name: String,
    pub experiment_names: Vec<String>,
    /// Distinct class ids, ascending.
    pub class_ids: Vec<i64>,
    pub rows: Vec<ClassifiedRow>,
}

impl ClassifiedTable {
    /// Rows assigned to one class, in their sorted order.
    fn class_rows(&self, class_id: i64) -> impl Iterator<Item = &ClassifiedRow> {
        self.rows.iter().filter(move |row| row.main_class == class_id)
    }
}

/// Join classifications onto the prepared table by row position.
///
/// Both sequences are in the case order the classifier was given, so
/// identifiers attach positionally. The joined rows are then stable-sorted
/// by `(main_class ascending, main_prob descending)`; ties keep their
/// pre-sort relative order.
pub fn aggregate(table: &PreparedTable, results: &CaseResults) -> Result<ClassifiedTable> {
    if results.case_count() != table.row_count() {
        return Err(ResultsError::ShapeMismatch {
            cases: results.case_count(),
            rows: table.row_count(),
        });
    }

    let mut rows: Vec<ClassifiedRow> = table
        .ids
        .iter()
        .zip(&table.rows)
        .zip(&results.cases)
        .enumerate()
        .map(|(idx, ((id, cells), case))| ClassifiedRow {
            position: idx + 1,
            id: id.clone(),
            cells: cells.clone(),
            main_class: case.main_class,
            main_prob: case.main_prob,
            probs: results
                .class_ids
                .iter()
                .map(|class_id| case.probs.get(class_id).copied())
                .collect(),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.main_class
            .cmp(&b.main_class)
            .then(b.main_prob.total_cmp(&a.main_prob))
    });

    Ok(ClassifiedTable {
        row_id_name: table.row_id_name.clone(),
        experiment_names: table.experiment_names.clone(),
        class_ids: results.class_ids.clone(),
        rows,
    })
}

/// Write the `.cdt` visualization matrix.
///
/// One block of rows per class in ascending class order; each row's
/// synthetic GID combines its 1-based pre-sort position with the 1-based
/// class number, and each block is followed by a fixed number of spacer
/// rows carrying no data, used purely for rendering separation.
pub fn write_cdt(table: &ClassifiedTable, path: &Path, with_probs: bool) -> Result<()> {
    if with_probs {
        info!("Writing {} file (with probs)", path.display());
    } else {
        info!("Writing {} file", path.display());
    }

    let mut content = String::new();
    content.push_str("GID\tUNIQID\tNAME\tGWEIGHT");
    for name in &table.experiment_names {
        content.push('\t');
        content.push_str(name);
    }
    if with_probs {
        for class_id in &table.class_ids {
            let _ = write!(content, "\tprob-class-{class_id}");
        }
    }
    content.push('\n');

    content.push_str("EWEIGHT\t\t\t");
    for _ in &table.experiment_names {
        content.push_str("\t1");
    }
    if with_probs {
        for _ in &table.class_ids {
            content.push_str("\t1");
        }
    }
    content.push('\n');

    for &class_id in &table.class_ids {
        for row in table.class_rows(class_id) {
            let _ = write!(
                content,
                "GENE{:04}-CL{:03}X\t{}\t{}\t1",
                row.position,
                row.main_class + 1,
                row.id,
                row.id
            );
            for cell in &row.cells {
                content.push('\t');
                content.push_str(cell.as_text().unwrap_or(""));
            }
            if with_probs {
                for prob in &row.probs {
                    content.push('\t');
                    if let Some(p) = prob {
                        let _ = write!(content, "{p}");
                    }
                }
            }
            content.push('\n');
        }
        for spacer in 1..=CDT_SPACER_ROWS {
            let _ = writeln!(content, "GENE{spacer:04}-{class_id:03}S");
        }
    }

    write_output(path, &content)
}

/// Write the per-cluster mean/standard-deviation summary.
///
/// For each class id in ascending order, one row of per-experiment-column
/// means and one of sample standard deviations (n-1). Cells that do not
/// parse as numbers are skipped; a column with no numeric value in a class
/// (or a single value, for the deviation) renders empty.
pub fn write_cluster_stats(table: &ClassifiedTable, path: &Path) -> Result<()> {
    info!("Writing cluster statistics file {}", path.display());

    let mut content = String::new();
    content.push_str("cluster");
    for name in &table.experiment_names {
        content.push('\t');
        content.push_str(name);
    }
    content.push('\n');

    for &class_id in &table.class_ids {
        let mut mean_row = format!("cluster{class_id:03}mean");
        let mut std_row = format!("cluster{class_id:03}std");
        for col in 0..table.experiment_names.len() {
            let values: Vec<f64> = table
                .class_rows(class_id)
                .filter_map(|row| row.cells[col].parse_f64())
                .collect();
            mean_row.push('\t');
            std_row.push('\t');
            if let Some(mean) = mean(&values) {
                let _ = write!(mean_row, "{mean:.3}");
                if let Some(std) = sample_std(&values, mean) {
                    let _ = write!(std_row, "{std:.3}");
                }
            }
        }
        content.push_str(&mean_row);
        content.push('\n');
        content.push_str(&std_row);
        content.push('\n');
    }

    write_output(path, &content)
}

/// Copy result files into a timestamped export directory next to `parent`.
///
/// Returns the created directory. Files that do not exist are skipped.
pub fn export_results(parent: &Path, files: &[PathBuf]) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let export_dir = parent.join(format!("{stamp}-autoclust"));
    fs::create_dir_all(&export_dir).map_err(|source| ResultsError::Io {
        path: export_dir.clone(),
        source,
    })?;
    for file in files {
        if !file.exists() {
            continue;
        }
        let Some(name) = file.file_name() else {
            continue;
        };
        let target = export_dir.join(name);
        fs::copy(file, &target).map_err(|source| ResultsError::Io {
            path: target.clone(),
            source,
        })?;
    }
    info!("Results exported to {}", export_dir.display());
    Ok(export_dir)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_handle_degenerate_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0]), Some(2.0));
        assert_eq!(sample_std(&[2.0], 2.0), None);
        let values = [1.0, 5.0];
        let m = mean(&values).unwrap();
        assert_eq!(m, 3.0);
        let s = sample_std(&values, m).unwrap();
        assert!((s - 8.0_f64.sqrt()).abs() < 1e-12);
    }
}
