//! Declared-type validation and missing-value scanning.

use autoclust_model::{CellValue, Dataset};
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Validate every data column against its declared semantic type.
///
/// Continuous columns (`real scalar`, `real location`) must parse every
/// non-missing cell as a 64-bit float; the first failure names the column
/// and the offending value. Discrete columns are not cast, only their
/// distinct-value count is computed and logged.
pub fn check_data_type(dataset: &Dataset) -> Result<()> {
    info!("Checking data format");
    for (idx, name) in dataset.columns.iter().enumerate() {
        let Some(meta) = dataset.column_meta.get(name) else {
            continue;
        };
        if meta.semantic_type.is_real() {
            let stats = profile_numeric_column(dataset, idx, name)?;
            for line in stats.describe(name) {
                info!("{line}");
            }
            info!("---");
        } else if meta.semantic_type == autoclust_model::SemanticType::Discrete {
            info!(
                "Column '{}': {} different values",
                name,
                dataset.distinct_count(idx)
            );
        }
    }
    Ok(())
}

/// Mark `missing = true` on every column holding at least one missing cell.
///
/// Purely additive: never removes rows or columns, never clears a flag.
pub fn scan_missing_values(dataset: &mut Dataset) {
    info!("Searching for missing values");
    let mut with_missing = Vec::new();
    for (idx, name) in dataset.columns.iter().enumerate() {
        if dataset.column_cells(idx).any(CellValue::is_missing) {
            with_missing.push(name.clone());
        }
    }
    if with_missing.is_empty() {
        info!("No missing values found");
        return;
    }
    for name in &with_missing {
        if let Some(meta) = dataset.column_meta.get_mut(name) {
            meta.missing = true;
        }
        warn!("Missing values found in column: {name}");
    }
}

/// Count/mean/std/min/max of one numeric column, missing cells skipped.
struct NumericProfile {
    count: usize,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
}

impl NumericProfile {
    fn describe(&self, name: &str) -> Vec<String> {
        vec![
            format!("Column '{name}'"),
            format!("count  {}", self.count),
            format!("mean   {:.6}", self.mean),
            format!("std    {:.6}", self.std),
            format!("min    {:.6}", self.min),
            format!("max    {:.6}", self.max),
        ]
    }
}

fn profile_numeric_column(dataset: &Dataset, idx: usize, name: &str) -> Result<NumericProfile> {
    let mut values = Vec::new();
    for cell in dataset.column_cells(idx) {
        match cell {
            CellValue::Missing => {}
            CellValue::Text(raw) => match raw.parse::<f64>() {
                Ok(value) => values.push(value),
                Err(_) => {
                    return Err(IngestError::NumericCast {
                        column: name.to_string(),
                        value: raw.clone(),
                    });
                }
            },
        }
    }
    let count = values.len();
    let mean = if count == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / count as f64
    };
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(NumericProfile {
        count,
        mean,
        std,
        min,
        max,
    })
}
