//! Artifact composition and writing.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use autoclust_model::{CellValue, Dataset, SemanticType};
use tracing::{debug, info};

use crate::error::{DescriptorError, Result};
use crate::params::SearchParams;

/// Default marker rendered for missing cells in the data file.
pub const DEFAULT_MISSING_MARKER: &str = "?";

/// Writes the classifier's input artifact family under one root name.
///
/// `root` is the common stem: a root of `work/clust` yields `work/clust.db2`,
/// `work/clust.hd2` and so on. Artifacts are deterministic byte-for-byte for
/// identical input and parameters, and each one is written in a single step.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
    separator: char,
    missing: String,
}

impl ArtifactWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            separator: '\t',
            missing: DEFAULT_MISSING_MARKER.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_missing(mut self, missing: impl Into<String>) -> Self {
        self.missing = missing.into();
        self
    }

    /// Path of the artifact with the given extension appended to the root.
    pub fn artifact_path(&self, extension: &str) -> PathBuf {
        let mut name = self.root.clone().into_os_string();
        name.push(format!(".{extension}"));
        name.into()
    }

    /// Write the `.db2` data file and its `.tsv` companion.
    ///
    /// The data file is header-less, separator-joined, identifier first,
    /// missing cells rendered with the configured marker. The companion is
    /// tab-separated with a header row and empty missing cells; it is the
    /// file the aggregation stage reloads after classification.
    pub fn write_data_file(&self, dataset: &Dataset) -> Result<PathBuf> {
        let db2_path = self.artifact_path("db2");
        let tsv_path = self.artifact_path("tsv");
        info!("Writing {} file", db2_path.display());
        info!(
            "If any, missing values will be encoded as '{}'",
            self.missing
        );

        let mut db2 = String::new();
        for row in &dataset.rows {
            db2.push_str(&row.id);
            for cell in &row.cells {
                db2.push(self.separator);
                db2.push_str(self.render_cell(cell));
            }
            db2.push('\n');
        }
        write_artifact(&db2_path, &db2)?;

        debug!("Writing {} file [for later use]", tsv_path.display());
        let mut tsv = String::new();
        tsv.push_str(&dataset.row_id_name);
        for name in &dataset.columns {
            tsv.push('\t');
            tsv.push_str(name);
        }
        tsv.push('\n');
        for row in &dataset.rows {
            tsv.push_str(&row.id);
            for cell in &row.cells {
                tsv.push('\t');
                tsv.push_str(cell.as_text().unwrap_or(""));
            }
            tsv.push('\n');
        }
        write_artifact(&tsv_path, &tsv)?;
        Ok(db2_path)
    }

    /// Write the `.hd2` attribute descriptor.
    ///
    /// Attribute 0 is always the identifier pseudo-column; data columns are
    /// 1-indexed in table order. `real scalar` columns carry the fixed 0.0
    /// zero-point, so their observed minimum must not be negative.
    pub fn write_attribute_file(&self, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.artifact_path("hd2");
        info!("Writing .hd2 file");

        let mut content = String::new();
        content.push_str("num_db2_format_defs 2\n");
        content.push('\n');
        content.push_str(&format!(
            "number_of_attributes {}\n",
            dataset.column_count() + 1
        ));
        content.push_str(&format!("separator_char '{}'\n", self.separator));
        content.push('\n');
        content.push_str(&format!("0 dummy nil \"{}\"\n", dataset.row_id_name));
        for (idx, name) in dataset.columns.iter().enumerate() {
            let meta =
                dataset
                    .column_meta
                    .get(name)
                    .ok_or_else(|| DescriptorError::MissingMeta {
                        column: name.clone(),
                    })?;
            match meta.semantic_type {
                SemanticType::RealScalar => {
                    if let Some(min) = dataset.numeric_min(idx) {
                        if min < 0.0 {
                            return Err(DescriptorError::InvalidRange {
                                column: name.clone(),
                                min,
                            });
                        }
                    }
                    let _ = writeln!(
                        content,
                        "{} real scalar \"{}\" zero_point 0.0 rel_error {}",
                        idx + 1,
                        name,
                        meta.error.unwrap_or(0.01)
                    );
                }
                SemanticType::RealLocation => {
                    let _ = writeln!(
                        content,
                        "{} real location \"{}\" error {}",
                        idx + 1,
                        name,
                        meta.error.unwrap_or(0.01)
                    );
                }
                SemanticType::Discrete => {
                    let _ = writeln!(
                        content,
                        "{} discrete nominal \"{}\" range {}",
                        idx + 1,
                        name,
                        dataset.distinct_count(idx)
                    );
                }
                SemanticType::Merged => {
                    return Err(DescriptorError::MissingMeta {
                        column: name.clone(),
                    });
                }
            }
        }
        write_artifact(&path, &content)?;
        Ok(path)
    }

    /// Write the `.model` statistical model descriptor.
    ///
    /// Data columns partition into at most three model groups: real-valued
    /// without missing data, real-valued with missing data, and discrete.
    /// The declared model count is the number of non-empty groups plus one
    /// for the ignored identifier column.
    pub fn write_model_file(&self, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.artifact_path("model");
        info!("Writing .model file");

        let mut real_values_normals: Vec<String> = Vec::new();
        let mut real_values_missing: Vec<String> = Vec::new();
        let mut multinomial_values: Vec<String> = Vec::new();
        for (idx, name) in dataset.columns.iter().enumerate() {
            let meta =
                dataset
                    .column_meta
                    .get(name)
                    .ok_or_else(|| DescriptorError::MissingMeta {
                        column: name.clone(),
                    })?;
            let index = (idx + 1).to_string();
            match meta.semantic_type {
                SemanticType::RealScalar | SemanticType::RealLocation => {
                    if meta.missing {
                        real_values_missing.push(index);
                    } else {
                        real_values_normals.push(index);
                    }
                }
                SemanticType::Discrete => multinomial_values.push(index),
                SemanticType::Merged => {
                    return Err(DescriptorError::MissingMeta {
                        column: name.clone(),
                    });
                }
            }
        }

        // The identifier column's label model is always present.
        let groups = [
            ("single_normal_cn", &real_values_normals),
            ("single_normal_cm", &real_values_missing),
            ("single_multinomial", &multinomial_values),
        ];
        let models_count = 1 + groups.iter().filter(|(_, cols)| !cols.is_empty()).count();

        let mut content = String::new();
        content.push_str(&format!("model_index 0 {models_count}\n"));
        content.push_str("ignore 0\n");
        for (directive, columns) in groups {
            if !columns.is_empty() {
                content.push_str(&format!("{directive} {}\n", columns.join(" ")));
            }
        }
        write_artifact(&path, &content)?;
        Ok(path)
    }

    /// Write the `.s-params` search-parameter file.
    ///
    /// The trailing spaces on the three fixed flag lines are part of the
    /// classifier's expected file layout.
    pub fn write_search_params(&self, params: &SearchParams) -> Result<PathBuf> {
        let path = self.artifact_path("s-params");
        info!("Writing .s-params file");

        let mut content = String::new();
        content.push_str("screen_output_p = false \n");
        content.push_str("break_on_warnings_p = false \n");
        content.push_str("force_new_search_p = true \n");
        content.push_str(&format!("max_duration = {}\n", params.max_duration));
        content.push_str(&format!("max_n_tries = {}\n", params.max_n_tries));
        content.push_str(&format!("max_cycles = {}\n", params.max_cycles));
        let starters: Vec<String> = params.start_j_list.iter().map(u32::to_string).collect();
        content.push_str(&format!("start_j_list = {}\n", starters.join(", ")));
        if params.reproducible {
            content.push_str("randomize_random_p = false\n");
            content.push_str("start_fn_type = \"block\"\n");
            content.push_str(&format!(
                "min_report_period = {}\n",
                params.max_duration * 2
            ));
        }
        write_artifact(&path, &content)?;
        Ok(path)
    }

    /// Write the `.r-params` report-parameter file.
    pub fn write_report_params(&self) -> Result<PathBuf> {
        let path = self.artifact_path("r-params");
        info!("Writing .r-params file");

        let mut content = String::new();
        content.push_str("xref_class_report_att_list = 0, 1, 2 \n");
        content.push_str("report_mode = \"data\" \n");
        content.push_str("comment_data_headers_p = true \n");
        write_artifact(&path, &content)?;
        Ok(path)
    }

    /// Concatenate the generated parameter files for debug display.
    pub fn concat_param_files(&self) -> String {
        let mut content = String::new();
        for extension in ["hd2", "model", "s-params", "r-params"] {
            let path = self.artifact_path(extension);
            if let Ok(text) = fs::read_to_string(&path) {
                content.push('\n');
                content.push_str(&"-".repeat(80));
                content.push('\n');
                content.push_str(&format!("{}\n", path.display()));
                content.push_str(&"-".repeat(80));
                content.push('\n');
                content.push_str(&text);
            }
        }
        content
    }

    fn render_cell<'a>(&'a self, cell: &'a CellValue) -> &'a str {
        match cell {
            CellValue::Text(value) => value,
            CellValue::Missing => &self.missing,
        }
    }
}

fn write_artifact(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })
}
