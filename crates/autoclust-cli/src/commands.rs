//! Command implementations: stage-sequenced prepare and report pipelines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use tracing::{info, info_span};

use autoclust_descriptor::{ArtifactWriter, SearchParams};
use autoclust_ingest::{LoadOptions, load_dataset, merge_datasets};
use autoclust_results::{
    aggregate, export_results, load_prepared_table, read_case_results, write_cdt,
    write_cluster_stats,
};
use autoclust_run::{autoclass_version, find_autoclass, write_run_script};

use autoclust_cli::pipeline::{StageController, StageOutcome};

use crate::cli::{PrepareArgs, ReportArgs};

/// Stage outcomes of one command run.
pub struct CommandResult {
    pub outcomes: Vec<StageOutcome>,
    pub had_error: bool,
}

pub fn run_prepare(args: &PrepareArgs) -> Result<CommandResult> {
    ensure!(
        args.input_separator.is_ascii(),
        "input separator must be an ASCII character"
    );
    let root = args.output_dir.join(&args.root);
    let span = info_span!("prepare", root = %root.display());
    let _guard = span.enter();

    let mut controller = StageController::new(args.tolerant);

    let mut datasets = Vec::new();
    for spec in &args.inputs {
        let options = LoadOptions::new(spec.semantic_type)
            .with_error(Some(spec.error))
            .with_separator(args.input_separator as u8)
            .with_missing(args.input_missing.clone());
        let stage_name = format!("load {}", spec.path.display());
        let loaded = controller.run_stage(&stage_name, || {
            load_dataset(&spec.path, &options).map_err(Into::into)
        });
        if let Some(dataset) = loaded {
            datasets.push(dataset);
        }
    }

    let merged = controller.run_stage("merge", || {
        merge_datasets(std::mem::take(&mut datasets)).map_err(Into::into)
    });

    // Stages are invoked even when the merge failed (tolerant mode): they
    // then fail with an explicit message instead of being silently dropped.
    let writer = ArtifactWriter::new(&root)
        .with_separator(args.data_separator)
        .with_missing(args.data_missing.clone());
    controller.run_stage("write data file", || {
        let dataset = merged.as_ref().context("no merged table available")?;
        writer.write_data_file(dataset)?;
        Ok(())
    });
    controller.run_stage("write attribute file", || {
        let dataset = merged.as_ref().context("no merged table available")?;
        writer.write_attribute_file(dataset)?;
        Ok(())
    });
    controller.run_stage("write model file", || {
        let dataset = merged.as_ref().context("no merged table available")?;
        writer.write_model_file(dataset)?;
        Ok(())
    });

    let params = search_params(args);
    controller.run_stage("write search params", || {
        writer
            .write_search_params(&params)
            .map(|_| ())
            .map_err(Into::into)
    });
    controller.run_stage("write report params", || {
        writer.write_report_params().map(|_| ()).map_err(Into::into)
    });

    if args.with_script {
        controller.run_stage("write run script", || {
            write_run_script(&root).map(|_| ()).map_err(Into::into)
        });
    }

    Ok(CommandResult {
        had_error: controller.had_error(),
        outcomes: controller.into_outcomes(),
    })
}

fn search_params(args: &PrepareArgs) -> SearchParams {
    let mut params = SearchParams {
        max_duration: args.max_duration,
        max_n_tries: args.max_n_tries,
        max_cycles: args.max_cycles,
        reproducible: args.reproducible,
        ..SearchParams::default()
    };
    if let Some(list) = &args.start_j_list {
        params.start_j_list = list.clone();
    }
    params
}

pub fn run_report(args: &ReportArgs) -> Result<CommandResult> {
    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.data
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });
    let span = info_span!("report", output_dir = %output_dir.display());
    let _guard = span.enter();

    let mut controller = StageController::new(args.tolerant);

    let results = controller.run_stage("parse results", || {
        read_case_results(&args.results).map_err(Into::into)
    });
    let table = controller.run_stage("load prepared table", || {
        load_prepared_table(&args.data).map_err(Into::into)
    });
    let classified = controller.run_stage("aggregate", || {
        let results = results.as_ref().context("no parsed results available")?;
        let table = table.as_ref().context("no prepared table available")?;
        aggregate(table, results).map_err(Into::into)
    });

    let cdt_path = output_dir.join("clust.cdt");
    let probs_path = output_dir.join("clust_withprobs.cdt");
    let stats_path = output_dir.join("clust_stat.tsv");
    controller.run_stage("write cdt", || {
        let table = classified.as_ref().context("no classified table available")?;
        write_cdt(table, &cdt_path, false).map_err(Into::into)
    });
    if args.with_probs {
        controller.run_stage("write cdt with probs", || {
            let table = classified.as_ref().context("no classified table available")?;
            write_cdt(table, &probs_path, true).map_err(Into::into)
        });
    }
    controller.run_stage("write cluster stats", || {
        let table = classified.as_ref().context("no classified table available")?;
        write_cluster_stats(table, &stats_path).map_err(Into::into)
    });

    if args.export {
        let files: Vec<PathBuf> = vec![cdt_path, probs_path, stats_path];
        controller.run_stage("export results", || {
            export_results(&output_dir, &files)
                .map(|_| ())
                .map_err(Into::into)
        });
    }

    Ok(CommandResult {
        had_error: controller.had_error(),
        outcomes: controller.into_outcomes(),
    })
}

/// Report the external classifier binary's location and version banner.
///
/// Returns false when the binary is absent from the search path.
pub fn run_doctor() -> Result<bool> {
    let found = find_autoclass();
    let mut table = comfy_table::Table::new();
    crate::summary::apply_table_style(&mut table);
    table.set_header(vec!["Check", "Result"]);
    match &found {
        Some(path) => {
            table.add_row(vec!["autoclass binary".to_string(), path.display().to_string()]);
            let version = autoclass_version();
            let banner = if version.is_empty() {
                "found but not runnable".to_string()
            } else {
                version
            };
            table.add_row(vec!["version banner".to_string(), banner]);
        }
        None => {
            table.add_row(vec![
                "autoclass binary".to_string(),
                "not found in PATH".to_string(),
            ]);
        }
    }
    println!("{table}");
    if found.is_some() {
        info!("External classifier is available");
    }
    Ok(found.is_some())
}
