//! Full-pipeline test: load, merge, write artifacts, parse a classifier
//! report, aggregate and derive the analyst outputs.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use autoclust_descriptor::{ArtifactWriter, SearchParams};
use autoclust_ingest::{LoadOptions, load_dataset, merge_datasets};
use autoclust_model::SemanticType;
use autoclust_results::{
    aggregate, load_prepared_table, parse_case_results, write_cdt, write_cluster_stats,
};
use autoclust_run::write_run_script;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

#[test]
fn prepare_then_report_produces_the_full_artifact_family() {
    let dir = TempDir::new().unwrap();

    // Two typed inputs sharing identifiers.
    let measures = write_file(
        &dir,
        "measures.tsv",
        "gene\tcolA\tcolB\ng1\t1.0\t2.0\ng2\t3.0\t4.0\ng3\t5.0\t\ng4\t7.0\t8.0\n",
    );
    let labels = write_file(
        &dir,
        "labels.tsv",
        "gene\tcolD\ng1\ton\ng2\toff\ng3\ton\ng4\toff\n",
    );

    let datasets = vec![
        load_dataset(
            &measures,
            &LoadOptions::new(SemanticType::RealScalar).with_error(Some(0.02)),
        )
        .unwrap(),
        load_dataset(&labels, &LoadOptions::new(SemanticType::Discrete)).unwrap(),
    ];
    let merged = merge_datasets(datasets).unwrap();
    assert_eq!(merged.row_count(), 4);
    assert_eq!(merged.column_count() + 1, 4);

    // Artifact family.
    let writer = ArtifactWriter::new(dir.path().join("clust"));
    writer.write_data_file(&merged).unwrap();
    writer.write_attribute_file(&merged).unwrap();
    writer.write_model_file(&merged).unwrap();
    writer.write_search_params(&SearchParams::default()).unwrap();
    writer.write_report_params().unwrap();
    write_run_script(&dir.path().join("clust")).unwrap();
    for extension in ["db2", "tsv", "hd2", "model", "s-params", "r-params", "sh"] {
        assert!(
            writer.artifact_path(extension).exists(),
            "missing .{extension} artifact"
        );
    }

    // colB had a missing cell, so it lands in the with-missing model group.
    let model = fs::read_to_string(writer.artifact_path("model")).unwrap();
    assert!(model.contains("single_normal_cn 1\n"));
    assert!(model.contains("single_normal_cm 2\n"));
    assert!(model.contains("single_multinomial 3\n"));

    // Simulated classifier report over the four cases.
    let case_file = write_file(
        &dir,
        "clust.case-data-1",
        "# case report\nDATA\n1 0 0.9 1 0.1\n2 1 0.8 0 0.2\n3 0 0.7 1 0.3\n4 1 0.6 0 0.4\n",
    );
    let case_text = fs::read_to_string(&case_file).unwrap();
    let results = parse_case_results(&case_text).unwrap();
    assert_eq!(results.case_count(), 4);
    assert_eq!(results.class_count(), 2);

    // Aggregate against the prepared companion and derive outputs.
    let prepared = load_prepared_table(&writer.artifact_path("tsv")).unwrap();
    let classified = aggregate(&prepared, &results).unwrap();
    let order: Vec<&str> = classified.rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(order, vec!["g1", "g3", "g2", "g4"]);

    let cdt_path = dir.path().join("clust.cdt");
    let stats_path = dir.path().join("clust_stat.tsv");
    write_cdt(&classified, &cdt_path, false).unwrap();
    write_cluster_stats(&classified, &stats_path).unwrap();

    let cdt = fs::read_to_string(&cdt_path).unwrap();
    assert!(cdt.starts_with("GID\tUNIQID\tNAME\tGWEIGHT\tcolA\tcolB\tcolD\n"));
    assert!(cdt.contains("GENE0001-CL001X\tg1\tg1\t1\t1.0\t2.0\ton\n"));
    assert!(cdt.contains("GENE0005-001S\n"));

    let stats = fs::read_to_string(&stats_path).unwrap();
    assert!(stats.starts_with("cluster\tcolA\tcolB\tcolD\n"));
    // class 0 holds g1 and g3: colA mean 3.000, std 2.828
    assert!(stats.contains("cluster000mean\t3.000\t2.000\t\n"));
    assert!(stats.contains("cluster000std\t2.828\t\t\n"));
}
