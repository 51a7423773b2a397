use std::fs;
use std::path::PathBuf;

use aer_models::run::Simulation;
use aer_output::result::{OutputSettings, OutputType, Outputs, Results};
use aer_output::tables::network::network_series;
use aer_output::tables::summary::{baselines, comparison_rows, SIMULATED_PROTOCOL};
use aer_output::writer::{OutputError, WriterType};
use aer_testutils::config::reference_config;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("aer-output-tests")
        .join(format!("{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

#[test]
fn test_network_series_follows_grid() {
    let run = Simulation::new(reference_config()).unwrap().run().unwrap();
    let series = network_series(&run);

    assert_eq!(series.len(), 11);
    assert_eq!(series[0].solar_energy, Some(2000.0));
    assert_eq!(series[0].battery_energy, Some(2000.0));
    assert!(series.windows(2).all(|pair| pair[0].attacks <= pair[1].attacks));
    assert!(series.iter().all(|p| p.detections <= p.attacks));
    let last = series.last().unwrap();
    assert_eq!(last.attacks, run.metrics().total_attacks);
    assert_eq!(last.detections, run.metrics().detected_attacks);
    assert_eq!(last.false_positives, run.metrics().false_positives);
    assert!(series.iter().all(|p| (0.1..=0.98).contains(&p.pdr)));
}

#[test]
fn test_comparison_rows() {
    let run = Simulation::new(reference_config()).unwrap().run().unwrap();
    let rows = comparison_rows(run.metrics());

    assert_eq!(rows.len(), 1 + baselines().len());
    assert_eq!(rows[0].protocol, SIMULATED_PROTOCOL);
    assert_eq!(rows[0].network_lifetime, run.metrics().network_lifetime / 60.0);
    assert_eq!(rows[0].pdr_percent, run.metrics().avg_pdr * 100.0);
    assert_eq!(rows[1].protocol, "RPL-ETX");
    assert_eq!(
        rows[0].false_positive_percent,
        Some(run.metrics().false_positive_rate * 100.0)
    );
    assert!(rows[1..].iter().all(|row| row.false_positive_percent.is_none()));
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = scratch_dir("extension");
    fs::create_dir_all(&dir).unwrap();
    let result = WriterType::new(&dir.join("energy.json"), arrow::datatypes::Schema::empty());
    assert!(matches!(result, Err(OutputError::Extension(_))));
}

#[test]
fn test_results_written_to_scenario_folder() {
    let dir = scratch_dir("results");
    let settings = OutputSettings {
        output_path: dir.to_string_lossy().into_owned(),
        scenario_id: 3,
        outputs: vec![
            Outputs {
                output_type: OutputType::EnergyTrace,
                output_filename: "energy.parquet".to_string(),
            },
            Outputs {
                output_type: OutputType::QosTrace,
                output_filename: "qos.csv".to_string(),
            },
            Outputs {
                output_type: OutputType::SecurityEvents,
                output_filename: "security.csv".to_string(),
            },
            Outputs {
                output_type: OutputType::NetworkSeries,
                output_filename: "network.csv".to_string(),
            },
            Outputs {
                output_type: OutputType::Summary,
                output_filename: "summary.csv".to_string(),
            },
        ],
    };
    let run = Simulation::new(reference_config()).unwrap().run().unwrap();
    Results::new(&settings).unwrap().write_run(&run).unwrap();

    let files = dir.join("3").join("files");
    for name in [
        "energy.parquet",
        "qos.csv",
        "security.csv",
        "network.csv",
        "summary.csv",
    ] {
        assert!(files.join(name).exists(), "{} missing", name);
    }
    let summary = fs::read_to_string(files.join("summary.csv")).unwrap();
    assert!(summary.starts_with("protocol,pdr_percent"));
    assert_eq!(summary.lines().count(), 5);
    let qos = fs::read_to_string(files.join("qos.csv")).unwrap();
    assert_eq!(qos.lines().count(), 1 + 10 * 11);
}
