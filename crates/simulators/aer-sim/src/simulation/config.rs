use std::path::{Path, PathBuf};

use serde::Deserialize;

use aer_core::config::{
    AggregateSettings, EnergySettings, QosSettings, SecuritySettings, SimulationConfig,
};
use aer_core::time::TimeS;
use aer_output::logger::LogSettings;
use aer_output::result::OutputSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct BaseConfig {
    pub simulation_settings: SimSettings,
    #[serde(default)]
    pub energy_settings: EnergySettings,
    #[serde(default)]
    pub qos_settings: QosSettings,
    #[serde(default)]
    pub security_settings: SecuritySettings,
    #[serde(default)]
    pub aggregate_settings: AggregateSettings,
    pub log_settings: LogSettings,
    pub output_settings: OutputSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimSettings {
    pub scenario: String,
    pub node_count: u32,
    pub duration: TimeS,
    pub step_size: TimeS,
    pub solar_ratio: f64,
    #[serde(default)]
    pub mobile_ratio: f64,
    pub seed: u64,
}

impl BaseConfig {
    pub fn simulation_config(&self) -> SimulationConfig {
        let settings = &self.simulation_settings;
        SimulationConfig::builder()
            .node_count(settings.node_count)
            .step_size(settings.step_size)
            .duration(settings.duration)
            .solar_ratio(settings.solar_ratio)
            .mobile_ratio(settings.mobile_ratio)
            .seed(settings.seed)
            .energy(self.energy_settings)
            .qos(self.qos_settings)
            .security(self.security_settings)
            .aggregate(self.aggregate_settings)
            .build()
    }
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &Path) -> Self {
        Self {
            file_path: file_name.to_path_buf(),
        }
    }

    pub fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config: BaseConfig = toml::from_str(&parsing_result)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [simulation_settings]
        scenario = "small"
        node_count = 10
        duration = 600
        step_size = 60
        solar_ratio = 0.3
        seed = 12345

        [security_settings]
        attack_probability = 0.2

        [log_settings]
        log_path = "output"
        log_level = "debug"
        log_file_name = "aer.log"
        log_overwrite = true

        [output_settings]
        output_path = "output"
        scenario_id = 1
        outputs = []
    "#;

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let base_config: BaseConfig = toml::from_str(MINIMAL).unwrap();
        let config = base_config.simulation_config();
        assert_eq!(config, aer_testutils::config::reference_config_with(|c| {
            c.security.attack_probability = 0.2;
        }));
        assert_eq!(config.energy, EnergySettings::default());
        assert_eq!(config.security.detection_rate, 0.85);
        assert_eq!(config.mobile_ratio, 0.0);
    }
}
