use std::error::Error;
use std::path::{Path, PathBuf};

use log::info;

use aer_core::config::SimulationConfig;
use aer_models::run::Simulation;
use aer_output::logger::initiate_logger;
use aer_output::result::{OutputSettings, Results};
use aer_output::writer::OutputError;

use crate::simulation::config::{BaseConfig, BaseConfigReader};

pub struct SimulationBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
    seed_override: Option<u64>,
}

impl SimulationBuilder {
    pub(crate) fn new(base_config_file: &Path) -> Result<Self, Box<dyn Error>> {
        if !base_config_file.exists() {
            return Err(format!(
                "configuration file {} is not found",
                base_config_file.display()
            )
            .into());
        }
        let config_path = base_config_file
            .parent()
            .ok_or("invalid directory for the configuration file")?
            .to_path_buf();
        let base_config = BaseConfigReader::new(base_config_file).parse()?;
        Ok(Self {
            base_config,
            config_path,
            seed_override: None,
        })
    }

    pub(crate) fn with_seed(mut self, seed: u64) -> Self {
        self.seed_override = Some(seed);
        self
    }

    pub(crate) fn scenario(&self) -> &str {
        &self.base_config.simulation_settings.scenario
    }

    pub(crate) fn simulation_config(&self) -> SimulationConfig {
        let mut config = self.base_config.simulation_config();
        if let Some(seed) = self.seed_override {
            config.seed = seed;
        }
        config
    }

    /// Starts the file logger and validates the configuration.
    pub(crate) fn build(&self) -> Result<Simulation, Box<dyn Error>> {
        initiate_logger(
            &self.config_path,
            &self.base_config.log_settings,
            Some(self.base_config.output_settings.scenario_id),
        )?;
        info!("Building scenario {}", self.scenario());
        Ok(Simulation::new(self.simulation_config())?)
    }

    /// Output writers, with the output path taken relative to the configuration file.
    pub(crate) fn results(&self) -> Result<Results, OutputError> {
        let output_settings = OutputSettings {
            output_path: self
                .config_path
                .join(&self.base_config.output_settings.output_path)
                .to_string_lossy()
                .into_owned(),
            ..self.base_config.output_settings.clone()
        };
        Results::new(&output_settings)
    }
}
