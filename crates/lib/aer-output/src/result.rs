use std::fs;
use std::path::{Path, PathBuf};

use arrow::datatypes::Schema;
use log::info;
use serde::Deserialize;

use aer_models::run::SimulationRun;

use crate::tables::energy::EnergyTraceWriter;
use crate::tables::network::NetworkSeriesWriter;
use crate::tables::qos::QosTraceWriter;
use crate::tables::security::SecurityEventWriter;
use crate::tables::summary::SummaryWriter;
use crate::writer::OutputError;

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputType {
    EnergyTrace,
    QosTrace,
    SecurityEvents,
    NetworkSeries,
    Summary,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OutputSettings {
    pub output_path: String,
    pub outputs: Vec<Outputs>,
    pub scenario_id: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Outputs {
    pub output_type: OutputType,
    pub output_filename: String,
}

/// A table filled from a finished run and flushed to its file.
pub trait ResultWriter: Sized {
    fn schema() -> Schema;
    fn add_run(&mut self, run: &SimulationRun);
    fn write_to_file(&mut self) -> Result<(), OutputError>;
    fn close_file(self) -> Result<(), OutputError>;
}

#[derive(Debug)]
pub struct Results {
    pub energy: Option<EnergyTraceWriter>,
    pub qos: Option<QosTraceWriter>,
    pub security: Option<SecurityEventWriter>,
    pub network: Option<NetworkSeriesWriter>,
    pub summary: Option<SummaryWriter>,
}

impl Results {
    pub fn new(output_settings: &OutputSettings) -> Result<Self, OutputError> {
        let output_path = Path::new(&output_settings.output_path)
            .join(output_settings.scenario_id.to_string())
            .join("files");
        if !output_path.exists() {
            fs::create_dir_all(&output_path)?;
        }

        let file_of = |output_type: OutputType| -> Option<PathBuf> {
            output_settings
                .outputs
                .iter()
                .filter(|output| output.output_type == output_type)
                .last()
                .map(|settings| output_path.join(&settings.output_filename))
        };

        Ok(Self {
            energy: file_of(OutputType::EnergyTrace)
                .map(|file| EnergyTraceWriter::new(&file))
                .transpose()?,
            qos: file_of(OutputType::QosTrace)
                .map(|file| QosTraceWriter::new(&file))
                .transpose()?,
            security: file_of(OutputType::SecurityEvents)
                .map(|file| SecurityEventWriter::new(&file))
                .transpose()?,
            network: file_of(OutputType::NetworkSeries)
                .map(|file| NetworkSeriesWriter::new(&file))
                .transpose()?,
            summary: file_of(OutputType::Summary)
                .map(|file| SummaryWriter::new(&file))
                .transpose()?,
        })
    }

    /// Writes every configured table for the run and closes the files.
    pub fn write_run(self, run: &SimulationRun) -> Result<(), OutputError> {
        if let Some(writer) = self.energy {
            Self::flush(writer, run)?;
        }
        if let Some(writer) = self.qos {
            Self::flush(writer, run)?;
        }
        if let Some(writer) = self.security {
            Self::flush(writer, run)?;
        }
        if let Some(writer) = self.network {
            Self::flush(writer, run)?;
        }
        if let Some(writer) = self.summary {
            Self::flush(writer, run)?;
        }
        info!("Results written");
        Ok(())
    }

    fn flush<W: ResultWriter>(mut writer: W, run: &SimulationRun) -> Result<(), OutputError> {
        writer.add_run(run);
        writer.write_to_file()?;
        writer.close_file()
    }
}
