use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use typed_builder::TypedBuilder;

use aer_core::metrics::MetricsRecord;
use aer_core::time::SECONDS_PER_MINUTE;
use aer_models::run::SimulationRun;

use crate::result::ResultWriter;
use crate::writer::{OutputError, WriterType};

pub const SIMULATED_PROTOCOL: &str = "RPL-AER";

/// One row of the protocol comparison. Lifetime is in minutes, rates in percent. The baselines
/// publish no false-positive rate.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct ProtocolFigures {
    #[builder(setter(into))]
    pub protocol: String,
    pub pdr_percent: f64,
    pub latency: f64,
    pub throughput: f64,
    pub network_lifetime: f64,
    pub energy_per_packet: f64,
    pub f1_percent: f64,
    #[builder(default)]
    pub false_positive_percent: Option<f64>,
}

impl From<&MetricsRecord> for ProtocolFigures {
    fn from(record: &MetricsRecord) -> Self {
        ProtocolFigures::builder()
            .protocol(SIMULATED_PROTOCOL)
            .pdr_percent(record.avg_pdr * 100.0)
            .latency(record.avg_latency)
            .throughput(record.avg_throughput)
            .network_lifetime(record.network_lifetime / SECONDS_PER_MINUTE)
            .energy_per_packet(record.avg_energy_per_packet)
            .f1_percent(record.f1_score * 100.0)
            .false_positive_percent(Some(record.false_positive_rate * 100.0))
            .build()
    }
}

/// Published figures of the baseline protocols the simulated one is compared against.
pub fn baselines() -> Vec<ProtocolFigures> {
    vec![
        baseline("RPL-ETX", [78.5, 85.2, 4.2, 420.0, 0.85, 65.2]),
        baseline("RPL-Energy", [82.3, 72.1, 4.8, 380.0, 0.72, 58.7]),
        baseline("RPL-Security", [75.8, 95.4, 3.9, 350.0, 0.95, 82.1]),
    ]
}

fn baseline(protocol: &str, figures: [f64; 6]) -> ProtocolFigures {
    let [pdr_percent, latency, throughput, network_lifetime, energy_per_packet, f1_percent] =
        figures;
    ProtocolFigures::builder()
        .protocol(protocol)
        .pdr_percent(pdr_percent)
        .latency(latency)
        .throughput(throughput)
        .network_lifetime(network_lifetime)
        .energy_per_packet(energy_per_packet)
        .f1_percent(f1_percent)
        .build()
}

/// The simulated protocol first, then the baselines.
pub fn comparison_rows(record: &MetricsRecord) -> Vec<ProtocolFigures> {
    let mut rows = vec![ProtocolFigures::from(record)];
    rows.extend(baselines());
    rows
}

#[derive(Debug)]
pub struct SummaryWriter {
    rows: Vec<ProtocolFigures>,
    to_output: WriterType,
}

impl SummaryWriter {
    pub fn new(output_file: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            to_output: WriterType::new(output_file, Self::schema())?,
            rows: Vec::new(),
        })
    }
}

impl ResultWriter for SummaryWriter {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("protocol", DataType::Utf8, false),
            Field::new("pdr_percent", DataType::Float64, false),
            Field::new("latency", DataType::Float64, false),
            Field::new("throughput", DataType::Float64, false),
            Field::new("network_lifetime", DataType::Float64, false),
            Field::new("energy_per_packet", DataType::Float64, false),
            Field::new("f1_percent", DataType::Float64, false),
            Field::new("false_positive_percent", DataType::Float64, true),
        ])
    }

    fn add_run(&mut self, run: &SimulationRun) {
        self.rows.extend(comparison_rows(run.metrics()));
    }

    fn write_to_file(&mut self) -> Result<(), OutputError> {
        let rows = std::mem::take(&mut self.rows);
        let column = |value: fn(&ProtocolFigures) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from_iter_values(rows.iter().map(value)))
        };
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|row| row.protocol.as_str()),
            )),
            column(|row| row.pdr_percent),
            column(|row| row.latency),
            column(|row| row.throughput),
            column(|row| row.network_lifetime),
            column(|row| row.energy_per_packet),
            column(|row| row.f1_percent),
            Arc::new(Float64Array::from_iter(
                rows.iter().map(|row| row.false_positive_percent),
            )),
        ];
        let record_batch = RecordBatch::try_new(Arc::new(Self::schema()), columns)?;
        self.to_output.record_batch_to_file(&record_batch)
    }

    fn close_file(self) -> Result<(), OutputError> {
        self.to_output.close()
    }
}
