use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use typed_builder::TypedBuilder;

use aer_core::node::NodeClass;
use aer_core::time::TimeS;
use aer_core::trace::QosTrace;
use aer_models::run::SimulationRun;

use crate::result::ResultWriter;
use crate::writer::{OutputError, WriterType};

/// Network-wide averages at one grid point. Class means are empty when the class has no nodes.
#[derive(Copy, Debug, Clone, PartialEq, TypedBuilder)]
pub struct NetworkPoint {
    pub time_step: TimeS,
    pub solar_energy: Option<f64>,
    pub battery_energy: Option<f64>,
    pub pdr: f64,
    pub latency: f64,
    pub throughput: f64,
    pub attacks: u64,
    pub detections: u64,
    pub false_positives: u64,
}

pub fn network_series(run: &SimulationRun) -> Vec<NetworkPoint> {
    let config = run.config();
    let step_count = config.step_count();
    let attacks = cumulative_counts(run.security().attacks(), config.step_size, step_count);
    let detections = cumulative_counts(run.security().detected(), config.step_size, step_count);
    let false_positives = cumulative_counts(
        run.security().false_positives(),
        config.step_size,
        step_count,
    );

    (0..step_count)
        .map(|step_idx| {
            NetworkPoint::builder()
                .time_step(config.time_at(step_idx))
                .solar_energy(class_energy(run, NodeClass::Solar, step_idx))
                .battery_energy(class_energy(run, NodeClass::Battery, step_idx))
                .pdr(qos_mean(run.qos(), QosTrace::pdr, step_idx))
                .latency(qos_mean(run.qos(), QosTrace::latency, step_idx))
                .throughput(qos_mean(run.qos(), QosTrace::throughput, step_idx))
                .attacks(attacks[step_idx])
                .detections(detections[step_idx])
                .false_positives(false_positives[step_idx])
                .build()
        })
        .collect()
}

fn class_energy(run: &SimulationRun, class: NodeClass, step_idx: usize) -> Option<f64> {
    let levels: Vec<f64> = run
        .energy()
        .iter()
        .filter(|trace| trace.class() == class)
        .filter_map(|trace| trace.sample(step_idx))
        .collect();
    if levels.is_empty() {
        return None;
    }
    Some(levels.iter().sum::<f64>() / levels.len() as f64)
}

fn qos_mean(traces: &[QosTrace], series: fn(&QosTrace) -> &[f64], step_idx: usize) -> f64 {
    let values: Vec<f64> = traces
        .iter()
        .filter_map(|trace| series(trace).get(step_idx).copied())
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn cumulative_counts(times: &[TimeS], step_size: TimeS, step_count: usize) -> Vec<u64> {
    let mut counts = vec![0u64; step_count];
    for time in times {
        let step_idx = (*time / step_size) as usize;
        if let Some(count) = counts.get_mut(step_idx) {
            *count += 1;
        }
    }
    let mut total = 0;
    for count in counts.iter_mut() {
        total += *count;
        *count = total;
    }
    counts
}

#[derive(Debug)]
pub struct NetworkSeriesWriter {
    points: Vec<NetworkPoint>,
    to_output: WriterType,
}

impl NetworkSeriesWriter {
    pub fn new(output_file: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            to_output: WriterType::new(output_file, Self::schema())?,
            points: Vec::new(),
        })
    }
}

impl ResultWriter for NetworkSeriesWriter {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("time_step", DataType::UInt64, false),
            Field::new("solar_energy", DataType::Float64, true),
            Field::new("battery_energy", DataType::Float64, true),
            Field::new("pdr", DataType::Float64, false),
            Field::new("latency", DataType::Float64, false),
            Field::new("throughput", DataType::Float64, false),
            Field::new("attacks", DataType::UInt64, false),
            Field::new("detections", DataType::UInt64, false),
            Field::new("false_positives", DataType::UInt64, false),
        ])
    }

    fn add_run(&mut self, run: &SimulationRun) {
        self.points.extend(network_series(run));
    }

    fn write_to_file(&mut self) -> Result<(), OutputError> {
        let points = std::mem::take(&mut self.points);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt64Array::from_iter_values(
                points.iter().map(|p| p.time_step.as_u64()),
            )),
            Arc::new(Float64Array::from_iter(points.iter().map(|p| p.solar_energy))),
            Arc::new(Float64Array::from_iter(
                points.iter().map(|p| p.battery_energy),
            )),
            Arc::new(Float64Array::from_iter_values(points.iter().map(|p| p.pdr))),
            Arc::new(Float64Array::from_iter_values(
                points.iter().map(|p| p.latency),
            )),
            Arc::new(Float64Array::from_iter_values(
                points.iter().map(|p| p.throughput),
            )),
            Arc::new(UInt64Array::from_iter_values(
                points.iter().map(|p| p.attacks),
            )),
            Arc::new(UInt64Array::from_iter_values(
                points.iter().map(|p| p.detections),
            )),
            Arc::new(UInt64Array::from_iter_values(
                points.iter().map(|p| p.false_positives),
            )),
        ];
        let record_batch = RecordBatch::try_new(Arc::new(Self::schema()), columns)?;
        self.to_output.record_batch_to_file(&record_batch)
    }

    fn close_file(self) -> Result<(), OutputError> {
        self.to_output.close()
    }
}
