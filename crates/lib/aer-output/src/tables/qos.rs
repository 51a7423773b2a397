use std::mem::take;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};

use aer_models::run::SimulationRun;

use crate::result::ResultWriter;
use crate::writer::{OutputError, WriterType};

#[derive(Debug)]
pub struct QosTraceWriter {
    time_step: Vec<u64>,
    node_id: Vec<u32>,
    pdr: Vec<f64>,
    latency: Vec<f64>,
    throughput: Vec<f64>,
    to_output: WriterType,
}

impl QosTraceWriter {
    pub fn new(output_file: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            to_output: WriterType::new(output_file, Self::schema())?,
            time_step: Vec::new(),
            node_id: Vec::new(),
            pdr: Vec::new(),
            latency: Vec::new(),
            throughput: Vec::new(),
        })
    }
}

impl ResultWriter for QosTraceWriter {
    fn schema() -> Schema {
        let time_step = Field::new("time_step", DataType::UInt64, false);
        let node_id = Field::new("node_id", DataType::UInt32, false);
        let pdr = Field::new("pdr", DataType::Float64, false);
        let latency = Field::new("latency", DataType::Float64, false);
        let throughput = Field::new("throughput", DataType::Float64, false);
        Schema::new(vec![time_step, node_id, pdr, latency, throughput])
    }

    fn add_run(&mut self, run: &SimulationRun) {
        for trace in run.qos() {
            for step_idx in 0..trace.len() {
                self.time_step.push(run.config().time_at(step_idx).as_u64());
                self.node_id.push(trace.node_id().as_u32());
            }
            self.pdr.extend_from_slice(trace.pdr());
            self.latency.extend_from_slice(trace.latency());
            self.throughput.extend_from_slice(trace.throughput());
        }
    }

    fn write_to_file(&mut self) -> Result<(), OutputError> {
        let record_batch = RecordBatch::try_from_iter(vec![
            (
                "time_step",
                Arc::new(UInt64Array::from(take(&mut self.time_step))) as ArrayRef,
            ),
            (
                "node_id",
                Arc::new(UInt32Array::from(take(&mut self.node_id))) as ArrayRef,
            ),
            (
                "pdr",
                Arc::new(Float64Array::from(take(&mut self.pdr))) as ArrayRef,
            ),
            (
                "latency",
                Arc::new(Float64Array::from(take(&mut self.latency))) as ArrayRef,
            ),
            (
                "throughput",
                Arc::new(Float64Array::from(take(&mut self.throughput))) as ArrayRef,
            ),
        ])?;
        self.to_output.record_batch_to_file(&record_batch)
    }

    fn close_file(self) -> Result<(), OutputError> {
        self.to_output.close()
    }
}
