use std::mem::take;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, RecordBatch, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};

use aer_models::run::SimulationRun;

use crate::result::ResultWriter;
use crate::writer::{OutputError, WriterType};

#[derive(Debug)]
pub struct EnergyTraceWriter {
    time_step: Vec<u64>,
    node_id: Vec<u32>,
    solar: Vec<bool>,
    energy: Vec<f64>,
    to_output: WriterType,
}

impl EnergyTraceWriter {
    pub fn new(output_file: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            to_output: WriterType::new(output_file, Self::schema())?,
            time_step: Vec::new(),
            node_id: Vec::new(),
            solar: Vec::new(),
            energy: Vec::new(),
        })
    }
}

impl ResultWriter for EnergyTraceWriter {
    fn schema() -> Schema {
        let time_step = Field::new("time_step", DataType::UInt64, false);
        let node_id = Field::new("node_id", DataType::UInt32, false);
        let solar = Field::new("solar", DataType::Boolean, false);
        let energy = Field::new("energy", DataType::Float64, false);
        Schema::new(vec![time_step, node_id, solar, energy])
    }

    fn add_run(&mut self, run: &SimulationRun) {
        for trace in run.energy() {
            for (step_idx, energy) in trace.samples().iter().enumerate() {
                self.time_step.push(run.config().time_at(step_idx).as_u64());
                self.node_id.push(trace.node_id().as_u32());
                self.solar.push(trace.class().is_solar());
                self.energy.push(*energy);
            }
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
                "solar",
                Arc::new(BooleanArray::from(take(&mut self.solar))) as ArrayRef,
            ),
            (
                "energy",
                Arc::new(Float64Array::from(take(&mut self.energy))) as ArrayRef,
            ),
        ])?;
        self.to_output.record_batch_to_file(&record_batch)
    }

    fn close_file(self) -> Result<(), OutputError> {
        self.to_output.close()
    }
}
