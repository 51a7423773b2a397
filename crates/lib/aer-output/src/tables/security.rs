use std::mem::take;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};

use aer_models::run::SimulationRun;

use crate::result::ResultWriter;
use crate::writer::{OutputError, WriterType};

#[derive(Debug)]
pub struct SecurityEventWriter {
    time_step: Vec<u64>,
    event: Vec<String>,
    to_output: WriterType,
}

impl SecurityEventWriter {
    pub fn new(output_file: &Path) -> Result<Self, OutputError> {
        Ok(Self {
            to_output: WriterType::new(output_file, Self::schema())?,
            time_step: Vec::new(),
            event: Vec::new(),
        })
    }
}

impl ResultWriter for SecurityEventWriter {
    fn schema() -> Schema {
        let time_step = Field::new("time_step", DataType::UInt64, false);
        let event = Field::new("event", DataType::Utf8, false);
        Schema::new(vec![time_step, event])
    }

    fn add_run(&mut self, run: &SimulationRun) {
        for (time, event) in run.security().events() {
            self.time_step.push(time.as_u64());
            self.event.push(event.to_string());
        }
    }

    fn write_to_file(&mut self) -> Result<(), OutputError> {
        let record_batch = RecordBatch::try_from_iter(vec![
            (
                "time_step",
                Arc::new(UInt64Array::from(take(&mut self.time_step))) as ArrayRef,
            ),
            (
                "event",
                Arc::new(StringArray::from(take(&mut self.event))) as ArrayRef,
            ),
        ])?;
        self.to_output.record_batch_to_file(&record_batch)
    }

    fn close_file(self) -> Result<(), OutputError> {
        self.to_output.close()
    }
}
