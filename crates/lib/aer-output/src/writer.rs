use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use arrow::csv::Writer;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchWriter};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::errors::ParquetError;
use parquet::file::properties::WriterProperties;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to build record batch: {0}")]
    Arrow(#[from] ArrowError),

    #[error("failed to write parquet: {0}")]
    Parquet(#[from] ParquetError),

    #[error("unsupported output file {0}, use .parquet or .csv")]
    Extension(PathBuf),

    #[error("failed to configure the logger: {0}")]
    Logger(String),
}

#[derive(Debug)]
pub enum WriterType {
    Parquet(WriterParquet),
    Csv(WriterCsv),
}

impl WriterType {
    /// Opens a fresh file, replacing any previous one. The format follows the extension.
    pub fn new(file_name: &Path, schema: Schema) -> Result<Self, OutputError> {
        let extension = file_name.extension().and_then(|ext| ext.to_str());
        let writer = match extension {
            Some("parquet") => WriterType::Parquet(WriterParquet::new(file_name, schema)?),
            Some("csv") => WriterType::Csv(WriterCsv::new(file_name)?),
            _ => return Err(OutputError::Extension(file_name.to_path_buf())),
        };
        Ok(writer)
    }

    pub fn record_batch_to_file(&mut self, record_batch: &RecordBatch) -> Result<(), OutputError> {
        match self {
            WriterType::Parquet(to_output) => to_output.writer.write(record_batch)?,
            WriterType::Csv(to_output) => to_output.writer.write(record_batch)?,
        }
        Ok(())
    }

    pub fn close(self) -> Result<(), OutputError> {
        match self {
            WriterType::Parquet(to_output) => to_output.close(),
            WriterType::Csv(to_output) => to_output.close(),
        }
    }
}

#[derive(Debug)]
pub struct WriterParquet {
    pub writer: ArrowWriter<File>,
}

impl WriterParquet {
    fn new(file_name: &Path, schema: Schema) -> Result<Self, OutputError> {
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let output_file = File::create(file_name)?;
        let writer = ArrowWriter::try_new(output_file, SchemaRef::from(schema), Some(props))?;
        Ok(Self { writer })
    }

    pub fn close(self) -> Result<(), OutputError> {
        self.writer.close()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct WriterCsv {
    pub writer: Writer<File>,
}

impl WriterCsv {
    fn new(file_name: &Path) -> Result<Self, OutputError> {
        let writer = Writer::new(File::create(file_name)?);
        Ok(Self { writer })
    }

    pub fn close(self) -> Result<(), OutputError> {
        RecordBatchWriter::close(self.writer)?;
        Ok(())
    }
}
