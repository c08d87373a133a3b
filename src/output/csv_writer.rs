//! CSV results file

use crate::output::traits::{OutputError, OutputResult, RecordSink};
use crate::record::{StudentRecord, RESULT_HEADERS};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Append-only CSV file of sweep results
///
/// Each batch is serialized into memory first and then handed to the file
/// in a single `write_all`, followed by a flush.
#[derive(Debug)]
pub struct CsvResultsWriter {
    path: PathBuf,
    file: File,
}

impl CsvResultsWriter {
    /// Creates (or truncates) the results file
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_block(&mut self, block: &[u8]) -> OutputResult<()> {
        self.file.write_all(block)?;
        self.file.flush()?;
        Ok(())
    }
}

fn buffer_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new())
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> OutputResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))
}

impl RecordSink for CsvResultsWriter {
    fn write_header(&mut self) -> OutputResult<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        let mut writer = buffer_writer();
        writer.write_record(RESULT_HEADERS)?;
        let block = into_bytes(writer)?;
        self.write_block(&block)
    }

    fn append_batch(&mut self, records: &[StudentRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut writer = buffer_writer();
        for record in records {
            writer.serialize(record)?;
        }
        let block = into_bytes(writer)?;
        self.write_block(&block)
    }
}
