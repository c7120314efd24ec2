use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{StintlabError, stints::DriverStintRecord};

/// Write stint records as JSON Lines, one record per line. Missing metrics
/// are written as `null`.
pub fn write_records(file: &Path, records: &[DriverStintRecord]) -> Result<(), StintlabError> {
    let output_file = File::create(file).map_err(|e| StintlabError::WriterError { source: e })?;
    let mut output_writer = BufWriter::new(output_file);
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| StintlabError::RecordSerializeError { source: e })?;
        writeln!(output_writer, "{}", line)
            .map_err(|e| StintlabError::WriterError { source: e })?;
    }
    output_writer
        .flush()
        .map_err(|e| StintlabError::WriterError { source: e })?;
    info!("Wrote {} stint records to {:?}", records.len(), file);
    Ok(())
}
