use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{SessionData, SessionRecord};
use crate::StintlabError;

/// Supplies the records of one race session.
///
/// Sources are constructed by the caller and handed to whatever needs session
/// data, so tests can swap in a [`MemorySource`] instead of reading files.
pub trait SessionSource {
    /// Load the complete session.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be read or a record does
    /// not match any known record type. Missing or unusable lap times and
    /// positions are not errors; they are dropped later during analysis.
    fn load(&mut self) -> Result<SessionData, StintlabError>;
}

/// Reads a JSON Lines file where every line is a [`SessionRecord`].
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionSource for JsonLinesSource {
    fn load(&mut self) -> Result<SessionData, StintlabError> {
        if !self.path.exists() {
            return Err(StintlabError::SessionFileNotFound {
                path: format!("{:?}", self.path),
            });
        }

        let records = serde_jsonlines::json_lines(&self.path)
            .map_err(|e| StintlabError::SessionLoadError { source: e })?
            .collect::<Result<Vec<SessionRecord>, std::io::Error>>()
            .map_err(|e| StintlabError::SessionLoadError { source: e })?;
        debug!("Read {} records from {:?}", records.len(), self.path);

        let data = SessionData::from_records(records);
        info!(
            "Loaded {:?}, found {} drivers with a total of {} lap rows",
            self.path,
            data.drivers.len(),
            data.lap_count()
        );
        Ok(data)
    }
}

/// Serves records that are already in memory.
#[derive(Default)]
pub struct MemorySource {
    records: Vec<SessionRecord>,
}

impl MemorySource {
    pub fn from_records(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }
}

impl SessionSource for MemorySource {
    fn load(&mut self) -> Result<SessionData, StintlabError> {
        Ok(SessionData::from_records(self.records.iter().cloned()))
    }
}
