use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    StintlabError,
    analysis::{AnalysisOptions, RowOrder},
    ordering::{SortDirection, SortKey},
};

const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_PRECISION: usize = 3;
/// More decimals than this overflow the rounding scale of lap times
pub const MAX_PRECISION: usize = 6;

/// Check a requested number of decimal places.
pub fn check_precision(precision: usize) -> Result<usize, StintlabError> {
    if precision > MAX_PRECISION {
        return Err(StintlabError::InvalidUserInput {
            field: "precision".to_string(),
            reason: format!("must be at most {}, got {}", MAX_PRECISION, precision),
        });
    }
    Ok(precision)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// Order rows by race result instead of `sort_key`
    pub race_order: bool,
    /// Decimal places shown for times and metrics
    pub precision: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sort_key: SortKey::DriverCode,
            sort_direction: SortDirection::Ascending,
            race_order: true,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl AnalysisConfig {
    pub fn default_path() -> Result<PathBuf, StintlabError> {
        Ok(dirs::config_dir()
            .ok_or(StintlabError::NoConfigDir)?
            .join("stintlab")
            .join(CONFIG_FILE_NAME))
    }

    /// Load the config from the user config directory. A missing file is `Ok(None)`.
    pub fn from_local_file() -> Result<Option<Self>, StintlabError> {
        Self::from_path(&Self::default_path()?)
    }

    pub fn from_path(config_path: &Path) -> Result<Option<Self>, StintlabError> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| StintlabError::ConfigIOError { source: e })?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|e| StintlabError::ConfigSerializeError { source: e })?;
        check_precision(config.precision)?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), StintlabError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), StintlabError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StintlabError::ConfigIOError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| StintlabError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| StintlabError::ConfigSerializeError { source: e })
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        let order = if self.race_order {
            RowOrder::RaceResult
        } else {
            RowOrder::Column(self.sort_key, self.sort_direction)
        };
        AnalysisOptions { order }
    }
}
