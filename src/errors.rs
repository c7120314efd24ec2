// Error types for stintlab

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum StintlabError {
    // Errors while loading session data
    #[snafu(display("Session file not found: {path}"))]
    SessionFileNotFound { path: String },
    #[snafu(display("Error loading session file"))]
    SessionLoadError { source: io::Error },

    // Errors for the record writer
    #[snafu(display("Error writing analysis output file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing stint record"))]
    RecordSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
}
