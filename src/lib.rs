// Library interface for stintlab
// This allows integration tests and benchmarks to access internal modules

pub mod analysis;
pub mod config;
pub mod errors;
pub mod ordering;
pub mod report;
pub mod session;
pub mod stints;
pub mod writer;

// Re-export commonly used types
pub use analysis::{AnalysisOptions, DriverStanding, RowOrder, analyze_session, driver_standings};
pub use config::AnalysisConfig;
pub use errors::StintlabError;
pub use ordering::{RacePositionIndex, SortDirection, SortKey, sort_rows};
pub use session::{
    Compound, JsonLinesSource, LapDetail, MemorySource, SessionData, SessionRecord, SessionSource,
    TireStint,
};
pub use stints::{DriverStintRecord, aggregate_session};
