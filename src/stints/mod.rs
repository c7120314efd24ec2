// Stint analytics: lap normalization, stint segmentation and per-stint metrics.

pub mod aggregator;
pub mod normalizer;
pub mod segmenter;

pub use aggregator::{
    DriverStintRecord, aggregate_driver, aggregate_session, aggregate_stint, consistency,
    degradation, fastest_lap, trimmed_laps,
};
pub use normalizer::normalize_laps;
pub use segmenter::segment_stints;
