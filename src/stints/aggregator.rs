use log::debug;
use serde::{Deserialize, Serialize};

use crate::session::{Compound, DriverSession, LapDetail, SessionData, TireStint};

use super::{normalizer::normalize_laps, segmenter::segment_stints};

/// Minimum number of trimmed laps before consistency and degradation are defined
pub const MIN_TRIMMED_LAPS: usize = 2;

/// Derived performance metrics for one stint of one driver.
///
/// Every metric is `None` when the stint does not have enough laps for it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DriverStintRecord {
    pub driver_code: String,
    /// 1-based position among the driver's declared stints
    pub stint_number: u32,
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
    pub stint_length: u32,
    /// Best lap time over all laps of the stint, in seconds
    pub fastest_lap: Option<f64>,
    /// Population standard deviation of the trimmed lap times, in seconds
    pub consistency: Option<f64>,
    /// Least squares slope of lap time over lap number, in seconds per lap
    pub degradation: Option<f64>,
}

/// Laps of a stint without its first and last lap.
///
/// Out-laps and in-laps distort both spread and trend, so stints of two laps
/// or fewer have no representative laps at all.
pub fn trimmed_laps(lap_details: &[LapDetail]) -> &[LapDetail] {
    if lap_details.len() > 2 {
        &lap_details[1..lap_details.len() - 1]
    } else {
        &[]
    }
}

pub fn fastest_lap(lap_details: &[LapDetail]) -> Option<f64> {
    lap_details.iter().map(|l| l.lap_time).reduce(f64::min)
}

/// Population standard deviation (divides by `n`) of the lap times.
pub fn consistency(trimmed: &[LapDetail]) -> Option<f64> {
    if trimmed.len() < MIN_TRIMMED_LAPS {
        return None;
    }
    let n = trimmed.len() as f64;
    let mean = trimmed.iter().map(|l| l.lap_time).sum::<f64>() / n;
    let variance = trimmed
        .iter()
        .map(|l| (l.lap_time - mean).powi(2))
        .sum::<f64>()
        / n;
    Some(variance.sqrt())
}

/// Ordinary least squares slope of lap time regressed on lap number.
///
/// Positive means the car is getting slower. A zero denominator yields `0`.
pub fn degradation(trimmed: &[LapDetail]) -> Option<f64> {
    if trimmed.len() < MIN_TRIMMED_LAPS {
        return None;
    }
    let n = trimmed.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0., 0., 0., 0.);
    for lap in trimmed {
        let x = lap.lap_number as f64;
        let y = lap.lap_time;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0. {
        return Some(0.);
    }
    Some((n * sum_xy - sum_x * sum_y) / denominator)
}

pub fn aggregate_stint(
    driver_code: &str,
    stint_number: u32,
    stint: &TireStint,
) -> DriverStintRecord {
    let trimmed = trimmed_laps(&stint.lap_details);
    DriverStintRecord {
        driver_code: driver_code.to_string(),
        stint_number,
        compound: stint.compound,
        start_lap: stint.start_lap,
        end_lap: stint.end_lap,
        stint_length: stint.stint_length(),
        fastest_lap: fastest_lap(&stint.lap_details),
        consistency: consistency(trimmed),
        degradation: degradation(trimmed),
    }
}

/// Normalize, segment and aggregate all stints of one driver.
pub fn aggregate_driver(driver: &DriverSession) -> Vec<DriverStintRecord> {
    let laps = normalize_laps(&driver.laps);
    if laps.len() != driver.laps.len() {
        debug!(
            "{}: dropped {} laps without a usable time",
            driver.driver_code,
            driver.laps.len() - laps.len()
        );
    }

    let stints = segment_stints(&driver.stints, &laps);
    debug!(
        "{}: aggregated {} stints from {} laps",
        driver.driver_code,
        stints.len(),
        laps.len()
    );
    stints
        .iter()
        .zip(1u32..)
        .map(|(stint, stint_number)| aggregate_stint(&driver.driver_code, stint_number, stint))
        .collect()
}

/// Aggregate every driver, in the session's driver order.
pub fn aggregate_session(session: &SessionData) -> Vec<DriverStintRecord> {
    session.drivers.iter().flat_map(aggregate_driver).collect()
}
