// Session-level analysis: aggregate every stint, then order the rows for display.

use log::info;

use crate::{
    ordering::{RacePositionIndex, SortDirection, SortKey, sort_by_race_order, sort_rows},
    session::SessionData,
    stints::{DriverStintRecord, aggregate_session},
};

/// How the aggregated rows are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// By finishing position, each driver's stints in stint order
    #[default]
    RaceResult,
    /// By a single column
    Column(SortKey, SortDirection),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub order: RowOrder,
}

/// Aggregate a session and order the resulting rows.
pub fn analyze_session(
    session: &SessionData,
    options: &AnalysisOptions,
) -> Vec<DriverStintRecord> {
    let mut rows = aggregate_session(session);
    match options.order {
        RowOrder::RaceResult => {
            let index = RacePositionIndex::from_results(&session.results);
            sort_by_race_order(&mut rows, &index);
        }
        RowOrder::Column(key, direction) => sort_rows(&mut rows, key, direction),
    }
    info!(
        "Analyzed {} stints across {} drivers",
        rows.len(),
        session.drivers.len()
    );
    rows
}

/// A driver with their finishing position, if classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverStanding {
    pub driver_code: String,
    pub position: Option<u32>,
    pub stint_count: usize,
}

/// Drivers of the session in race order. Drivers that only appear in the
/// results are included too.
pub fn driver_standings(session: &SessionData) -> Vec<DriverStanding> {
    let index = RacePositionIndex::from_results(&session.results);
    let mut codes: Vec<&str> = session
        .drivers
        .iter()
        .map(|d| d.driver_code.as_str())
        .collect();
    for result in &session.results {
        if !codes.contains(&result.driver_code.as_str()) {
            codes.push(result.driver_code.as_str());
        }
    }

    index
        .order_drivers(codes)
        .into_iter()
        .map(|code| DriverStanding {
            driver_code: code.to_string(),
            position: index.position(code),
            stint_count: session.driver(code).map(|d| d.stints.len()).unwrap_or(0),
        })
        .collect()
}
