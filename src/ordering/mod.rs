// Race-order correlation: orders drivers by their finishing position.

pub mod sort;

use std::{cmp::Ordering, collections::HashMap};

use log::debug;

use crate::{session::RaceResult, stints::DriverStintRecord};

pub use sort::{NullPolicy, SortDirection, SortKey, sort_rows};

/// Finishing position of each classified driver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RacePositionIndex {
    positions: HashMap<String, u32>,
}

impl RacePositionIndex {
    /// Build the index, keeping only rows with a finite positive whole-number
    /// position. DNF/DNS/DSQ sentinels and missing positions are skipped. If a
    /// driver appears more than once the first classified row wins.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a RaceResult>) -> Self {
        let mut positions = HashMap::new();
        let mut skipped = 0;
        for result in results {
            match result.position.as_ref().and_then(|p| p.as_finite()) {
                Some(position) if position >= 1. && position.fract() == 0. => {
                    positions
                        .entry(result.driver_code.clone())
                        .or_insert(position as u32);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {} results without a numeric position", skipped);
        }
        Self { positions }
    }

    pub fn position(&self, driver_code: &str) -> Option<u32> {
        self.positions.get(driver_code).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Compare two drivers by finishing position.
    ///
    /// Drivers without a position sort after every classified driver. Two
    /// unclassified drivers, or two drivers sharing a position, compare by code.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa.cmp(&pb).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Sort key usable with `sort_by_key`: classified drivers first by position,
    /// then everyone else by code.
    pub fn sort_key<'a>(&self, driver_code: &'a str) -> (bool, u32, &'a str) {
        match self.position(driver_code) {
            Some(position) => (false, position, driver_code),
            None => (true, 0, driver_code),
        }
    }

    /// Order driver codes by race result.
    pub fn order_drivers<'a>(
        &self,
        driver_codes: impl IntoIterator<Item = &'a str>,
    ) -> Vec<&'a str> {
        let mut codes: Vec<&str> = driver_codes.into_iter().collect();
        codes.sort_by(|a, b| self.compare(a, b));
        codes
    }
}

/// Stable sort of stint rows by driver finishing position. A driver's stints
/// keep their relative order.
pub fn sort_by_race_order(rows: &mut [DriverStintRecord], index: &RacePositionIndex) {
    rows.sort_by(|a, b| index.compare(&a.driver_code, &b.driver_code));
}
