use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::stints::DriverStintRecord;

/// Stand-in for a missing value that should sort after every known value
pub const UNKNOWN_AS_WORST: f64 = f64::INFINITY;
/// Stand-in for a missing value that carries no direction
pub const UNKNOWN_AS_NEUTRAL: f64 = 0.;

/// How a missing metric is placed when sorting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullPolicy {
    /// Treat as +infinity: unknowns sort last in ascending order
    Worst,
    /// Treat as zero: unknowns sort among near-zero values
    Neutral,
}

impl NullPolicy {
    pub fn resolve(self, value: Option<f64>) -> f64 {
        match (value, self) {
            (Some(v), _) => v,
            (None, NullPolicy::Worst) => UNKNOWN_AS_WORST,
            (None, NullPolicy::Neutral) => UNKNOWN_AS_NEUTRAL,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The sortable columns of the stint table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DriverCode,
    StintLength,
    FastestLap,
    Consistency,
    Degradation,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DriverCode,
        SortKey::StintLength,
        SortKey::FastestLap,
        SortKey::Consistency,
        SortKey::Degradation,
    ];

    /// Missing-value policy of numeric metric columns. Columns that are never
    /// missing have none.
    pub fn null_policy(self) -> Option<NullPolicy> {
        match self {
            SortKey::DriverCode | SortKey::StintLength => None,
            SortKey::FastestLap | SortKey::Consistency => Some(NullPolicy::Worst),
            SortKey::Degradation => Some(NullPolicy::Neutral),
        }
    }

    /// Numeric sort value of a row, with the column's null policy applied.
    /// `None` for the text column.
    pub fn numeric_value(self, row: &DriverStintRecord) -> Option<f64> {
        let metric = match self {
            SortKey::DriverCode => return None,
            SortKey::StintLength => return Some(row.stint_length as f64),
            SortKey::FastestLap => row.fastest_lap,
            SortKey::Consistency => row.consistency,
            SortKey::Degradation => row.degradation,
        };
        self.null_policy().map(|policy| policy.resolve(metric))
    }

    pub fn compare(self, a: &DriverStintRecord, b: &DriverStintRecord) -> Ordering {
        match self {
            SortKey::DriverCode => a.driver_code.cmp(&b.driver_code),
            SortKey::StintLength => a.stint_length.cmp(&b.stint_length),
            _ => {
                let va = self.numeric_value(a).unwrap_or(UNKNOWN_AS_NEUTRAL);
                let vb = self.numeric_value(b).unwrap_or(UNKNOWN_AS_NEUTRAL);
                va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DriverCode => "Driver",
            SortKey::StintLength => "Laps",
            SortKey::FastestLap => "Fastest",
            SortKey::Consistency => "Consistency",
            SortKey::Degradation => "Degradation",
        }
    }
}

/// Stable sort of rows by one column. Rows with equal keys keep their input
/// order in both directions.
pub fn sort_rows(rows: &mut [DriverStintRecord], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| direction.apply(key.compare(a, b)));
}
