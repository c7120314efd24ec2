// Session data model: declared stints, raw lap rows and race results as they
// arrive from the external fetch layer, plus the typed records derived from them.

pub mod source;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use source::{JsonLinesSource, MemorySource, SessionSource};

/// A numeric field as delivered by the upstream APIs. Ergast-style feeds send
/// numbers as strings and use text sentinels ("DNF", "\N") for missing values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    /// Interpret the value as a finite number, if it is one.
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
            RawNumber::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// Tire compound. Input strings are matched case-insensitively, anything
/// unrecognised becomes `Unknown`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    Unknown,
}

impl Compound {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_uppercase().as_str() {
            "SOFT" => Compound::Soft,
            "MEDIUM" => Compound::Medium,
            "HARD" => Compound::Hard,
            "INTERMEDIATE" => Compound::Intermediate,
            "WET" => Compound::Wet,
            _ => Compound::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
            Compound::Unknown => "UNKNOWN",
        }
    }
}

impl From<String> for Compound {
    fn from(value: String) -> Self {
        Compound::parse(&value)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn driver_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_driver_code(&raw))
}

/// Lap numbers arrive as integers or as numeric strings. Anything that is not a
/// whole, non-negative number fits no stint, so it is rejected.
fn lap_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    match raw.as_finite() {
        Some(n) if n >= 0. && n.fract() == 0. && n <= u32::MAX as f64 => Ok(n as u32),
        _ => Err(serde::de::Error::custom(format!(
            "invalid lap number {:?}",
            raw
        ))),
    }
}

/// Driver codes are compared case-sensitively everywhere else, so they are
/// trimmed and uppercased once on the way in.
pub fn normalize_driver_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    pub name: String,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub round: Option<u32>,
}

/// One lap row as received. `lap_time` may be missing, zero or non-numeric.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawLap {
    #[serde(deserialize_with = "driver_code")]
    pub driver_code: String,
    #[serde(deserialize_with = "lap_number")]
    pub lap_number: u32,
    #[serde(default)]
    pub lap_time: Option<RawNumber>,
}

impl RawLap {
    pub fn new(driver_code: &str, lap_number: u32, lap_time: Option<RawNumber>) -> Self {
        Self {
            driver_code: normalize_driver_code(driver_code),
            lap_number,
            lap_time,
        }
    }

    pub fn timed(driver_code: &str, lap_number: u32, lap_time: f64) -> Self {
        Self::new(driver_code, lap_number, Some(RawNumber::Number(lap_time)))
    }
}

/// A validated lap: `lap_time` is finite and strictly positive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapDetail {
    pub lap_number: u32,
    pub lap_time: f64,
}

impl LapDetail {
    pub fn new(lap_number: u32, lap_time: f64) -> Self {
        Self {
            lap_number,
            lap_time,
        }
    }
}

/// A stint boundary supplied by the data source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeclaredStint {
    #[serde(deserialize_with = "driver_code")]
    pub driver_code: String,
    pub compound: Compound,
    #[serde(deserialize_with = "lap_number")]
    pub start_lap: u32,
    #[serde(deserialize_with = "lap_number")]
    pub end_lap: u32,
}

impl DeclaredStint {
    pub fn new(driver_code: &str, compound: Compound, start_lap: u32, end_lap: u32) -> Self {
        Self {
            driver_code: normalize_driver_code(driver_code),
            compound,
            start_lap,
            end_lap,
        }
    }

    pub fn contains(&self, lap_number: u32) -> bool {
        lap_number >= self.start_lap && lap_number <= self.end_lap
    }
}

/// A declared stint with the laps that fall inside it, ordered by lap number.
#[derive(Clone, Debug, PartialEq)]
pub struct TireStint {
    pub compound: Compound,
    pub start_lap: u32,
    pub end_lap: u32,
    pub lap_details: Vec<LapDetail>,
}

impl TireStint {
    /// Declared length, `end_lap - start_lap + 1`. An inverted range has length 0.
    pub fn stint_length(&self) -> u32 {
        if self.end_lap >= self.start_lap {
            self.end_lap - self.start_lap + 1
        } else {
            0
        }
    }
}

/// A classification row. `position` is kept raw: DNF/DNS/DSQ sentinels are
/// filtered out when the position index is built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RaceResult {
    #[serde(deserialize_with = "driver_code")]
    pub driver_code: String,
    #[serde(default)]
    pub position: Option<RawNumber>,
}

impl RaceResult {
    pub fn new(driver_code: &str, position: Option<RawNumber>) -> Self {
        Self {
            driver_code: normalize_driver_code(driver_code),
            position,
        }
    }

    pub fn classified(driver_code: &str, position: u32) -> Self {
        Self::new(driver_code, Some(RawNumber::Number(position as f64)))
    }
}

/// One line of a session file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SessionRecord {
    Session(SessionInfo),
    Stint(DeclaredStint),
    Lap(RawLap),
    Result(RaceResult),
}

/// Everything known about one driver in a session, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverSession {
    pub driver_code: String,
    pub stints: Vec<DeclaredStint>,
    pub laps: Vec<RawLap>,
}

impl DriverSession {
    pub fn new(driver_code: &str) -> Self {
        Self {
            driver_code: normalize_driver_code(driver_code),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionData {
    pub info: Option<SessionInfo>,
    /// Drivers in order of first appearance in the record stream
    pub drivers: Vec<DriverSession>,
    pub results: Vec<RaceResult>,
}

impl SessionData {
    pub fn from_records(records: impl IntoIterator<Item = SessionRecord>) -> Self {
        let mut data = SessionData::default();
        for record in records {
            match record {
                SessionRecord::Session(info) => data.info = Some(info),
                SessionRecord::Stint(stint) => {
                    data.driver_mut(&stint.driver_code).stints.push(stint);
                }
                SessionRecord::Lap(lap) => {
                    data.driver_mut(&lap.driver_code).laps.push(lap);
                }
                SessionRecord::Result(result) => data.results.push(result),
            }
        }
        data
    }

    pub fn driver(&self, driver_code: &str) -> Option<&DriverSession> {
        self.drivers.iter().find(|d| d.driver_code == driver_code)
    }

    fn driver_mut(&mut self, driver_code: &str) -> &mut DriverSession {
        let idx = match self
            .drivers
            .iter()
            .position(|d| d.driver_code == driver_code)
        {
            Some(idx) => idx,
            None => {
                self.drivers.push(DriverSession::new(driver_code));
                self.drivers.len() - 1
            }
        };
        &mut self.drivers[idx]
    }

    pub fn lap_count(&self) -> usize {
        self.drivers.iter().map(|d| d.laps.len()).sum()
    }
}
