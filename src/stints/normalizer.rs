use crate::session::{LapDetail, RawLap};

/// Keep only laps with a finite, strictly positive lap time, in input order.
///
/// In-laps, out-laps, safety car laps and DNF laps often arrive without a usable
/// time. They are dropped silently rather than reported.
pub fn normalize_laps<'a>(raw_laps: impl IntoIterator<Item = &'a RawLap>) -> Vec<LapDetail> {
    raw_laps
        .into_iter()
        .filter_map(|lap| {
            let lap_time = lap.lap_time.as_ref()?.as_finite()?;
            (lap_time > 0.).then(|| LapDetail::new(lap.lap_number, lap_time))
        })
        .collect()
}
