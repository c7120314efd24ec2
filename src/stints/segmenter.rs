use std::collections::HashSet;

use crate::session::{DeclaredStint, LapDetail, TireStint};

/// Assign laps to the declared stints that contain them.
///
/// Produces one [`TireStint`] per declared range, in declaration order. A lap
/// outside every range is left out. When ranges overlap the first declared
/// range that contains the lap wins. Within a stint laps are ordered by lap
/// number and a repeated lap number keeps only its first occurrence.
pub fn segment_stints(declared: &[DeclaredStint], laps: &[LapDetail]) -> Vec<TireStint> {
    let mut stints: Vec<TireStint> = declared
        .iter()
        .map(|d| TireStint {
            compound: d.compound,
            start_lap: d.start_lap,
            end_lap: d.end_lap,
            lap_details: Vec::new(),
        })
        .collect();

    let mut seen: HashSet<u32> = HashSet::new();
    for lap in laps {
        let Some(idx) = declared.iter().position(|d| d.contains(lap.lap_number)) else {
            continue;
        };
        if seen.insert(lap.lap_number) {
            stints[idx].lap_details.push(*lap);
        }
    }

    for stint in stints.iter_mut() {
        stint.lap_details.sort_by_key(|l| l.lap_number);
    }
    stints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Compound;

    fn laps(numbers: &[u32]) -> Vec<LapDetail> {
        numbers
            .iter()
            .map(|n| LapDetail::new(*n, 90. + *n as f64 * 0.1))
            .collect()
    }

    #[test]
    fn test_assigns_laps_to_containing_stint() {
        let declared = vec![
            DeclaredStint::new("HAM", Compound::Medium, 1, 3),
            DeclaredStint::new("HAM", Compound::Hard, 4, 6),
        ];
        let stints = segment_stints(&declared, &laps(&[1, 2, 3, 4, 5, 6]));

        assert_eq!(stints.len(), 2);
        assert_eq!(stints[0].compound, Compound::Medium);
        let first: Vec<u32> = stints[0].lap_details.iter().map(|l| l.lap_number).collect();
        let second: Vec<u32> = stints[1].lap_details.iter().map(|l| l.lap_number).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(second, vec![4, 5, 6]);
    }

    #[test]
    fn test_sorts_laps_within_stint() {
        let declared = vec![DeclaredStint::new("RUS", Compound::Soft, 1, 10)];
        let stints = segment_stints(&declared, &laps(&[7, 2, 9, 4]));
        let numbers: Vec<u32> = stints[0].lap_details.iter().map(|l| l.lap_number).collect();
        assert_eq!(numbers, vec![2, 4, 7, 9]);
    }

    #[test]
    fn test_laps_outside_every_range_are_excluded() {
        let declared = vec![
            DeclaredStint::new("OCO", Compound::Medium, 2, 3),
            DeclaredStint::new("OCO", Compound::Hard, 6, 7),
        ];
        let stints = segment_stints(&declared, &laps(&[1, 2, 3, 4, 5, 6, 7, 8]));
        let total: usize = stints.iter().map(|s| s.lap_details.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_overlapping_ranges_first_match_wins() {
        let declared = vec![
            DeclaredStint::new("STR", Compound::Soft, 1, 5),
            DeclaredStint::new("STR", Compound::Hard, 4, 8),
        ];
        let stints = segment_stints(&declared, &laps(&[3, 4, 5, 6]));
        assert_eq!(stints[0].lap_details.len(), 3);
        assert_eq!(stints[1].lap_details.len(), 1);
        assert_eq!(stints[1].lap_details[0].lap_number, 6);
    }

    #[test]
    fn test_empty_declared_stint_is_still_emitted() {
        let declared = vec![DeclaredStint::new("ZHO", Compound::Wet, 30, 35)];
        let stints = segment_stints(&declared, &laps(&[1, 2]));
        assert_eq!(stints.len(), 1);
        assert!(stints[0].lap_details.is_empty());
        assert_eq!(stints[0].stint_length(), 6);
    }

    #[test]
    fn test_duplicate_lap_numbers_keep_first() {
        let declared = vec![DeclaredStint::new("TSU", Compound::Medium, 1, 5)];
        let input = vec![
            LapDetail::new(2, 91.0),
            LapDetail::new(2, 99.0),
            LapDetail::new(3, 91.5),
        ];
        let stints = segment_stints(&declared, &input);
        assert_eq!(
            stints[0].lap_details,
            vec![LapDetail::new(2, 91.0), LapDetail::new(3, 91.5)]
        );
    }
}
