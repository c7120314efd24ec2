// Plain-text rendering of stint rows for the terminal.

use itertools::Itertools;

use crate::{
    analysis::{DriverStanding, RowOrder},
    ordering::SortDirection,
    stints::DriverStintRecord,
};

pub const NOT_AVAILABLE: &str = "N/A";

const HEADERS: [&str; 8] = [
    "Driver",
    "Stint",
    "Compound",
    "Laps",
    "Range",
    "Fastest",
    "Consistency",
    "Degradation",
];

/// Format seconds as `m:ss.fff`, or `ss.fff` under a minute.
pub fn format_lap_time(seconds: f64, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    let seconds = (seconds * scale).round() / scale;
    if seconds < 60. {
        return format!("{:.*}", precision, seconds);
    }
    let minutes = (seconds / 60.).floor();
    let remainder = seconds - minutes * 60.;
    let width = if precision > 0 { precision + 3 } else { 2 };
    format!(
        "{}:{:0width$.prec$}",
        minutes as u64,
        remainder,
        width = width,
        prec = precision
    )
}

fn or_na(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn row_cells(row: &DriverStintRecord, precision: usize) -> [String; 8] {
    [
        row.driver_code.clone(),
        row.stint_number.to_string(),
        row.compound.to_string(),
        row.stint_length.to_string(),
        format!("{}-{}", row.start_lap, row.end_lap),
        or_na(row.fastest_lap, |v| format_lap_time(v, precision)),
        or_na(row.consistency, |v| format!("{:.*}", precision, v)),
        or_na(row.degradation, |v| format!("{:+.*}", precision, v)),
    ]
}

fn render<H: AsRef<str>, const N: usize>(headers: [H; N], rows: Vec<[String; N]>) -> String {
    let mut widths = headers.each_ref().map(|h| h.as_ref().len());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| format!("{:<w$}", h.as_ref(), w = *w))
        .join("  ");
    let separator = widths.iter().map(|w| "-".repeat(*w)).join("  ");
    let body = rows.iter().map(|cells| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .join("  ")
    });

    std::iter::once(header_line)
        .chain(std::iter::once(separator))
        .chain(body)
        .map(|line| line.trim_end().to_string())
        .join("\n")
}

/// Render stint rows as an aligned text table. Missing metrics show as `N/A`.
pub fn render_table(rows: &[DriverStintRecord], precision: usize) -> String {
    render(
        HEADERS,
        rows.iter().map(|r| row_cells(r, precision)).collect_vec(),
    )
}

/// Like [`render_table`], with the sort column's header marked when rows are
/// ordered by a column.
pub fn render_ordered_table(
    rows: &[DriverStintRecord],
    precision: usize,
    order: RowOrder,
) -> String {
    let RowOrder::Column(key, direction) = order else {
        return render_table(rows, precision);
    };
    let marker = match direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    let headers = HEADERS.map(|h| {
        if h == key.label() {
            format!("{} ({})", h, marker)
        } else {
            h.to_string()
        }
    });
    render(
        headers,
        rows.iter().map(|r| row_cells(r, precision)).collect_vec(),
    )
}

pub fn render_standings(standings: &[DriverStanding]) -> String {
    render(
        ["Pos", "Driver", "Stints"],
        standings
            .iter()
            .map(|s| {
                [
                    s.position
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    s.driver_code.clone(),
                    s.stint_count.to_string(),
                ]
            })
            .collect_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ordering::SortKey, session::Compound};

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(92.345, 3), "1:32.345");
        assert_eq!(format_lap_time(58.2, 3), "58.200");
        assert_eq!(format_lap_time(61.05, 2), "1:01.05");
        assert_eq!(format_lap_time(119.9996, 3), "2:00.000");
        assert_eq!(format_lap_time(125.4, 0), "2:05");
    }

    #[test]
    fn test_render_table_shows_na_for_missing_metrics() {
        let rows = vec![
            DriverStintRecord {
                driver_code: "VER".to_string(),
                stint_number: 1,
                compound: Compound::Soft,
                start_lap: 1,
                end_lap: 18,
                stint_length: 18,
                fastest_lap: Some(93.412),
                consistency: Some(0.2841),
                degradation: Some(0.0627),
            },
            DriverStintRecord {
                driver_code: "VER".to_string(),
                stint_number: 2,
                compound: Compound::Hard,
                start_lap: 19,
                end_lap: 20,
                stint_length: 2,
                fastest_lap: None,
                consistency: None,
                degradation: None,
            },
        ];

        let table = render_table(&rows, 3);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Driver  Stint  Compound"));
        assert!(lines[2].contains("1:33.412"));
        assert!(lines[2].contains("0.284"));
        assert!(lines[2].contains("+0.063"));
        assert!(lines[2].contains("1-18"));
        assert_eq!(lines[3].matches(NOT_AVAILABLE).count(), 3);
    }

    #[test]
    fn test_ordered_table_marks_sort_column() {
        let rows = vec![DriverStintRecord {
            driver_code: "ALB".to_string(),
            stint_number: 1,
            compound: Compound::Medium,
            start_lap: 1,
            end_lap: 30,
            stint_length: 30,
            fastest_lap: Some(95.0),
            consistency: None,
            degradation: None,
        }];

        let table = render_ordered_table(
            &rows,
            3,
            RowOrder::Column(SortKey::Degradation, SortDirection::Descending),
        );
        let header = table.lines().next().unwrap();
        assert!(header.ends_with("Degradation (desc)"));

        let table = render_ordered_table(
            &rows,
            3,
            RowOrder::Column(SortKey::StintLength, SortDirection::Ascending),
        );
        assert!(table.lines().next().unwrap().contains("Laps (asc)"));

        for key in SortKey::ALL {
            assert!(HEADERS.contains(&key.label()));
        }

        assert_eq!(
            render_ordered_table(&rows, 3, RowOrder::RaceResult),
            render_table(&rows, 3)
        );
    }

    #[test]
    fn test_render_standings() {
        let table = render_standings(&[
            DriverStanding {
                driver_code: "PIA".to_string(),
                position: Some(1),
                stint_count: 2,
            },
            DriverStanding {
                driver_code: "LAW".to_string(),
                position: None,
                stint_count: 1,
            },
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2], "1    PIA     2");
        assert_eq!(lines[3], "-    LAW     1");
    }
}
