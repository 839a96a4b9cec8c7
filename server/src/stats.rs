//! # Vote Statistics
//!
//! Single-pass tally over the raw form rows. Row 0 is the header and is
//! excluded from every count. Timestamps are treated as UTC-naive; the
//! sheet carries no timezone information, so the trailing-week window is
//! whatever the wall clock says at call time.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::error::AppError;

const REQUESTS_COLUMN: usize = 4;

const ANONYMOUS: &str = "Anonymous";
const NO_RESPONSE: &str = "No response";

/// Formats seen in form exports. Google Forms writes the first one.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_votes: usize,
    pub this_week: usize,
    pub top_requests: Vec<TopRequest>,
    pub live_request: LiveRequest,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TopRequest {
    pub request: String,
    pub count: u32,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct LiveRequest {
    pub name: String,
    pub response: String,
}

/// Builds one immutable snapshot from the raw rows.
///
/// `pick` chooses the live-request response index out of `len` candidates.
/// Production wires it to a uniform random draw; tests pass something
/// deterministic.
pub fn build_snapshot(
    rows: &[Vec<String>],
    now: NaiveDateTime,
    pick: impl Fn(usize) -> usize,
) -> Result<StatsSnapshot, AppError> {
    if rows.is_empty() {
        return Err(AppError::NoData);
    }

    let data = &rows[1..];

    Ok(StatsSnapshot {
        total_votes: data.len(),
        this_week: count_this_week(data, now),
        top_requests: top_requests(tally_requests(data)),
        live_request: live_request(data.last(), pick),
    })
}

fn count_this_week(data: &[Vec<String>], now: NaiveDateTime) -> usize {
    let week_ago = now - Duration::days(7);

    data.iter()
        .filter_map(|row| row.first())
        .filter_map(|cell| parse_timestamp(cell))
        .filter(|ts| *ts >= week_ago && *ts <= now)
        .count()
}

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(cell, format).ok())
}

/// Occurrence counts for column E, first-seen order preserved. Labels are
/// counted case-sensitively; canonicalization is the display side's job.
fn tally_requests(data: &[Vec<String>]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for row in data {
        let Some(cell) = row.get(REQUESTS_COLUMN) else {
            continue;
        };

        if cell.trim().is_empty() {
            continue;
        }

        for piece in cell.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match counts.iter_mut().find(|(label, _)| label == piece) {
                Some((_, count)) => *count += 1,
                None => counts.push((piece.to_string(), 1)),
            }
        }
    }

    counts
}

fn top_requests(mut counts: Vec<(String, u32)>) -> Vec<TopRequest> {
    // Stable sort, so ties keep their first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(3);

    counts
        .into_iter()
        .map(|(request, count)| TopRequest { request, count })
        .collect()
}

fn live_request(latest: Option<&Vec<String>>, pick: impl Fn(usize) -> usize) -> LiveRequest {
    let Some(latest) = latest.filter(|row| row.len() > 1) else {
        return LiveRequest {
            name: ANONYMOUS.to_string(),
            response: NO_RESPONSE.to_string(),
        };
    };

    let name = match latest[1].trim() {
        "" => ANONYMOUS.to_string(),
        name => name.to_string(),
    };

    let candidates: Vec<&str> = latest[2..]
        .iter()
        .flat_map(|cell| cell.split(','))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    let response = if candidates.is_empty() {
        NO_RESPONSE.to_string()
    } else {
        candidates[pick(candidates.len()) % candidates.len()].to_string()
    };

    LiveRequest { name, response }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&["Timestamp", "Name", "Q1", "Q2", "Requests"])
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_total_excludes_header() {
        let rows = vec![header(), row(&["6/14/2025 10:00:00"]), row(&["junk"])];

        let snapshot = build_snapshot(&rows, now(), |_| 0).unwrap();
        assert_eq!(snapshot.total_votes, 2);
    }

    #[test]
    fn test_empty_rows_is_no_data() {
        assert!(matches!(
            build_snapshot(&[], now(), |_| 0),
            Err(AppError::NoData)
        ));
    }

    #[test]
    fn test_this_week_window() {
        let rows = vec![
            header(),
            row(&["6/14/2025 10:00:00"]), // yesterday
            row(&["6/8/2025 12:00:00"]),  // exactly 7 days ago, inclusive
            row(&["6/1/2025 09:00:00"]),  // too old
            row(&["not a date"]),         // skipped, not fatal
        ];

        let snapshot = build_snapshot(&rows, now(), |_| 0).unwrap();
        assert_eq!(snapshot.this_week, 2);
        assert_eq!(snapshot.total_votes, 4);
    }

    #[test]
    fn test_tally_is_case_sensitive_and_skips_blanks() {
        let data = vec![
            row(&["", "", "", "", "Red Bull, Chips"]),
            row(&["", "", "", "", "chips"]),
            row(&["", "", "", "", ""]),
        ];

        let counts = tally_requests(&data);
        assert_eq!(
            counts,
            vec![
                ("Red Bull".to_string(), 1),
                ("Chips".to_string(), 1),
                ("chips".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_requests_tie_break_and_truncation() {
        let mut data = Vec::new();
        for (label, count) in [("A", 5), ("B", 5), ("C", 3), ("D", 1)] {
            for _ in 0..count {
                data.push(row(&["", "", "", "", label]));
            }
        }

        let top = top_requests(tally_requests(&data));
        assert_eq!(
            top,
            vec![
                TopRequest { request: "A".to_string(), count: 5 },
                TopRequest { request: "B".to_string(), count: 5 },
                TopRequest { request: "C".to_string(), count: 3 },
            ]
        );
    }

    #[test]
    fn test_fewer_than_three_labels() {
        let data = vec![row(&["", "", "", "", "Kurkure"])];

        let top = top_requests(tally_requests(&data));
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_live_request_picks_across_columns() {
        let latest = row(&["6/14/2025 10:00:00", "Priya", "Red Bull, Lays", "", "Kurkure"]);

        let live = live_request(Some(&latest), |_| 2);
        assert_eq!(
            live,
            LiveRequest {
                name: "Priya".to_string(),
                response: "Kurkure".to_string(),
            }
        );
    }

    #[test]
    fn test_live_request_fallbacks() {
        let blank_name = row(&["6/14/2025 10:00:00", "", "Lays"]);
        let live = live_request(Some(&blank_name), |_| 0);
        assert_eq!(live.name, "Anonymous");
        assert_eq!(live.response, "Lays");

        let no_answers = row(&["6/14/2025 10:00:00", "Priya"]);
        let live = live_request(Some(&no_answers), |_| 0);
        assert_eq!(live.response, "No response");

        let short = row(&["6/14/2025 10:00:00"]);
        let live = live_request(Some(&short), |_| 0);
        assert_eq!(live.name, "Anonymous");
        assert_eq!(live.response, "No response");
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("6/14/2025 10:00:00").is_some());
        assert!(parse_timestamp("2025-06-14 10:00:00").is_some());
        assert!(parse_timestamp(" 6/14/2025 10:00 ").is_some());
        assert!(parse_timestamp("June 14th").is_none());
    }
}
