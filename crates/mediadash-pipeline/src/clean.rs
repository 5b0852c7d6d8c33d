//! Per-field type coercion and repair.
//!
//! Each canonical column is cleaned independently. The only rule that drops
//! a row is an unparseable `date`; every other defect is repaired in place
//! with a documented default.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mediadash_core::{CanonicalField, Dataset, Record, Sentiment};
use serde::Serialize;

use crate::schema::NormalizedTable;

const DEFAULT_PLATFORM: &str = "Other";
const DEFAULT_LOCATION: &str = "Unknown";
const DEFAULT_MEDIA_TYPE: &str = "Unknown";

/// Date-time layouts tried in order after RFC 3339. `%.f` makes fractional
/// seconds optional.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts. Month-first slash dates are tried before day-first, so
/// `03/04/2024` is March 4 and `13/04/2024` is April 13.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Diagnostics from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Rows removed because their date did not parse.
    pub dropped_rows: usize,
    /// Engagement cells that were missing or non-numeric and became 0.
    pub defaulted_engagements: usize,
    /// Negative engagement values clamped to 0.
    pub clamped_engagements: usize,
    /// Engagement values too large for `u64`, saturated.
    pub saturated_engagements: usize,
    pub defaulted_sentiments: usize,
    pub defaulted_platforms: usize,
    pub defaulted_locations: usize,
    pub defaulted_media_types: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngagementFix {
    None,
    Defaulted,
    Clamped,
    Saturated,
}

/// Parses a date or date-time in any recognized layout.
///
/// Offsets in RFC 3339 input are discarded and the local wall-clock time is
/// kept. Date-only input is midnight.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Coerces an engagement cell to a non-negative count.
///
/// Missing, non-numeric, and non-finite values become 0. Fractions are
/// truncated toward zero, negatives clamp to 0, and values beyond `u64::MAX`
/// saturate.
fn parse_engagements(raw: Option<&str>) -> (u64, EngagementFix) {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return (0, EngagementFix::Defaulted);
    };

    if let Ok(n) = text.parse::<i128>() {
        return if n < 0 {
            (0, EngagementFix::Clamped)
        } else {
            u64::try_from(n).map_or((u64::MAX, EngagementFix::Saturated), |v| {
                (v, EngagementFix::None)
            })
        };
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => {
            let t = f.trunc();
            if t < 0.0 {
                (0, EngagementFix::Clamped)
            } else if t >= 18_446_744_073_709_551_616.0 {
                (u64::MAX, EngagementFix::Saturated)
            } else {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let v = t as u64;
                (v, EngagementFix::None)
            }
        }
        _ => (0, EngagementFix::Defaulted),
    }
}

/// A cell counts as missing when absent or whitespace-only.
fn present(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !c.trim().is_empty())
}

fn or_default(cell: Option<&str>, default: &str, counter: &mut usize) -> String {
    if let Some(value) = present(cell) {
        value.to_string()
    } else {
        *counter += 1;
        default.to_string()
    }
}

/// Cleans a normalized table into a fully typed [`Dataset`].
///
/// Rows whose `date` does not parse are dropped; this silently shrinks the
/// dataset, so the count is returned in [`CleaningStats::dropped_rows`] and
/// logged as a warning. All other fields are repaired:
///
/// - `engagements`: see the coercion policy on missing/invalid/negative values
/// - `sentiment`: [`Sentiment::classify`], missing is Neutral
/// - `platform`: missing is `"Other"`
/// - `location` and `media_type`: missing is `"Unknown"`
///
/// Cleaning an already-clean dataset (via [`crate::RawTable::from_dataset`])
/// changes nothing.
#[must_use]
pub fn clean(table: &NormalizedTable) -> (Dataset, CleaningStats) {
    let mut stats = CleaningStats {
        input_rows: table.len(),
        ..CleaningStats::default()
    };
    let mut records = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let Some(date) = table.value(row, CanonicalField::Date).and_then(parse_date) else {
            stats.dropped_rows += 1;
            continue;
        };

        let (engagements, fix) = parse_engagements(table.value(row, CanonicalField::Engagements));
        match fix {
            EngagementFix::None => {}
            EngagementFix::Defaulted => stats.defaulted_engagements += 1,
            EngagementFix::Clamped => stats.clamped_engagements += 1,
            EngagementFix::Saturated => stats.saturated_engagements += 1,
        }

        let raw_sentiment = present(table.value(row, CanonicalField::Sentiment));
        if raw_sentiment.is_none() {
            stats.defaulted_sentiments += 1;
        }

        records.push(Record {
            date,
            platform: or_default(
                table.value(row, CanonicalField::Platform),
                DEFAULT_PLATFORM,
                &mut stats.defaulted_platforms,
            ),
            sentiment: Sentiment::classify(raw_sentiment),
            location: or_default(
                table.value(row, CanonicalField::Location),
                DEFAULT_LOCATION,
                &mut stats.defaulted_locations,
            ),
            engagements,
            media_type: or_default(
                table.value(row, CanonicalField::MediaType),
                DEFAULT_MEDIA_TYPE,
                &mut stats.defaulted_media_types,
            ),
        });
    }

    stats.output_rows = records.len();

    if stats.dropped_rows > 0 {
        tracing::warn!(
            dropped = stats.dropped_rows,
            kept = stats.output_rows,
            "dropped rows with unparseable dates"
        );
    }
    tracing::info!(
        rows = stats.output_rows,
        defaulted_engagements = stats.defaulted_engagements,
        clamped_engagements = stats.clamped_engagements,
        "dataset cleaned"
    );

    (Dataset::new(records), stats)
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
