//! Synthetic engagement data for trying the pipeline without an upload.

use chrono::{Duration, NaiveDate};
use mediadash_core::CanonicalField;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::table::RawTable;

const PLATFORMS: [&str; 4] = ["Instagram", "TikTok", "Twitter", "Facebook"];
const LOCATIONS: [&str; 5] = ["Jakarta", "Surabaya", "Bandung", "Medan", "Makassar"];
const MEDIA_TYPES: [&str; 4] = ["Image", "Video", "Text", "Carousel"];
const SENTIMENT_WEIGHTS: [(&str, f64); 3] =
    [("Positive", 0.5), ("Negative", 0.2), ("Neutral", 0.3)];
const ENGAGEMENT_RANGE: std::ops::Range<u32> = 100..5000;
const DEMO_START: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(day) => day,
    None => NaiveDate::MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoOptions {
    /// Number of rows; one per day starting at `start`.
    pub rows: usize,
    /// Fixed seed for reproducible output. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub start: NaiveDate,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            rows: 100,
            seed: None,
            start: DEMO_START,
        }
    }
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values[rng.random_range(0..values.len())]
}

fn pick_sentiment<R: Rng>(rng: &mut R) -> &'static str {
    let mut roll: f64 = rng.random();
    for (label, weight) in SENTIMENT_WEIGHTS {
        if roll < weight {
            return label;
        }
        roll -= weight;
    }
    SENTIMENT_WEIGHTS[SENTIMENT_WEIGHTS.len() - 1].0
}

/// Generates a raw table with the six canonical columns, one row per day.
///
/// Cells are strings, exactly as a CSV upload would provide them, so the
/// result goes through the normal normalize and clean stages.
#[must_use]
pub fn generate_demo(options: &DemoOptions) -> RawTable {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let columns = CanonicalField::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect();

    let mut rows = Vec::with_capacity(options.rows);
    let mut day = options.start;
    for _ in 0..options.rows {
        let row: Vec<Option<String>> = vec![
            Some(day.format("%Y-%m-%d").to_string()),
            Some(pick(&mut rng, &PLATFORMS).to_string()),
            Some(pick_sentiment(&mut rng).to_string()),
            Some(pick(&mut rng, &LOCATIONS).to_string()),
            Some(rng.random_range(ENGAGEMENT_RANGE).to_string()),
            Some(pick(&mut rng, &MEDIA_TYPES).to_string()),
        ];
        rows.push(row);
        day = day.checked_add_signed(Duration::days(1)).unwrap_or(day);
    }

    tracing::debug!(rows = rows.len(), seed = ?options.seed, "demo dataset generated");

    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::pipeline::prepare;

    fn seeded(rows: usize, seed: u64) -> DemoOptions {
        DemoOptions {
            rows,
            seed: Some(seed),
            ..DemoOptions::default()
        }
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(generate_demo(&seeded(30, 7)), generate_demo(&seeded(30, 7)));
    }

    #[test]
    fn demo_passes_through_cleaning_untouched() {
        let (ds, stats) = prepare(generate_demo(&seeded(100, 42))).unwrap();
        assert_eq!(ds.len(), 100);
        assert_eq!(stats.dropped_rows, 0);
        assert_eq!(stats.defaulted_engagements, 0);

        let first = ds.records()[0].day();
        let last = ds.records()[99].day();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 4, 9).unwrap());
    }

    #[test]
    fn values_come_from_the_fixed_vocabularies() {
        let (ds, _) = prepare(generate_demo(&seeded(200, 3))).unwrap();
        let platforms: HashSet<&str> = PLATFORMS.into_iter().collect();
        let locations: HashSet<&str> = LOCATIONS.into_iter().collect();
        let media: HashSet<&str> = MEDIA_TYPES.into_iter().collect();
        for r in &ds {
            assert!(platforms.contains(r.platform.as_str()));
            assert!(locations.contains(r.location.as_str()));
            assert!(media.contains(r.media_type.as_str()));
            assert!((100..5000).contains(&r.engagements));
        }
    }

    #[test]
    fn sentiment_mix_follows_weights() {
        let (ds, _) = prepare(generate_demo(&seeded(2000, 11))).unwrap();
        let positive = ds
            .iter()
            .filter(|r| r.sentiment == mediadash_core::Sentiment::Positive)
            .count();
        // Expect about 1000; the band is wide enough to be seed-independent.
        assert!((800..1200).contains(&positive), "positive = {positive}");
    }

    #[test]
    fn zero_rows_gives_header_only_table() {
        let table = generate_demo(&seeded(0, 1));
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 6);
    }
}
