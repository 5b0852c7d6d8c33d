use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{Dataset, Sentiment};
use crate::CoreError;

/// Immutable set of predicates narrowing a [`Dataset`].
///
/// The date range is inclusive on both ends at calendar-day granularity, so
/// `end_date` covers its entire day. Construction guarantees
/// `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    start_date: NaiveDate,
    end_date: NaiveDate,
    allowed_platforms: BTreeSet<String>,
    allowed_sentiments: BTreeSet<Sentiment>,
    allowed_media_types: BTreeSet<String>,
}

impl FilterSpec {
    /// Builds a filter spec.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDateRange`] if `start_date` is after `end_date`.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        allowed_platforms: BTreeSet<String>,
        allowed_sentiments: BTreeSet<Sentiment>,
        allowed_media_types: BTreeSet<String>,
    ) -> Result<Self, CoreError> {
        if start_date > end_date {
            return Err(CoreError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            allowed_platforms,
            allowed_sentiments,
            allowed_media_types,
        })
    }

    /// The permissive default: the dataset's full date range and every
    /// platform, sentiment, and media type it contains.
    ///
    /// Returns `None` for an empty dataset, which has no date range.
    #[must_use]
    pub fn covering(dataset: &Dataset) -> Option<Self> {
        let (start_date, end_date) = dataset.date_bounds()?;
        Some(Self {
            start_date,
            end_date,
            allowed_platforms: dataset.platforms().into_iter().map(String::from).collect(),
            allowed_sentiments: dataset.sentiments().into_iter().collect(),
            allowed_media_types: dataset
                .media_types()
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn allowed_platforms(&self) -> &BTreeSet<String> {
        &self.allowed_platforms
    }

    #[must_use]
    pub fn allowed_sentiments(&self) -> &BTreeSet<Sentiment> {
        &self.allowed_sentiments
    }

    #[must_use]
    pub fn allowed_media_types(&self) -> &BTreeSet<String> {
        &self.allowed_media_types
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::record::Record;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn new_rejects_inverted_range() {
        let err = FilterSpec::new(
            day(10),
            day(1),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateRange { .. }));
    }

    #[test]
    fn new_accepts_single_day_range() {
        let spec = FilterSpec::new(
            day(4),
            day(4),
            BTreeSet::new(),
            BTreeSet::new(),
            BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(spec.start_date(), spec.end_date());
    }

    #[test]
    fn covering_empty_dataset_is_none() {
        assert!(FilterSpec::covering(&Dataset::default()).is_none());
    }

    #[test]
    fn covering_includes_every_distinct_value() {
        let mk = |d: u32, platform: &str, sentiment: Sentiment, media: &str| Record {
            date: day(d).and_hms_opt(13, 30, 0).unwrap(),
            platform: platform.to_string(),
            sentiment,
            location: "Medan".to_string(),
            engagements: 1,
            media_type: media.to_string(),
        };
        let ds = Dataset::new(vec![
            mk(3, "TikTok", Sentiment::Negative, "Video"),
            mk(1, "Instagram", Sentiment::Positive, "Image"),
        ]);

        let spec = FilterSpec::covering(&ds).unwrap();
        assert_eq!(spec.start_date(), day(1));
        assert_eq!(spec.end_date(), day(3));
        assert!(spec.allowed_platforms().contains("TikTok"));
        assert!(spec.allowed_platforms().contains("Instagram"));
        assert_eq!(spec.allowed_sentiments().len(), 2);
        assert!(!spec.allowed_sentiments().contains(&Sentiment::Neutral));
        assert_eq!(spec.allowed_media_types().len(), 2);
    }
}
