use std::collections::HashSet;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The six fields every downstream stage assumes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Date,
    Platform,
    Sentiment,
    Location,
    Engagements,
    MediaType,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Date,
        CanonicalField::Platform,
        CanonicalField::Sentiment,
        CanonicalField::Location,
        CanonicalField::Engagements,
        CanonicalField::MediaType,
    ];

    /// Column name used in normalized tables and exports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Date => "date",
            CanonicalField::Platform => "platform",
            CanonicalField::Sentiment => "sentiment",
            CanonicalField::Location => "location",
            CanonicalField::Engagements => "engagements",
            CanonicalField::MediaType => "media_type",
        }
    }

    /// Looks up the field whose canonical name equals `name` exactly.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Best-effort classification of a free-text sentiment label.
    ///
    /// Missing values are Neutral. Otherwise the lower-cased label is checked
    /// for `"pos"` first, then `"neg"`; anything else is Neutral. This means
    /// `"Slightly Negative vibes"` is Negative and `"non-positive"` is Positive.
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Sentiment::Neutral;
        };
        let lower = raw.to_lowercase();
        if lower.contains("pos") {
            Sentiment::Positive
        } else if lower.contains("neg") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict, case-insensitive parse of a canonical sentiment name.
///
/// Used for user-supplied filter values, where a typo should be an error
/// rather than silently becoming Neutral.
impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            _ => Err(CoreError::UnknownSentiment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Sentiment {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.as_str().to_string()
    }
}

/// One social-media post after cleaning. Every field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Time-zone-naive timestamp; grouping uses its calendar day.
    pub date: NaiveDateTime,
    pub platform: String,
    pub sentiment: Sentiment,
    pub location: String,
    pub engagements: u64,
    pub media_type: String,
}

impl Record {
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// An ordered collection of cleaned records.
///
/// Stages never mutate a `Dataset`; filtering and cleaning build new ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Earliest and latest calendar day present, or `None` when empty.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut days = self.records.iter().map(Record::day);
        let first = days.next()?;
        Some(days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Distinct platforms in first-encounter order.
    #[must_use]
    pub fn platforms(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.platform.as_str()))
    }

    /// Distinct media types in first-encounter order.
    #[must_use]
    pub fn media_types(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.media_type.as_str()))
    }

    /// Distinct sentiments in first-encounter order.
    #[must_use]
    pub fn sentiments(&self) -> Vec<Sentiment> {
        distinct(self.records.iter().map(|r| r.sentiment))
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Copy + Eq + std::hash::Hash,
    I: Iterator<Item = T>,
{
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
