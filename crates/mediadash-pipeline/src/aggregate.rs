//! Scalar KPIs and grouped summaries over a filtered dataset.
//!
//! Rankings sort descending with a stable sort over groups in first-encounter
//! order, so equal totals keep the order in which their keys first appeared
//! in the input.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use mediadash_core::{Dataset, Record, Sentiment};
use serde::Serialize;

/// Tuning for [`aggregate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Number of locations kept by the location rankings.
    pub top_n: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Summed engagements for one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub engagements: u64,
}

/// Row count for one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Sum, mean, and count of engagements for one group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: String,
    pub total: u64,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentStats {
    pub sentiment: Sentiment,
    pub total: u64,
    pub mean: f64,
    pub count: usize,
}

/// Post count and share (0-100) of one sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub sentiment: Sentiment,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub engagements: u64,
}

/// A calendar month. Orders chronologically; displays as `January 2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    #[must_use]
    pub fn of(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub engagements: u64,
}

/// Shape of the daily engagement series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTrend {
    /// Highest single-day total, 0 when there are no days.
    pub peak: u64,
    /// Mean of the daily totals, 0.0 when there are no days.
    pub mean: f64,
    /// Earliest day reaching `peak`.
    pub best_day: Option<NaiveDate>,
}

/// Executive summary derived from a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlights {
    pub top_platform: Option<GroupTotal>,
    pub best_media_type: Option<GroupTotal>,
    /// Weakest platform; only set when more than one platform is present.
    pub lowest_platform: Option<GroupTotal>,
    pub negative_pct: f64,
}

impl Highlights {
    /// Whether negative sentiment exceeds `threshold_pct`.
    #[must_use]
    pub fn negative_needs_attention(&self, threshold_pct: f64) -> bool {
        self.negative_pct > threshold_pct
    }
}

/// Read-only snapshot of KPIs and grouped tables for one filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub post_count: usize,
    pub total_engagement: u64,
    /// Integer-truncated mean engagement; 0 when there are no posts.
    pub avg_engagement: u64,
    /// Share of Positive posts, 0-100; 0 when there are no posts.
    pub positive_pct: f64,
    /// Engagement sum per platform, descending.
    pub platform_engagement: Vec<GroupTotal>,
    /// Post count per platform, descending.
    pub platform_post_counts: Vec<GroupCount>,
    /// Post count per media type, descending.
    pub media_type_counts: Vec<GroupCount>,
    /// Mean engagement per media type, descending by mean.
    pub media_type_engagement: Vec<GroupStats>,
    /// Top locations by engagement sum, descending.
    pub top_locations: Vec<GroupTotal>,
    /// Engagement sum per calendar day, ascending.
    pub daily_engagement: Vec<DailyPoint>,
    pub daily_trend: DailyTrend,
    /// Engagement sum per calendar month, ascending.
    pub monthly_engagement: Vec<MonthlyPoint>,
    /// Per-sentiment stats in Positive, Negative, Neutral order; absent
    /// sentiments are omitted.
    pub sentiment_engagement: Vec<SentimentStats>,
    pub sentiment_counts: Vec<SentimentShare>,
    /// Per-platform stats, descending by total.
    pub platform_summary: Vec<GroupStats>,
    /// Per-location stats for the top locations by total.
    pub location_summary: Vec<GroupStats>,
}

impl AggregateReport {
    #[must_use]
    pub fn highlights(&self) -> Highlights {
        let best_media_type = self
            .media_type_engagement
            .iter()
            .fold(None::<&GroupStats>, |best, s| match best {
                Some(b) if b.total >= s.total => Some(b),
                _ => Some(s),
            })
            .map(|s| GroupTotal {
                key: s.key.clone(),
                engagements: s.total,
            });

        let lowest_platform = if self.platform_engagement.len() > 1 {
            self.platform_engagement.last().cloned()
        } else {
            None
        };

        let negative_pct = self
            .sentiment_counts
            .iter()
            .find(|s| s.sentiment == Sentiment::Negative)
            .map_or(0.0, |s| s.pct);

        Highlights {
            top_platform: self.platform_engagement.first().cloned(),
            best_media_type,
            lowest_platform,
            negative_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: u64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, engagements: u64) {
        self.total = self.total.saturating_add(engagements);
        self.count += 1;
    }

    fn mean(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = self.total as f64 / self.count as f64;
        mean
    }
}

/// Groups records by `key`, returning groups in first-encounter order.
fn group_by<K, F>(records: &[Record], key: F) -> Vec<(K, Accumulator)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Record) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Accumulator)> = Vec::new();
    for record in records {
        let k = key(record);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Accumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(record.engagements);
    }
    groups
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = part as f64 * 100.0 / whole as f64;
    pct
}

fn totals_desc(groups: &[(String, Accumulator)]) -> Vec<GroupTotal> {
    let mut out: Vec<GroupTotal> = groups
        .iter()
        .map(|(key, acc)| GroupTotal {
            key: key.clone(),
            engagements: acc.total,
        })
        .collect();
    out.sort_by(|a, b| b.engagements.cmp(&a.engagements));
    out
}

fn counts_desc(groups: &[(String, Accumulator)]) -> Vec<GroupCount> {
    let mut out: Vec<GroupCount> = groups
        .iter()
        .map(|(key, acc)| GroupCount {
            key: key.clone(),
            count: acc.count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn stats(groups: &[(String, Accumulator)]) -> Vec<GroupStats> {
    groups
        .iter()
        .map(|(key, acc)| GroupStats {
            key: key.clone(),
            total: acc.total,
            mean: acc.mean(),
            count: acc.count,
        })
        .collect()
}

fn daily_trend(daily: &[DailyPoint]) -> DailyTrend {
    let mut trend = DailyTrend {
        peak: 0,
        mean: 0.0,
        best_day: None,
    };
    for point in daily {
        if trend.best_day.is_none() || point.engagements > trend.peak {
            trend.peak = point.engagements;
            trend.best_day = Some(point.day);
        }
    }
    if !daily.is_empty() {
        let sum: u64 = daily
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.engagements));
        #[allow(clippy::cast_precision_loss)]
        let mean = sum as f64 / daily.len() as f64;
        trend.mean = mean;
    }
    trend
}

/// Builds an [`AggregateReport`] with default options (top 5 locations).
#[must_use]
pub fn aggregate(dataset: &Dataset) -> AggregateReport {
    aggregate_with(dataset, &AggregateOptions::default())
}

/// Builds an [`AggregateReport`] from `dataset`.
///
/// An empty dataset yields zero KPIs and empty tables; callers that want to
/// present "no data" should check for emptiness before aggregating.
#[must_use]
pub fn aggregate_with(dataset: &Dataset, options: &AggregateOptions) -> AggregateReport {
    let records = dataset.records();
    let post_count = records.len();
    let total_engagement = records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.engagements));
    let avg_engagement = if post_count == 0 {
        0
    } else {
        total_engagement / post_count as u64
    };

    let by_platform = group_by(records, |r| r.platform.clone());
    let by_media = group_by(records, |r| r.media_type.clone());
    let by_location = group_by(records, |r| r.location.clone());
    let by_sentiment = group_by(records, |r| r.sentiment);

    let mut platform_summary = stats(&by_platform);
    platform_summary.sort_by(|a, b| b.total.cmp(&a.total));

    let mut media_type_engagement = stats(&by_media);
    media_type_engagement.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    let mut location_summary = stats(&by_location);
    location_summary.sort_by(|a, b| b.total.cmp(&a.total));
    location_summary.truncate(options.top_n);

    let mut top_locations = totals_desc(&by_location);
    top_locations.truncate(options.top_n);

    let sentiment_engagement: Vec<SentimentStats> = Sentiment::ALL
        .into_iter()
        .filter_map(|s| {
            by_sentiment
                .iter()
                .find(|(k, _)| *k == s)
                .map(|(_, acc)| SentimentStats {
                    sentiment: s,
                    total: acc.total,
                    mean: acc.mean(),
                    count: acc.count,
                })
        })
        .collect();

    let sentiment_counts: Vec<SentimentShare> = sentiment_engagement
        .iter()
        .map(|s| SentimentShare {
            sentiment: s.sentiment,
            count: s.count,
            pct: percentage(s.count, post_count),
        })
        .collect();

    let positive_pct = sentiment_counts
        .iter()
        .find(|s| s.sentiment == Sentiment::Positive)
        .map_or(0.0, |s| s.pct);

    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut monthly: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for record in records {
        let day = record.day();
        let d = daily.entry(day).or_default();
        *d = d.saturating_add(record.engagements);
        let m = monthly.entry(YearMonth::of(day)).or_default();
        *m = m.saturating_add(record.engagements);
    }
    let daily_engagement: Vec<DailyPoint> = daily
        .into_iter()
        .map(|(day, engagements)| DailyPoint { day, engagements })
        .collect();
    let monthly_engagement: Vec<MonthlyPoint> = monthly
        .into_iter()
        .map(|(month, engagements)| MonthlyPoint { month, engagements })
        .collect();

    tracing::debug!(
        posts = post_count,
        total_engagement,
        platforms = by_platform.len(),
        locations = by_location.len(),
        "aggregate report built"
    );

    AggregateReport {
        post_count,
        total_engagement,
        avg_engagement,
        positive_pct,
        platform_engagement: totals_desc(&by_platform),
        platform_post_counts: counts_desc(&by_platform),
        media_type_counts: counts_desc(&by_media),
        media_type_engagement,
        top_locations,
        daily_trend: daily_trend(&daily_engagement),
        daily_engagement,
        monthly_engagement,
        sentiment_engagement,
        sentiment_counts,
        platform_summary,
        location_summary,
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
