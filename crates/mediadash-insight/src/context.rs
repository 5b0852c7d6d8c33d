//! Text renderings of report slices, one per analysis category.

use std::fmt;
use std::str::FromStr;

use mediadash_pipeline::AggregateReport;

use crate::error::InsightError;

/// A named slice of an [`AggregateReport`] that can be sent for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisCategory {
    Sentiment,
    EngagementTrend,
    PlatformPerformance,
    MediaType,
    Geographic,
}

impl AnalysisCategory {
    pub const ALL: [AnalysisCategory; 5] = [
        AnalysisCategory::Sentiment,
        AnalysisCategory::EngagementTrend,
        AnalysisCategory::PlatformPerformance,
        AnalysisCategory::MediaType,
        AnalysisCategory::Geographic,
    ];

    /// Display label, also used as the category name inside prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AnalysisCategory::Sentiment => "Sentiment Analysis",
            AnalysisCategory::EngagementTrend => "Engagement Trend Analysis",
            AnalysisCategory::PlatformPerformance => "Platform Performance Analysis",
            AnalysisCategory::MediaType => "Media Type Analysis",
            AnalysisCategory::Geographic => "Geographic Analysis",
        }
    }

    /// Short command-line name.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            AnalysisCategory::Sentiment => "sentiment",
            AnalysisCategory::EngagementTrend => "trend",
            AnalysisCategory::PlatformPerformance => "platform",
            AnalysisCategory::MediaType => "media",
            AnalysisCategory::Geographic => "geographic",
        }
    }
}

impl fmt::Display for AnalysisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the slug (`trend`) or the full label, case-insensitively.
impl FromStr for AnalysisCategory {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InsightError::UnknownCategory(s.to_string()))
    }
}

/// Renders the slice of `report` that `category` analyses.
///
/// Tabular categories render as a right-aligned text table with a header row.
/// The trend category renders a single `Average: .., Maximum: ..` line, or
/// `No trend data available` when the daily series is empty.
#[must_use]
pub fn render_context(report: &AggregateReport, category: AnalysisCategory) -> String {
    match category {
        AnalysisCategory::Sentiment => text_table(
            &["sentiment", "count"],
            report
                .sentiment_counts
                .iter()
                .map(|s| vec![s.sentiment.to_string(), s.count.to_string()])
                .collect(),
        ),
        AnalysisCategory::EngagementTrend => {
            if report.daily_engagement.is_empty() {
                "No trend data available".to_string()
            } else {
                format!(
                    "Average: {:.1}, Maximum: {}",
                    report.daily_trend.mean, report.daily_trend.peak
                )
            }
        }
        AnalysisCategory::PlatformPerformance => text_table(
            &["platform", "engagements"],
            report
                .platform_engagement
                .iter()
                .map(|g| vec![g.key.clone(), g.engagements.to_string()])
                .collect(),
        ),
        AnalysisCategory::MediaType => text_table(
            &["media_type", "count"],
            report
                .media_type_counts
                .iter()
                .map(|g| vec![g.key.clone(), g.count.to_string()])
                .collect(),
        ),
        AnalysisCategory::Geographic => text_table(
            &["location", "engagements"],
            report
                .top_locations
                .iter()
                .map(|g| vec![g.key.clone(), g.engagements.to_string()])
                .collect(),
        ),
    }
}

fn text_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    std::iter::once(header_cells)
        .chain(rows)
        .map(|cells| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:>w$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mediadash_core::{Dataset, Record, Sentiment};
    use mediadash_pipeline::aggregate;

    use super::*;

    fn report() -> AggregateReport {
        let rec = |d: u32, platform: &str, sentiment, location: &str, e: u64| Record {
            date: NaiveDate::from_ymd_opt(2024, 1, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            platform: platform.to_string(),
            sentiment,
            location: location.to_string(),
            engagements: e,
            media_type: "Video".to_string(),
        };
        aggregate(&Dataset::new(vec![
            rec(1, "Instagram", Sentiment::Positive, "Jakarta", 1200),
            rec(2, "TikTok", Sentiment::Negative, "Medan", 40),
            rec(2, "Instagram", Sentiment::Positive, "Jakarta", 5),
        ]))
    }

    #[test]
    fn category_labels() {
        let labels: Vec<&str> = AnalysisCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Sentiment Analysis",
                "Engagement Trend Analysis",
                "Platform Performance Analysis",
                "Media Type Analysis",
                "Geographic Analysis",
            ]
        );
    }

    #[test]
    fn category_parses_slug_or_label() {
        assert_eq!("trend".parse::<AnalysisCategory>().unwrap(), AnalysisCategory::EngagementTrend);
        assert_eq!(
            "geographic analysis".parse::<AnalysisCategory>().unwrap(),
            AnalysisCategory::Geographic
        );
        assert!("weather".parse::<AnalysisCategory>().is_err());
    }

    #[test]
    fn platform_table_is_right_aligned() {
        let text = render_context(&report(), AnalysisCategory::PlatformPerformance);
        assert_eq!(
            text,
            " platform  engagements\nInstagram         1205\n   TikTok           40"
        );
    }

    #[test]
    fn sentiment_table_lists_counts() {
        let text = render_context(&report(), AnalysisCategory::Sentiment);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "sentiment  count");
        assert_eq!(lines[1], " Positive      2");
        assert_eq!(lines[2], " Negative      1");
    }

    #[test]
    fn trend_line_uses_daily_mean_and_peak() {
        let text = render_context(&report(), AnalysisCategory::EngagementTrend);
        assert_eq!(text, "Average: 622.5, Maximum: 1200");
    }

    #[test]
    fn trend_without_days_says_so() {
        let empty = aggregate(&Dataset::default());
        assert_eq!(
            render_context(&empty, AnalysisCategory::EngagementTrend),
            "No trend data available"
        );
    }
}
