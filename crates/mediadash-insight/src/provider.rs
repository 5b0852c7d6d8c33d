//! The seam between report context and free-text insight generation.

use mediadash_pipeline::AggregateReport;

use crate::context::{render_context, AnalysisCategory};
use crate::error::InsightError;
use crate::prompt::build_prompt;

/// Turns a category plus its rendered context into free-text insight.
pub trait InsightProvider {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns [`InsightError`] when the provider cannot produce text for
    /// this context.
    fn generate_insight(
        &self,
        category: AnalysisCategory,
        context: &str,
    ) -> Result<String, InsightError>;
}

/// Offline provider that returns the prompt it would have sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptPreview;

impl InsightProvider for PromptPreview {
    fn name(&self) -> &str {
        "prompt-preview"
    }

    fn generate_insight(
        &self,
        category: AnalysisCategory,
        context: &str,
    ) -> Result<String, InsightError> {
        if context.trim().is_empty() {
            return Err(InsightError::EmptyContext(category));
        }
        Ok(build_prompt(category, context))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub category: AnalysisCategory,
    pub context: String,
    pub text: String,
}

/// Renders each category's context from `report` and asks `provider` for
/// insight text.
///
/// A failing category is logged and skipped so the others still come back.
pub fn collect_insights<P: InsightProvider + ?Sized>(
    provider: &P,
    report: &AggregateReport,
    categories: &[AnalysisCategory],
) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(categories.len());
    for &category in categories {
        let context = render_context(report, category);
        match provider.generate_insight(category, &context) {
            Ok(text) => insights.push(Insight {
                category,
                context,
                text,
            }),
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    category = category.slug(),
                    error = %e,
                    "insight generation failed; skipping category"
                );
            }
        }
    }
    tracing::info!(
        provider = provider.name(),
        requested = categories.len(),
        produced = insights.len(),
        "insights collected"
    );
    insights
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mediadash_core::{Dataset, Record, Sentiment};
    use mediadash_pipeline::aggregate;

    use super::*;

    struct Refuses(AnalysisCategory);

    impl InsightProvider for Refuses {
        fn name(&self) -> &str {
            "refuses"
        }

        fn generate_insight(
            &self,
            category: AnalysisCategory,
            context: &str,
        ) -> Result<String, InsightError> {
            if category == self.0 {
                return Err(InsightError::Provider {
                    provider: self.name().to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            Ok(format!("{} lines", context.lines().count()))
        }
    }

    fn report() -> AggregateReport {
        aggregate(&Dataset::new(vec![Record {
            date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            platform: "TikTok".to_string(),
            sentiment: Sentiment::Positive,
            location: "Surabaya".to_string(),
            engagements: 900,
            media_type: "Video".to_string(),
        }]))
    }

    #[test]
    fn preview_returns_prompt_with_context() {
        let text = PromptPreview
            .generate_insight(AnalysisCategory::MediaType, "media_type  count\n     Video      1")
            .unwrap();
        assert!(text.contains("Media Type Analysis"));
        assert!(text.contains("     Video      1"));
    }

    #[test]
    fn preview_rejects_blank_context() {
        let err = PromptPreview
            .generate_insight(AnalysisCategory::Sentiment, "  ")
            .unwrap_err();
        assert!(matches!(err, InsightError::EmptyContext(AnalysisCategory::Sentiment)));
    }

    #[test]
    fn collect_insights_covers_every_category() {
        let insights = collect_insights(&PromptPreview, &report(), &AnalysisCategory::ALL);
        assert_eq!(insights.len(), 5);
        assert_eq!(insights[1].context, "Average: 900.0, Maximum: 900");
        assert!(insights[4].text.contains("Surabaya"));
    }

    #[test]
    fn collect_insights_skips_failing_category() {
        let provider = Refuses(AnalysisCategory::PlatformPerformance);
        let insights = collect_insights(&provider, &report(), &AnalysisCategory::ALL);
        let categories: Vec<AnalysisCategory> = insights.iter().map(|i| i.category).collect();
        assert_eq!(categories.len(), 4);
        assert!(!categories.contains(&AnalysisCategory::PlatformPerformance));
        assert_eq!(insights[0].text, "2 lines");
    }
}
