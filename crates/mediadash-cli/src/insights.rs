use std::path::Path;

use mediadash_core::AppConfig;
use mediadash_insight::{collect_insights, AnalysisCategory, PromptPreview};
use mediadash_pipeline::FilterSelection;

use crate::report::analyse;

/// Print insight text for each requested category (all when none given).
///
/// Uses the offline prompt preview, so the output is the prompt an analyst
/// model would receive.
///
/// # Errors
///
/// Returns an error if the input cannot be analysed.
pub(crate) fn run_insights(
    config: &AppConfig,
    input: &Path,
    categories: &[AnalysisCategory],
    selection: FilterSelection,
) -> anyhow::Result<()> {
    let outcome = analyse(config, input, selection)?;
    let Some(report) = outcome.analysis.report() else {
        println!("no data matches the current filters; no insights to generate");
        return Ok(());
    };

    let all = AnalysisCategory::ALL;
    let categories = if categories.is_empty() {
        &all[..]
    } else {
        categories
    };

    for insight in collect_insights(&PromptPreview, report, categories) {
        println!("## {}", insight.category);
        println!();
        println!("{}", insight.text);
    }

    Ok(())
}
