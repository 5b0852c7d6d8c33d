//! CSV exports of a filtered run.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use mediadash_core::AppConfig;
use mediadash_pipeline::{AggregateReport, FilterSelection, PipelineOutcome, RawTable};

use crate::report::analyse;

pub(crate) const FILTERED_FILE: &str = "filtered_data.csv";
pub(crate) const SUMMARY_FILE: &str = "summary.csv";
pub(crate) const PLATFORM_FILE: &str = "platform_analysis.csv";

/// Run the pipeline over `input` and write the three export files into
/// `out_dir`.
///
/// # Errors
///
/// Returns an error if the input cannot be analysed or any file cannot be
/// written.
pub(crate) fn run_export(
    config: &AppConfig,
    input: &Path,
    out_dir: &Path,
    selection: FilterSelection,
) -> anyhow::Result<()> {
    let outcome = analyse(config, input, selection)?;
    let written = write_exports(&outcome, out_dir)?;
    if written.is_empty() {
        println!("no data matches the current filters; nothing exported");
    }
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Writes the export files for `outcome`, returning their paths.
///
/// Nothing is written when the filtered dataset is empty.
pub(crate) fn write_exports(
    outcome: &PipelineOutcome,
    out_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let Some(report) = outcome.analysis.report() else {
        tracing::warn!(out_dir = %out_dir.display(), "empty filter result; skipping export");
        return Ok(Vec::new());
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let filtered = out_dir.join(FILTERED_FILE);
    let file = File::create(&filtered)
        .with_context(|| format!("failed to create {}", filtered.display()))?;
    RawTable::from_dataset(&outcome.filtered)
        .write_csv(file)
        .with_context(|| format!("failed to write {}", filtered.display()))?;

    let summary = out_dir.join(SUMMARY_FILE);
    write_summary(report, &summary)
        .with_context(|| format!("failed to write {}", summary.display()))?;

    let platforms = out_dir.join(PLATFORM_FILE);
    write_platform_analysis(report, &platforms)
        .with_context(|| format!("failed to write {}", platforms.display()))?;

    tracing::info!(
        out_dir = %out_dir.display(),
        rows = outcome.filtered.len(),
        "exports written"
    );

    Ok(vec![filtered, summary, platforms])
}

fn write_summary(report: &AggregateReport, path: &Path) -> Result<(), csv::Error> {
    let rows = [
        ("Total Posts", report.post_count.to_string()),
        ("Total Engagement", report.total_engagement.to_string()),
        ("Avg Engagement", report.avg_engagement.to_string()),
        ("Positive Sentiment %", format!("{:.1}%", report.positive_pct)),
    ];
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Metric", "Value"])?;
    for (metric, value) in &rows {
        wtr.write_record([*metric, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_platform_analysis(report: &AggregateReport, path: &Path) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["platform", "engagements"])?;
    for group in &report.platform_engagement {
        let engagements = group.engagements.to_string();
        wtr.write_record([group.key.as_str(), engagements.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
