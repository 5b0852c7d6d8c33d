//! Markdown engagement report.

use std::path::Path;

use chrono::Utc;
use mediadash_core::AppConfig;
use mediadash_pipeline::{
    run_pipeline, AggregateOptions, AggregateReport, CleaningStats, FilterSelection,
    PipelineOutcome,
};

use crate::read_table;

/// Reads `input` and runs the full pipeline with the configured top-N.
pub(crate) fn analyse(
    config: &AppConfig,
    input: &Path,
    selection: FilterSelection,
) -> anyhow::Result<PipelineOutcome> {
    let table = read_table(input)?;
    let options = AggregateOptions {
        top_n: config.top_n,
    };
    let outcome = run_pipeline(table, selection, &options)?;
    Ok(outcome)
}

/// Print a markdown report for `input`.
///
/// An empty filter result prints a "no data" notice instead of zero-valued
/// tables.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or the filter is invalid.
pub(crate) fn run_report(
    config: &AppConfig,
    input: &Path,
    selection: FilterSelection,
) -> anyhow::Result<()> {
    let outcome = analyse(config, input, selection)?;
    let source = input.display().to_string();
    println!("{}", render_markdown(&outcome, &source, config.negative_alert_pct));
    Ok(())
}

fn filter_label(outcome: &PipelineOutcome) -> String {
    let Some(spec) = &outcome.filter else {
        return "none (empty dataset)".to_string();
    };
    let join = |values: Vec<&str>| values.join(", ");
    format!(
        "{} to {}; platforms: {}; sentiments: {}; media types: {}",
        spec.start_date(),
        spec.end_date(),
        join(spec.allowed_platforms().iter().map(String::as_str).collect()),
        join(spec.allowed_sentiments().iter().map(|s| s.as_str()).collect()),
        join(spec.allowed_media_types().iter().map(String::as_str).collect()),
    )
}

/// Renders the full markdown document for one pipeline run.
pub(crate) fn render_markdown(outcome: &PipelineOutcome, source: &str, alert_pct: f64) -> String {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let mut lines = vec![
        "# Engagement Report".to_string(),
        String::new(),
        format!("**Generated**: {now}"),
        format!("**Source**: {source}"),
        format!("**Filter**: {}", filter_label(outcome)),
        format!(
            "**Records**: {} filtered of {} cleaned",
            outcome.filtered.len(),
            outcome.cleaned.len()
        ),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    match outcome.analysis.report() {
        Some(report) => report_sections(&mut lines, report, alert_pct),
        None => {
            lines.push(
                "No data matches the current filters. Adjust the date range or selections."
                    .to_string(),
            );
            lines.push(String::new());
        }
    }

    quality_section(&mut lines, &outcome.stats);
    lines.join("\n")
}

fn table(lines: &mut Vec<String>, title: &str, header: &[&str], rows: Vec<Vec<String>>) {
    lines.push(format!("## {title}"));
    lines.push(String::new());
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!(
        "|{}|",
        header
            .iter()
            .map(|h| "-".repeat(h.len() + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in rows {
        lines.push(format!("| {} |", row.join(" | ")));
    }
    lines.push(String::new());
}

fn report_sections(lines: &mut Vec<String>, report: &AggregateReport, alert_pct: f64) {
    table(
        lines,
        "Key Metrics",
        &["Metric", "Value"],
        vec![
            vec!["Total Posts".into(), report.post_count.to_string()],
            vec!["Total Engagement".into(), report.total_engagement.to_string()],
            vec!["Avg Engagement".into(), report.avg_engagement.to_string()],
            vec!["Positive Sentiment".into(), format!("{:.1}%", report.positive_pct)],
        ],
    );

    table(
        lines,
        "Platform Performance",
        &["Platform", "Total Engagement", "Avg Engagement", "Posts"],
        report
            .platform_summary
            .iter()
            .map(|s| {
                vec![
                    s.key.clone(),
                    s.total.to_string(),
                    format!("{:.0}", s.mean),
                    s.count.to_string(),
                ]
            })
            .collect(),
    );

    table(
        lines,
        "Sentiment",
        &["Sentiment", "Posts", "Share", "Total Engagement", "Avg Engagement"],
        report
            .sentiment_engagement
            .iter()
            .zip(&report.sentiment_counts)
            .map(|(stats, share)| {
                vec![
                    stats.sentiment.to_string(),
                    stats.count.to_string(),
                    format!("{:.1}%", share.pct),
                    stats.total.to_string(),
                    format!("{:.1}", stats.mean),
                ]
            })
            .collect(),
    );

    table(
        lines,
        "Media Types",
        &["Media Type", "Posts", "Avg Engagement"],
        report
            .media_type_engagement
            .iter()
            .map(|s| vec![s.key.clone(), s.count.to_string(), format!("{:.1}", s.mean)])
            .collect(),
    );

    table(
        lines,
        "Top Locations",
        &["Location", "Total", "Avg", "Posts"],
        report
            .location_summary
            .iter()
            .map(|s| {
                vec![
                    s.key.clone(),
                    s.total.to_string(),
                    format!("{:.0}", s.mean),
                    s.count.to_string(),
                ]
            })
            .collect(),
    );

    table(
        lines,
        "Monthly Engagement",
        &["Month", "Engagement"],
        report
            .monthly_engagement
            .iter()
            .map(|p| vec![p.month.to_string(), p.engagements.to_string()])
            .collect(),
    );

    let trend = &report.daily_trend;
    lines.push("## Daily Trend".to_string());
    lines.push(String::new());
    lines.push(format!("- **Days**: {}", report.daily_engagement.len()));
    lines.push(format!("- **Peak**: {}", trend.peak));
    lines.push(format!("- **Average**: {:.0}", trend.mean));
    lines.push(format!(
        "- **Best day**: {}",
        trend
            .best_day
            .map_or_else(|| "N/A".to_string(), |d| d.format("%d %b %Y").to_string())
    ));
    lines.push(String::new());

    let highlights = report.highlights();
    lines.push("## Highlights".to_string());
    lines.push(String::new());
    if let Some(top) = &highlights.top_platform {
        lines.push(format!(
            "- **Top platform**: {} with {} engagements",
            top.key, top.engagements
        ));
    }
    if let Some(media) = &highlights.best_media_type {
        lines.push(format!(
            "- **Best media type**: {} with {} total engagements",
            media.key, media.engagements
        ));
    }
    if let Some(low) = &highlights.lowest_platform {
        lines.push(format!(
            "- **Needs optimisation**: {} has the lowest engagement ({})",
            low.key, low.engagements
        ));
    }
    if highlights.negative_needs_attention(alert_pct) {
        lines.push(format!(
            "- **Attention**: negative sentiment at {:.1}% exceeds {alert_pct:.0}%",
            highlights.negative_pct
        ));
    } else {
        lines.push(format!(
            "- **Sentiment**: negative share {:.1}% is within the {alert_pct:.0}% threshold",
            highlights.negative_pct
        ));
    }
    lines.push(String::new());
}

fn quality_section(lines: &mut Vec<String>, stats: &CleaningStats) {
    table(
        lines,
        "Data Quality",
        &["Check", "Rows"],
        vec![
            vec!["Input rows".into(), stats.input_rows.to_string()],
            vec!["Dropped (unparseable date)".into(), stats.dropped_rows.to_string()],
            vec!["Engagements defaulted to 0".into(), stats.defaulted_engagements.to_string()],
            vec!["Negative engagements clamped".into(), stats.clamped_engagements.to_string()],
            vec!["Oversized engagements saturated".into(), stats.saturated_engagements.to_string()],
            vec!["Sentiment defaulted".into(), stats.defaulted_sentiments.to_string()],
            vec!["Platform defaulted".into(), stats.defaulted_platforms.to_string()],
            vec!["Location defaulted".into(), stats.defaulted_locations.to_string()],
            vec!["Media type defaulted".into(), stats.defaulted_media_types.to_string()],
        ],
    );
}
