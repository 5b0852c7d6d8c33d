mod demo;
mod export;
mod insights;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mediadash_core::{FilterPreset, Sentiment};
use mediadash_insight::AnalysisCategory;
use mediadash_pipeline::{FilterSelection, RawTable};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mediadash")]
#[command(about = "Social media engagement analysis from CSV exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a markdown engagement report for a CSV file
    Report {
        /// CSV file with date, platform, sentiment, location, engagements, media type
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write the filtered data, KPI summary, and platform analysis as CSV files
    Export {
        input: PathBuf,

        /// Directory that receives the CSV files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Generate a synthetic demo dataset
    Demo {
        /// Number of rows (one per day); defaults to MEDIADASH_DEMO_ROWS
        #[arg(long)]
        rows: Option<usize>,

        /// RNG seed for reproducible output; defaults to MEDIADASH_DEMO_SEED
        #[arg(long)]
        seed: Option<u64>,

        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the analyst prompt for each analysis category
    Insights {
        input: PathBuf,

        /// Category to analyse (sentiment, trend, platform, media, geographic); repeatable
        #[arg(long = "category")]
        categories: Vec<AnalysisCategory>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Filter flags shared by every command that reads a dataset.
///
/// Flags override the matching fields of `--preset`; anything left unset
/// covers the whole dataset.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day to include, whole day (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Platform to keep; repeatable
    #[arg(long = "platform")]
    platforms: Vec<String>,

    /// Sentiment to keep (positive, negative, neutral); repeatable
    #[arg(long = "sentiment")]
    sentiments: Vec<Sentiment>,

    /// Media type to keep; repeatable
    #[arg(long = "media-type")]
    media_types: Vec<String>,

    /// YAML filter preset
    #[arg(long)]
    preset: Option<PathBuf>,
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

impl FilterArgs {
    /// Combines the preset file (if any) with the command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset file cannot be read or is invalid.
    fn selection(&self) -> anyhow::Result<FilterSelection> {
        let overrides = FilterPreset {
            start_date: self.start,
            end_date: self.end,
            platforms: non_empty(&self.platforms),
            sentiments: non_empty(&self.sentiments),
            media_types: non_empty(&self.media_types),
        };

        let preset = match &self.preset {
            Some(path) => FilterPreset::load(path)
                .with_context(|| format!("failed to load filter preset {}", path.display()))?
                .overlay(overrides),
            None => overrides,
        };

        if preset == FilterPreset::default() {
            Ok(FilterSelection::Covering)
        } else {
            Ok(FilterSelection::Preset(preset))
        }
    }
}

fn read_table(path: &Path) -> anyhow::Result<RawTable> {
    RawTable::from_csv_path(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mediadash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Report { input, filters } => {
            report::run_report(&config, &input, filters.selection()?)?;
        }
        Commands::Export {
            input,
            out_dir,
            filters,
        } => {
            export::run_export(&config, &input, &out_dir, filters.selection()?)?;
        }
        Commands::Demo { rows, seed, out } => {
            demo::run_demo(&config, rows, seed, out.as_deref())?;
        }
        Commands::Insights {
            input,
            categories,
            filters,
        } => {
            insights::run_insights(&config, &input, &categories, filters.selection()?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
