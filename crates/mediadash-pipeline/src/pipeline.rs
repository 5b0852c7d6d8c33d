//! End-to-end orchestration of one analysis run.

use mediadash_core::{Dataset, FilterPreset, FilterSpec};

use crate::aggregate::{aggregate_with, AggregateOptions, AggregateReport};
use crate::clean::{clean, CleaningStats};
use crate::error::PipelineError;
use crate::filter::filter_dataset;
use crate::schema::normalize_schema;
use crate::table::RawTable;

/// How the filter for a run is chosen.
#[derive(Debug, Clone, Default)]
pub enum FilterSelection {
    /// Keep every record: full date range, every distinct value.
    #[default]
    Covering,
    /// Use an explicit, already-validated spec.
    Spec(FilterSpec),
    /// Resolve a partial preset against the cleaned dataset.
    Preset(FilterPreset),
}

/// Result of aggregating the filtered dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Report(Box<AggregateReport>),
    /// The filter matched no records. Not an error; the caller decides how
    /// to present it.
    Empty,
}

impl Analysis {
    #[must_use]
    pub fn report(&self) -> Option<&AggregateReport> {
        match self {
            Analysis::Report(report) => Some(report),
            Analysis::Empty => None,
        }
    }
}

/// Everything produced by [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub cleaned: Dataset,
    pub stats: CleaningStats,
    /// The resolved filter, or `None` when the cleaned dataset was empty.
    pub filter: Option<FilterSpec>,
    pub filtered: Dataset,
    pub analysis: Analysis,
}

/// Normalizes and cleans `table`.
///
/// # Errors
///
/// Returns [`PipelineError::Schema`] when a canonical column is missing.
pub fn prepare(table: RawTable) -> Result<(Dataset, CleaningStats), PipelineError> {
    let normalized = normalize_schema(table)?;
    Ok(clean(&normalized))
}

/// Runs normalize, clean, filter, and aggregate over `table`.
///
/// The aggregator is skipped when the filtered dataset is empty, yielding
/// [`Analysis::Empty`].
///
/// # Errors
///
/// Returns [`PipelineError::Schema`] when a canonical column is missing and
/// [`PipelineError::Filter`] when a preset sets both dates with the start
/// after the end.
pub fn run_pipeline(
    table: RawTable,
    selection: FilterSelection,
    options: &AggregateOptions,
) -> Result<PipelineOutcome, PipelineError> {
    let (cleaned, stats) = prepare(table)?;

    let filter = match selection {
        FilterSelection::Covering => FilterSpec::covering(&cleaned),
        FilterSelection::Spec(spec) => Some(spec),
        FilterSelection::Preset(preset) => preset.resolve(&cleaned)?,
    };

    let filtered = match &filter {
        Some(spec) => filter_dataset(&cleaned, spec),
        None => Dataset::default(),
    };

    let analysis = if filtered.is_empty() {
        tracing::warn!(
            cleaned = cleaned.len(),
            "no records match the current filter"
        );
        Analysis::Empty
    } else {
        Analysis::Report(Box::new(aggregate_with(&filtered, options)))
    };

    tracing::info!(
        input = stats.input_rows,
        cleaned = cleaned.len(),
        filtered = filtered.len(),
        "pipeline run complete"
    );

    Ok(PipelineOutcome {
        cleaned,
        stats,
        filter,
        filtered,
        analysis,
    })
}
