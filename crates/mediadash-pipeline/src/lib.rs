//! Normalization, cleaning, filtering, and aggregation of engagement datasets.
//!
//! Data flows strictly forward: a [`RawTable`] is mapped onto the canonical
//! schema by [`normalize_schema`], type-coerced by [`clean`], narrowed by
//! [`filter_dataset`], and summarized by [`aggregate`]. Every stage returns a
//! new value; nothing is mutated in place and nothing is shared between runs.

pub mod aggregate;
pub mod clean;
pub mod demo;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod schema;
pub mod table;

pub use aggregate::{
    aggregate, aggregate_with, AggregateOptions, AggregateReport, DailyPoint, DailyTrend,
    GroupCount, GroupStats, GroupTotal, Highlights, MonthlyPoint, SentimentShare,
    SentimentStats, YearMonth,
};
pub use clean::{clean, parse_date, CleaningStats};
pub use demo::{generate_demo, DemoOptions};
pub use error::{PipelineError, SchemaError};
pub use filter::{filter_dataset, matches_filter};
pub use pipeline::{prepare, run_pipeline, Analysis, FilterSelection, PipelineOutcome};
pub use schema::{column_mapping, normalize_column_name, normalize_schema, NormalizedTable};
pub use table::RawTable;
