//! Insight context for engagement reports.
//!
//! Renders named slices of an [`mediadash_pipeline::AggregateReport`] as
//! plain text, wraps them in an analyst prompt, and hands them to an
//! [`InsightProvider`]. Only the offline [`PromptPreview`] provider ships
//! here; text generation backends plug in through the trait.

pub mod context;
pub mod error;
pub mod prompt;
pub mod provider;

pub use context::{render_context, AnalysisCategory};
pub use error::InsightError;
pub use prompt::build_prompt;
pub use provider::{collect_insights, Insight, InsightProvider, PromptPreview};
