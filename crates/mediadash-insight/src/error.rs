use thiserror::Error;

use crate::context::AnalysisCategory;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("no context to analyse for {0}")]
    EmptyContext(AnalysisCategory),

    #[error("unknown analysis category '{0}'")]
    UnknownCategory(String),

    #[error("insight provider {provider} failed: {reason}")]
    Provider { provider: String, reason: String },
}
