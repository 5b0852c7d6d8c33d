use thiserror::Error;

/// One or more canonical fields have no matching column after normalization.
///
/// Fatal to a run: nothing downstream can proceed without all six fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required columns: {}", .missing.join(", "))]
pub struct SchemaError {
    /// Missing canonical field names, in canonical order.
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid filter: {0}")]
    Filter(#[from] mediadash_core::CoreError),
}
