//! Pipeline error type.

use chronicler_nlp::AnnotateError;

use crate::ports::StoreError;

/// A collaborator failure. Aborts the remainder of the current run; earlier
/// mutations stand, there is no run-level transaction.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}
