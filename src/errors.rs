use thiserror::Error;

/// Per-stage failure taxonomy. Every variant is handled the same way: the
/// stage's result is replaced by the fallback generator and the pipeline
/// continues. None of these are ever shown to the user as an error.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("completion returned no text")]
    EmptyCompletion,
    #[error("parse failure: {0}")]
    Parse(String),
}
