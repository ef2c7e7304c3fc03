//! Error types for arthur-domain.
//!
//! Every error here is fatal for the run: nothing is retried and the
//! pipeline never emits partial configuration.

use thiserror::Error;

/// A class named by an extension could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("class not found: {name}")]
pub struct ClassResolutionError {
    pub name: String,
}

impl ClassResolutionError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Failures raised by `BuildContext` operations.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    ClassResolution(#[from] ClassResolutionError),

    /// `unwrap` was asked for a type the context cannot expose.
    #[error("unsupported unwrapping: {requested}")]
    UnsupportedUnwrap { requested: &'static str },

    /// A `Matches` token in a predicate property is not a valid regex.
    #[error("invalid pattern '{pattern}' in property '{property}': {message}")]
    InvalidPattern {
        property: String,
        pattern: String,
        message: String,
    },
}

/// Failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An extension's `execute` failed; remaining extensions were skipped.
    #[error("extension {extension} failed: {source:#}")]
    Extension {
        extension: String,
        #[source]
        source: anyhow::Error,
    },
}
