use arthur_domain::PipelineError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Error type for generate results. Every variant maps to exit code 1.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Creating the work directory or writing one artifact failed.
    #[error("can't write {path}")]
    Artifact {
        path: Utf8PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl GenerateError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}
