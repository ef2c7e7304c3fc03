//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;

/// File-system write operations.
pub trait WritePort {
    /// Create or truncate `path`. Parent directories must already exist.
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}

/// Encodes one artifact.
pub trait ArtifactSerializer {
    fn serialize(&self, value: &serde_json::Value) -> anyhow::Result<Vec<u8>>;
}
