//! Clap-free settings for the generate pipeline.

use camino::Utf8PathBuf;
use std::collections::HashMap;

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Artifacts land here; made absolute before the run starts.
    pub work_dir: Utf8PathBuf,

    /// Copied into the build context; never mutated.
    pub properties: HashMap<String, String>,

    /// Pretty-print the JSON artifacts.
    pub pretty: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            work_dir: Utf8PathBuf::from("target/arthur"),
            properties: HashMap::new(),
            pretty: true,
        }
    }
}
