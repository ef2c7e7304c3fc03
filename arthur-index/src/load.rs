use anyhow::Context;
use arthur_domain::{ClassInfo, ClassPool};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// On-disk shape of one index fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassIndexFile {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
}

#[derive(Debug, Error)]
pub enum IndexLoadError {
    #[error("index path does not exist: {path}")]
    Missing { path: Utf8PathBuf },

    #[error("json parse error in {path}: {message}")]
    Json { path: Utf8PathBuf, message: String },

    #[error("class {name} is defined in both {first} and {second}")]
    DuplicateClass {
        name: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },
}

/// Loads a single index file, or every `*.json` directly inside a directory.
///
/// Fragments are read in path order. A class defined twice is an error,
/// even when both definitions are identical.
pub fn load_index(path: &Utf8Path) -> anyhow::Result<ClassPool> {
    if !path.exists() {
        return Err(IndexLoadError::Missing {
            path: path.to_path_buf(),
        }
        .into());
    }

    let files = if path.is_dir() {
        fragments(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut pool = ClassPool::new();
    let mut origins: HashMap<String, Utf8PathBuf> = HashMap::new();

    for file in &files {
        let index = read_fragment(file)?;
        debug!(path = %file, classes = index.classes.len(), "loaded index fragment");

        for class in index.classes {
            if let Some(first) = origins.get(&class.name) {
                return Err(IndexLoadError::DuplicateClass {
                    name: class.name,
                    first: first.clone(),
                    second: file.clone(),
                }
                .into());
            }
            origins.insert(class.name.clone(), file.clone());
            pool.insert(class);
        }
    }

    debug!(classes = pool.len(), fragments = files.len(), "class index ready");
    Ok(pool)
}

fn fragments(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let pattern = dir.join("*.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for index fragments");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob *.json")? {
        let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow::anyhow!("non UTF-8 index path: {}", p.display()))?;
        if path.is_file() {
            out.push(path);
        }
    }

    // Deterministic order matters.
    out.sort();
    Ok(out)
}

fn read_fragment(path: &Utf8Path) -> anyhow::Result<ClassIndexFile> {
    let raw = fs::read_to_string(path).with_context(|| format!("read index {}", path))?;
    serde_json::from_str(&raw).map_err(|e| {
        IndexLoadError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_accepts_missing_classes_key() {
        let parsed: ClassIndexFile = serde_json::from_str("{}").unwrap();
        assert!(parsed.classes.is_empty());
    }

    #[test]
    fn fragment_reads_nested_methods() {
        let parsed: ClassIndexFile = serde_json::from_str(
            r#"{"classes":[{"name":"com.A","superclass":"com.Base",
                "methods":[{"name":"run","parameterTypes":["int"]}]}]}"#,
        )
        .unwrap();
        let class = &parsed.classes[0];
        assert_eq!(class.superclass.as_deref(), Some("com.Base"));
        assert_eq!(class.methods[0].parameter_types, vec!["int"]);
    }
}
