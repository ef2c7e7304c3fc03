//! Default port implementations.

use crate::ports::{ArtifactSerializer, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

/// JSON encoding via `serde_json`.
#[derive(Debug, Clone, Copy)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl JsonSerializer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ArtifactSerializer for JsonSerializer {
    fn serialize(&self, value: &serde_json::Value) -> anyhow::Result<Vec<u8>> {
        let mut out = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .context("serialize json")?;
        out.push(b'\n');
        Ok(out)
    }
}

/// In-memory write port for embedding and testing.
///
/// Mirrors the filesystem contract: writing into a directory that was not
/// created first fails.
#[derive(Debug, Default)]
pub struct MemoryWritePort {
    files: Mutex<BTreeMap<Utf8PathBuf, Vec<u8>>>,
    dirs: Mutex<BTreeSet<Utf8PathBuf>>,
    create_dir_calls: Mutex<usize>,
}

impl MemoryWritePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> BTreeMap<Utf8PathBuf, Vec<u8>> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn file(&self, path: &Utf8Path) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    pub fn create_dir_calls(&self) -> usize {
        self.create_dir_calls.lock().map(|c| *c).unwrap_or_default()
    }
}

impl WritePort for MemoryWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let dirs = self
            .dirs
            .lock()
            .map_err(|_| anyhow::anyhow!("directory table poisoned"))?;
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
            && !dirs.contains(parent)
        {
            anyhow::bail!("write {}: parent directory does not exist", path);
        }
        drop(dirs);

        self.files
            .lock()
            .map_err(|_| anyhow::anyhow!("file table poisoned"))?
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        let mut dirs = self
            .dirs
            .lock()
            .map_err(|_| anyhow::anyhow!("directory table poisoned"))?;
        for ancestor in path.ancestors() {
            if !ancestor.as_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        if let Ok(mut calls) = self.create_dir_calls.lock() {
            *calls += 1;
        }
        Ok(())
    }
}
