//! Writes the accumulated registrations as native-image artifacts.

use crate::error::GenerateError;
use crate::ports::{ArtifactSerializer, WritePort};
use anyhow::Context;
use arthur_domain::BuildContext;
use arthur_types::{ResourcesModel, artifacts};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, info};

/// Emits up to three artifacts into one work directory.
///
/// Each artifact is written only when it has content. The directory is
/// created at most once, right before the first write.
pub struct ConfigurationEmitter<'a> {
    work_dir: &'a Utf8Path,
    writer: &'a dyn WritePort,
    serializer: &'a dyn ArtifactSerializer,
    dir_ready: bool,
}

impl<'a> ConfigurationEmitter<'a> {
    pub fn new(
        work_dir: &'a Utf8Path,
        writer: &'a dyn WritePort,
        serializer: &'a dyn ArtifactSerializer,
    ) -> Self {
        Self {
            work_dir,
            writer,
            serializer,
            dir_ready: false,
        }
    }

    /// Writes the artifacts and records their paths on the context's
    /// output configuration. Returns the written paths.
    pub fn emit(mut self, ctx: &mut BuildContext) -> Result<Vec<Utf8PathBuf>, GenerateError> {
        let mut written = Vec::new();

        if ctx.reflections().len() > 0 {
            let entries: Vec<_> = ctx.reflections().collect();
            let path = self.write(artifacts::REFLECTION, &entries)?;
            ctx.add_reflection_config_file(path.as_str());
            written.push(path);
        } else {
            debug!("no reflection entries");
        }

        let model = ResourcesModel {
            resources: non_empty(ctx.resources().cloned().collect()),
            bundles: non_empty(ctx.bundles().cloned().collect()),
        };
        if !model.is_empty() {
            let path = self.write(artifacts::RESOURCES, &model)?;
            ctx.add_resources_config_file(path.as_str());
            written.push(path);
        } else {
            debug!("no resources or bundles");
        }

        if ctx.proxies().len() > 0 {
            let proxies: Vec<_> = ctx.proxies().collect();
            let path = self.write(artifacts::DYNAMIC_PROXIES, &proxies)?;
            ctx.add_dynamic_proxies_config_file(path.as_str());
            written.push(path);
        } else {
            debug!("no dynamic proxies");
        }

        Ok(written)
    }

    fn write<T: Serialize + ?Sized>(
        &mut self,
        file_name: &str,
        value: &T,
    ) -> Result<Utf8PathBuf, GenerateError> {
        let path = self.work_dir.join(file_name);

        if !self.dir_ready {
            self.writer
                .create_dir_all(self.work_dir)
                .map_err(|source| GenerateError::Artifact {
                    path: self.work_dir.to_path_buf(),
                    source,
                })?;
            self.dir_ready = true;
        }

        let bytes = serde_json::to_value(value)
            .context("convert artifact to json")
            .and_then(|value| self.serializer.serialize(&value))
            .and_then(|bytes| self.writer.write_file(&path, &bytes));
        if let Err(source) = bytes {
            return Err(GenerateError::Artifact { path, source });
        }

        info!(path = %path, "wrote artifact");
        Ok(path)
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
