//! The generate pipeline, extracted from the CLI.
//!
//! I/O-agnostic: artifacts are written through the port traits and the
//! class model comes in as injected capabilities.

use crate::emitter::ConfigurationEmitter;
use crate::error::GenerateError;
use crate::ports::{ArtifactSerializer, WritePort};
use crate::settings::GenerateSettings;
use anyhow::Context;
use arthur_domain::{
    BuildContext, ClassIndex, ClassLoader, Extension, ExtensionPipeline, seeded_properties,
};
use arthur_types::NativeImageConfiguration;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs `extensions` in order, then emits the artifacts into the work
/// directory.
///
/// Nothing is written when any extension fails.
pub fn run_generate(
    settings: &GenerateSettings,
    extensions: Vec<Box<dyn Extension>>,
    index: Arc<dyn ClassIndex>,
    loader: Arc<dyn ClassLoader>,
    writer: &dyn WritePort,
    serializer: &dyn ArtifactSerializer,
) -> Result<NativeImageConfiguration, GenerateError> {
    let work_dir = absolute(&settings.work_dir)?;
    let properties = seeded_properties(&settings.properties, &work_dir);

    let pipeline = ExtensionPipeline::new(extensions);
    debug!(
        work_dir = %work_dir,
        extensions = ?pipeline.extension_names(),
        "starting generate"
    );

    let mut ctx = BuildContext::new(
        NativeImageConfiguration::default(),
        index,
        loader,
        properties,
    );
    pipeline.run(&mut ctx)?;

    let written = ConfigurationEmitter::new(&work_dir, writer, serializer).emit(&mut ctx)?;
    info!(artifacts = written.len(), "generate complete");

    Ok(ctx.into_configuration())
}

fn absolute(path: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let abs = std::path::absolute(path).with_context(|| format!("absolutize {}", path))?;
    Utf8PathBuf::from_path_buf(abs)
        .map_err(|p| anyhow::anyhow!("non UTF-8 work directory: {}", p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonSerializer, MemoryWritePort};
    use arthur_domain::{ClassPool, WORKING_DIRECTORY_PROPERTY};
    use arthur_types::ReflectionEntry;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn settings(work_dir: &str) -> GenerateSettings {
        GenerateSettings {
            work_dir: Utf8PathBuf::from(work_dir),
            properties: HashMap::from([("user".to_string(), "value".to_string())]),
            pretty: false,
        }
    }

    #[test]
    fn working_directory_is_absolute_and_caller_map_untouched() {
        let seen = Rc::new(RefCell::new(None));
        let capture = seen.clone();
        let settings = settings("relative/out");
        let pool = Arc::new(ClassPool::new());

        run_generate(
            &settings,
            vec![Box::new(move |ctx: &mut BuildContext| -> anyhow::Result<()> {
                *capture.borrow_mut() = ctx.property(WORKING_DIRECTORY_PROPERTY).map(str::to_string);
                ctx.set_property("user", "changed");
                Ok(())
            })],
            pool.clone(),
            pool,
            &MemoryWritePort::new(),
            &JsonSerializer::default(),
        )
        .unwrap();

        let dir = seen.borrow().clone().expect("workingDirectory set");
        assert!(Utf8Path::new(&dir).is_absolute(), "{dir}");
        assert!(dir.ends_with("out"));
        assert_eq!(settings.properties["user"], "value");
    }

    #[test]
    fn failing_extension_writes_nothing() {
        let port = MemoryWritePort::new();
        let pool = Arc::new(ClassPool::new());

        let err = run_generate(
            &settings("/work"),
            vec![
                Box::new(|ctx: &mut BuildContext| -> anyhow::Result<()> {
                    ctx.register(ReflectionEntry::new("com.A"));
                    Ok(())
                }),
                Box::new(|_: &mut BuildContext| -> anyhow::Result<()> {
                    anyhow::bail!("boom")
                }),
            ],
            pool.clone(),
            pool,
            &port,
            &JsonSerializer::default(),
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Pipeline(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(port.files().is_empty());
        assert_eq!(port.create_dir_calls(), 0);
    }
}
