use crate::context::BuildContext;
use crate::error::PipelineError;
use crate::extensions::Extension;
use tracing::{debug, info};

/// Runs extensions, in order, against one build context.
///
/// Single pass: an extension that modifies the context does not cause
/// earlier extensions to run again.
pub struct ExtensionPipeline {
    extensions: Vec<Box<dyn Extension>>,
}

impl ExtensionPipeline {
    pub fn new(extensions: Vec<Box<dyn Extension>>) -> Self {
        Self { extensions }
    }

    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    /// Stops at the first failing extension; registrations it or earlier
    /// extensions made are left in place.
    pub fn run(&self, ctx: &mut BuildContext) -> Result<(), PipelineError> {
        for extension in &self.extensions {
            let name = extension.name();
            debug!(extension = name, "executing");

            ctx.reset_modified();
            extension
                .execute(ctx)
                .map_err(|source| PipelineError::Extension {
                    extension: name.to_string(),
                    source,
                })?;

            if ctx.is_modified() {
                info!(extension = name, "extension updated build context");
            }
        }
        Ok(())
    }
}
