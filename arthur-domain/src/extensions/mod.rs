use crate::context::BuildContext;

mod annotations;
mod static_registrations;

pub use annotations::{
    AnnotationExtension, CLASS_FILTER_PREFIX, CUSTOM_ANNOTATIONS_PROPERTY, REGISTER_CLASS,
};
pub use static_registrations::{StaticExtension, StaticRegistrations};

/// A unit contributing metadata to the shared build context.
///
/// Extensions only talk to each other through the context: registrations
/// and properties set by earlier extensions are visible to later ones.
pub trait Extension {
    /// Name used in diagnostics and error context.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn execute(&self, ctx: &mut BuildContext) -> anyhow::Result<()>;
}

impl<F> Extension for F
where
    F: Fn(&mut BuildContext) -> anyhow::Result<()>,
{
    fn execute(&self, ctx: &mut BuildContext) -> anyhow::Result<()> {
        self(ctx)
    }
}

/// Built-in extensions in execution order.
///
/// Static registrations run first so annotation-driven entries can refine
/// them.
pub fn builtin_extensions(registrations: StaticRegistrations) -> Vec<Box<dyn Extension>> {
    vec![
        Box::new(StaticExtension::new(registrations)),
        Box::new(AnnotationExtension),
    ]
}

pub fn builtin_extension_names() -> Vec<&'static str> {
    vec![StaticExtension::NAME, AnnotationExtension::NAME]
}
