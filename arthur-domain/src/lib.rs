//! Domain logic: run extensions against one build context and accumulate a
//! deduplicated description of reflection, resource and proxy needs.
//!
//! This crate owns *what* gets registered and how registrations merge. It
//! does not own *where* artifacts are written; that's `arthur-core`.

mod context;
mod error;
pub mod extensions;
mod hierarchy;
mod pipeline;
mod ports;
mod predicate;

pub use context::{BuildContext, Registration, WORKING_DIRECTORY_PROPERTY, seeded_properties};
pub use error::{ClassResolutionError, ContextError, PipelineError};
pub use extensions::{Extension, builtin_extension_names, builtin_extensions};
pub use hierarchy::Hierarchy;
pub use pipeline::ExtensionPipeline;
pub use ports::{
    AnnotationInfo, ClassIndex, ClassInfo, ClassLoader, ClassPool, MethodInfo, OBJECT_CLASS,
};
pub use predicate::{IncludesExcludes, NamePredicate, PredicateType};
