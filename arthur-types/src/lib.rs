//! Shared DTOs (schemas-as-code) for the arthur workspace.
//!
//! # Design constraints
//! - These types are serialized to disk and consumed by `native-image`.
//! - Field names follow the GraalVM configuration file formats.
//! - Prefer adding optional fields over changing semantics.

pub mod native_image;
pub mod proxy;
pub mod reflection;
pub mod resources;

pub use native_image::NativeImageConfiguration;
pub use proxy::DynamicProxyModel;
pub use reflection::{FieldReflection, MethodReflection, ReflectionEntry};
pub use resources::{ResourceBundleEntry, ResourceEntry, ResourcesModel};

/// Artifact file names written into the working directory.
pub mod artifacts {
    pub const REFLECTION: &str = "reflection.arthur.json";
    pub const RESOURCES: &str = "resources.arthur.json";
    pub const DYNAMIC_PROXIES: &str = "dynamicproxies.arthur.json";
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
