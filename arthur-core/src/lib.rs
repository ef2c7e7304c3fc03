//! Embeddable core library for arthur.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a build plugin or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`WritePort`](ports::WritePort) writes files and creates directories
//! - [`ArtifactSerializer`](ports::ArtifactSerializer) turns artifact values into bytes
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry point
//!
//! - [`run_generate`](pipeline::run_generate) runs extensions and emits the artifacts

pub mod adapters;
pub mod emitter;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use error::GenerateError;
pub use pipeline::run_generate;
pub use settings::GenerateSettings;

// Re-export so embedders don't need arthur-types directly.
pub use arthur_types::NativeImageConfiguration;
