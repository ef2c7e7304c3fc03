//! Classpath index ingestion.
//!
//! Class scanning happens upstream (a build plugin or an annotation
//! processor dumps what it saw as JSON). This crate only turns those dumps
//! into a `ClassPool` the pipeline can query.

mod load;

pub use load::{ClassIndexFile, IndexLoadError, load_index};
