//! Infrastructure adapters for cskills.
//!
//! This crate implements the ports defined in `cskills-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod tools;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HtmlRenderer;
pub use tools::{NodeToolRunner, StaticToolRunner};
