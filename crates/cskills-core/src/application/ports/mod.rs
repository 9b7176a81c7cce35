//! Application ports (traits) for external dependencies.
//!
//! Adapters in `cskills-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by services, implemented by infrastructure
//!   - `Filesystem`: file and directory operations
//!   - `PageRenderer`: `PageView` → HTML document
//!   - `ToolRunner`: third-party linters and formatters under `node_modules/.bin`
//!
//! - **Driving (Input) Ports**: the CLI calls services directly

pub mod output;

pub use output::{Filesystem, PageRenderer, ToolOutput, ToolRunner};
