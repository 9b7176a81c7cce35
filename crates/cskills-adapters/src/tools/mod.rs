//! External tool adapters.

mod node;
mod fixed;

pub use fixed::StaticToolRunner;
pub use node::NodeToolRunner;
