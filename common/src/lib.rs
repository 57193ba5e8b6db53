pub mod config;
pub mod error;
pub mod macros;
pub mod network;

// Macro expansions resolve tracing through this re-export, so dependent
// crates do not need a direct path to it in scope.
pub use tracing;
