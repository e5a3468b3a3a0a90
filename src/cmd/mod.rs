//! Command handlers for the idf-size-delta CLI
//!
//! Each submodule handles a specific CLI command.

pub mod collect;
pub mod completions;
pub mod extract;
mod files;
pub mod init;
pub mod render;

// Re-export command functions for convenient access
pub use collect::cmd_collect;
pub use completions::cmd_completions;
pub use extract::{cmd_extract, ExtractArgs};
pub use init::cmd_init;
pub use render::{cmd_render, RenderArgs, ReportFormat};
