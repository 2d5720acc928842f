//! CLI commands

mod commits;
mod context;
mod logging;
mod select;

pub use commits::{run_parsed, run_sha};
pub use context::CommandContext;
pub use logging::init_logging;
pub use select::run_select;
