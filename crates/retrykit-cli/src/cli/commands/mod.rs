//! CLI command handlers, one per file.

mod config;
mod exec;
mod probe;

pub use config::run_config;
pub use exec::run_exec;
pub use probe::run_probe;
