pub mod config;
pub mod logging;
pub mod probe;
pub mod retry;
