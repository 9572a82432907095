//! `retrykit config` – print where settings come from and what they are.

use anyhow::Result;
use retrykit_core::config::{self, RetrykitConfig};
use std::path::Path;

pub fn run_config(cfg: &RetrykitConfig, explicit: Option<&Path>) -> Result<i32> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", cfg.to_toml()?);
    Ok(0)
}
