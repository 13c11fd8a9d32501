//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use tempest_core::error::{Result, TempestError};

pub use schema::{GatewaySection, SessionSection, StationSection, TempestConfig, UpstreamSection};

pub fn load_from_file(path: &str) -> Result<TempestConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TempestError::BadConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TempestConfig> {
    let cfg: TempestConfig = serde_yaml::from_str(s)
        .map_err(|e| TempestError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
