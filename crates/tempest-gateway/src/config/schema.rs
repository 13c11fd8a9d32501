use std::time::Duration;

use serde::Deserialize;
use tempest_core::error::{Result, TempestError};

pub const DEFAULT_API_TEMPLATE: &str = "https://swd.weatherflow.com/swd/rest/observations/stn/{station_id}?bucket=1&ob_fields=timestamp%2Creport_interval%2Cwind_lull%2Cwind_avg%2Cwind_gust%2Cwind_dir%2Cstation_pressure%2Csea_level_pressure%2Cair_temp%2Crh%2Cilluminance%2Cuv%2Csolar_radiation%2Cprecip_accumulation%2Clocal_day_precip_accumulation%2Cprecip_type%2Cstrike_count%2Cstrike_distance&units_temp=f&units_wind=mph&units_pressure=mb&units_precip=in&units_distance=mi&api_key={api_key}";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TempestConfig {
    pub version: u32,

    pub station: StationSection,

    #[serde(default)]
    pub upstream: UpstreamSection,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub sessions: SessionSection,
}

impl TempestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TempestError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.station.validate()?;
        self.upstream.validate()?;
        self.gateway.validate()?;
        self.sessions.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationSection {
    pub api_key: String,
    pub station_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationSection {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(TempestError::BadConfig("station.api_key must not be empty".into()));
        }
        if self.station_id.trim().is_empty() {
            return Err(TempestError::BadConfig("station.station_id must not be empty".into()));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TempestError::BadConfig(
                "station.latitude must be between -90 and 90".into(),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TempestError::BadConfig(
                "station.longitude must be between -180 and 180".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default = "default_api_template")]
    pub api_template: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,

    /// Explicit ring size. When unset it is derived from retention and interval.
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            api_template: default_api_template(),
            poll_interval_secs: default_poll_interval_secs(),
            timeout_ms: default_timeout_ms(),
            retention_secs: default_retention_secs(),
            history_capacity: None,
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !self.api_template.contains("{station_id}") {
            return Err(TempestError::BadConfig(
                "upstream.api_template must contain {station_id}".into(),
            ));
        }
        if !(1..=86_400).contains(&self.poll_interval_secs) {
            return Err(TempestError::BadConfig(
                "upstream.poll_interval_secs must be between 1 and 86400".into(),
            ));
        }
        if !(1_000..=60_000).contains(&self.timeout_ms) {
            return Err(TempestError::BadConfig(
                "upstream.timeout_ms must be between 1000 and 60000".into(),
            ));
        }
        if self.retention_secs < self.poll_interval_secs {
            return Err(TempestError::BadConfig(
                "upstream.retention_secs must be at least poll_interval_secs".into(),
            ));
        }
        if let Some(cap) = self.history_capacity {
            if !(1..=1_000_000).contains(&cap) {
                return Err(TempestError::BadConfig(
                    "upstream.history_capacity must be between 1 and 1000000".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of records kept in memory.
    ///
    /// Defaults to one retention window at the configured cadence, so a 60s
    /// interval keeps 1440 records and a 15s interval keeps 5760.
    pub fn history_capacity(&self) -> usize {
        self.history_capacity.unwrap_or_else(|| {
            let interval = self.poll_interval_secs.max(1);
            let slots = self.retention_secs.div_ceil(interval);
            usize::try_from(slots).unwrap_or(usize::MAX).max(1)
        })
    }
}

fn default_api_template() -> String {
    DEFAULT_API_TEMPLATE.into()
}
fn default_poll_interval_secs() -> u64 {
    60
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_retention_secs() -> u64 {
    86_400
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_base_path")]
    pub base_path: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: default_base_path(),
            static_dir: default_static_dir(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(TempestError::BadConfig("gateway.host must not be empty".into()));
        }
        if !self.base_path.is_empty()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(TempestError::BadConfig(
                "gateway.base_path must be empty or start with '/' and not end with '/'".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}
fn default_base_path() -> String {
    "/tempest".into()
}
fn default_static_dir() -> String {
    "static".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self { ttl_secs: default_session_ttl_secs() }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(60..=604_800).contains(&self.ttl_secs) {
            return Err(TempestError::BadConfig(
                "sessions.ttl_secs must be between 60 and 604800".into(),
            ));
        }
        Ok(())
    }
}

fn default_session_ttl_secs() -> u64 {
    86_400
}
