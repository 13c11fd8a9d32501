//! Read API consumed by the dashboard.
//!
//! - `GET {base}/` and `{base}/dashboard` : HTML shell, mints a map session
//! - `GET {base}/api/map/:token`          : session coordinates
//! - `GET {base}/api/weather/current`     : latest record or `{}`
//! - `GET {base}/api/weather/history`     : retained records, oldest first

pub mod dashboard;
pub mod error;
pub mod map;
pub mod weather;

pub use error::ApiError;
