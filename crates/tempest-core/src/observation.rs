//! Station observations: the upstream payload and the flat record derived from it.
//!
//! The upstream API returns observations column-oriented: `ob_fields` names the
//! columns and each `obs` row carries values in the same order, newest row
//! first. `normalize` turns the newest row into an [`ObservationRecord`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream response body.
///
/// Only the keys the normalizer reads are modelled. Station metadata, status
/// blocks and any other keys are ignored. Column names and rows stay as raw
/// JSON values: only the newest row is ever read, so a bad older row or a
/// non-string column name must not reject the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    /// Column names, positionally matching each `obs` row.
    #[serde(default)]
    pub ob_fields: Vec<Value>,
    /// Value rows, newest first. `None` when the key is absent or null.
    #[serde(default)]
    pub obs: Option<Vec<Value>>,
    /// Unit strings keyed by `units_*` names.
    #[serde(default)]
    pub units: Option<Map<String, Value>>,
}

impl RawObservation {
    /// Newest value row, if it exists and is an array.
    pub fn newest_row(&self) -> Option<&[Value]> {
        self.obs.as_ref()?.first()?.as_array().map(Vec::as_slice)
    }

    /// Column names that are strings; other entries are `None` so positions
    /// still line up with the row.
    pub fn field_names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.ob_fields.iter().map(Value::as_str)
    }
}

/// Display units attached to every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub temperature: String,
    pub wind_speed: String,
    pub precipitation: String,
    pub pressure: String,
    pub distance: String,
    pub illuminance: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            temperature: "°F".into(),
            wind_speed: "mph".into(),
            precipitation: "in".into(),
            pressure: "mb".into(),
            distance: "mi".into(),
            illuminance: "lux".into(),
        }
    }
}

impl Units {
    /// Read units from the upstream `units` map, falling back per field.
    pub fn from_upstream(map: Option<&Map<String, Value>>) -> Self {
        let defaults = Self::default();
        let Some(map) = map else { return defaults; };

        let pick = |key: &str, fallback: String| -> String {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or(fallback)
        };

        Self {
            temperature: pick("units_temp", defaults.temperature),
            wind_speed: pick("units_wind", defaults.wind_speed),
            precipitation: pick("units_precip", defaults.precipitation),
            pressure: pick("units_pressure", defaults.pressure),
            distance: pick("units_distance", defaults.distance),
            illuminance: pick("units_brightness", defaults.illuminance),
        }
    }
}

/// One normalized snapshot. Immutable once built; shared behind `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Capture time on this host, not the station's own timestamp.
    pub timestamp: DateTime<Utc>,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gust: f64,
    pub wind_lull: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub illuminance: f64,
    pub precipitation: f64,
    pub lightning_strike_count: f64,
    pub lightning_strike_distance: f64,
    pub units: Units,
}

/// Build a record from the newest row of `raw`.
///
/// Returns `None` when the response has no rows or the newest row is not an
/// array. Columns are zipped against the row positionally and the longer side
/// is truncated; non-string column names are skipped. Any projected field
/// that is absent, null, or non-numeric reads as 0.
pub fn normalize(raw: &RawObservation, captured_at: DateTime<Utc>) -> Option<ObservationRecord> {
    let row = raw.newest_row()?;

    if raw.ob_fields.len() != row.len() {
        tracing::debug!(
            fields = raw.ob_fields.len(),
            values = row.len(),
            "ob_fields and obs row differ in length; truncating"
        );
    }

    let values: HashMap<&str, f64> = raw
        .field_names()
        .zip(row.iter())
        .filter_map(|(name, v)| Some((name?, v.as_f64()?)))
        .collect();
    let field = |name: &str| values.get(name).copied().unwrap_or(0.0);

    Some(ObservationRecord {
        timestamp: captured_at,
        wind_speed: field("wind_avg"),
        wind_direction: field("wind_dir"),
        wind_gust: field("wind_gust"),
        wind_lull: field("wind_lull"),
        temperature: field("air_temp"),
        humidity: field("rh"),
        illuminance: field("illuminance"),
        precipitation: field("precip_accumulation"),
        lightning_strike_count: field("strike_count"),
        lightning_strike_distance: field("strike_distance"),
        units: Units::from_upstream(raw.units.as_ref()),
    })
}
