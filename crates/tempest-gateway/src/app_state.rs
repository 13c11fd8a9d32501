//! Shared application state for the Tempest gateway.
//!
//! Built once at startup and cloned into the poller and every handler. All
//! mutable state sits behind the `Arc` handles here, not in globals.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TempestConfig;
use crate::obs::metrics::GatewayMetrics;
use crate::poller::Poller;
use crate::sessions::{Coordinates, MapSessionStore};
use crate::store::ObservationStore;
use crate::upstream::ObservationSource;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<TempestConfig>,
    store: Arc<ObservationStore>,
    sessions: Arc<MapSessionStore>,
    metrics: Arc<GatewayMetrics>,
}

impl AppState {
    pub fn new(cfg: TempestConfig) -> Self {
        let store = ObservationStore::new(cfg.upstream.history_capacity());
        let sessions = MapSessionStore::new(Duration::from_secs(cfg.sessions.ttl_secs));

        Self {
            cfg: Arc::new(cfg),
            store: Arc::new(store),
            sessions: Arc::new(sessions),
            metrics: Arc::new(GatewayMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &TempestConfig {
        &self.cfg
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    pub fn sessions(&self) -> &MapSessionStore {
        &self.sessions
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    /// Configured station position, handed out through map sessions.
    pub fn station_coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.cfg.station.latitude,
            longitude: self.cfg.station.longitude,
        }
    }

    /// Build the update loop over this state's store and metrics.
    pub fn poller(&self, source: Arc<dyn ObservationSource>) -> Poller {
        Poller::new(
            source,
            Arc::clone(&self.store),
            Arc::clone(&self.metrics),
            self.cfg.upstream.poll_interval(),
        )
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }
}
