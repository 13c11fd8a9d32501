//! Map session store: opaque token -> station coordinates.
//!
//! A token is minted on each dashboard render so the page can fetch its map
//! position without the coordinates appearing in the HTML. Expired entries are
//! swept lazily from the render path; there is no background cleaner.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;

use tempest_core::error::{Result, TempestError};

/// Random bytes per token (hex encoded to twice this length).
const TOKEN_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
struct MapSession {
    coords: Coordinates,
    created_at: DateTime<Utc>,
}

pub struct MapSessionStore {
    sessions: DashMap<String, MapSession>,
    ttl: chrono::Duration,
}

impl MapSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(1)),
        }
    }

    /// Mint a token for `coords`, stamped with the current time.
    pub fn create(&self, coords: Coordinates) -> String {
        self.create_at(coords, Utc::now())
    }

    pub fn create_at(&self, coords: Coordinates, created_at: DateTime<Utc>) -> String {
        loop {
            let token = new_token();
            if let Entry::Vacant(slot) = self.sessions.entry(token.clone()) {
                slot.insert(MapSession { coords, created_at });
                return token;
            }
        }
    }

    pub fn lookup(&self, token: &str) -> Result<Coordinates> {
        self.sessions
            .get(token)
            .map(|s| s.value().coords)
            .ok_or(TempestError::UnknownSession)
    }

    /// Drop sessions older than the TTL. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| now - s.created_at <= self.ttl);
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn new_token() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
