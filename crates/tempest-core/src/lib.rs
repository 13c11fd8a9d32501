//! Tempest core: transport-agnostic observation model, normalizer, ring buffer
//! and error types.
//!
//! This crate defines the data contracts shared by the gateway and its tests.
//! It carries no HTTP or runtime dependencies, so the normalization rules and
//! the retention buffer can be exercised without a network.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Upstream data is untrusted: anything unexpected in a response becomes a
//! default value or a skipped cycle, never a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod history;
pub mod observation;

/// Shared result type.
pub use error::{Result, TempestError};
pub use history::HistoryRing;
pub use observation::{normalize, ObservationRecord, RawObservation, Units};
