//! Lightweight in-process metrics (dependency-free).
//!
//! Poller and session counters are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;
