//! Tempest gateway library entry.
//!
//! This crate wires the config loader, upstream fetcher, update loop,
//! observation store, map sessions and HTTP surface into one service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod poller;
pub mod router;
pub mod sessions;
pub mod store;
pub mod upstream;
