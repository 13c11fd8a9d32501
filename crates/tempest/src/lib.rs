//! Top-level facade crate for Tempest.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use tempest_core::*;
}

pub mod gateway {
    pub use tempest_gateway::*;
}
