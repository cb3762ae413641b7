//! Infrastructure adapters: remote API access and telemetry bootstrap.

pub mod api;
pub mod error;
pub mod telemetry;
