//! Reqwest-backed REST gateway adapter.
//!
//! The adapter owns transport details only: endpoint construction, request
//! serialisation, timeout and HTTP error mapping, and JSON decoding into
//! domain types. Everything it exposes to the domain flows through the
//! gateway ports.

mod config;
mod dto;
mod gateway;

pub use config::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT, RestGatewayConfig};
pub use gateway::{RestGateway, RestGatewayBuildError};
