//! Driven ports on the edge of the domain.
//!
//! Ports describe how the domain expects to talk to the backend API. Each
//! trait returns strongly typed [`GatewayError`] values so adapters map
//! transport failures into predictable variants, and every read-path caller
//! is forced into an explicit decision when a fetch fails instead of
//! receiving an implicit empty default.

mod address_gateway;
mod catalogue_gateway;
mod error;
mod order_gateway;
mod user_gateway;

pub use address_gateway::AddressGateway;
pub use catalogue_gateway::CatalogueGateway;
pub use error::GatewayError;
pub use order_gateway::OrderGateway;
pub use user_gateway::UserGateway;

#[cfg(test)]
pub use address_gateway::MockAddressGateway;
#[cfg(test)]
pub use catalogue_gateway::MockCatalogueGateway;
#[cfg(test)]
pub use order_gateway::MockOrderGateway;
#[cfg(test)]
pub use user_gateway::MockUserGateway;
