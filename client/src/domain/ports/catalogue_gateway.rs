//! Port for serviceable-district reference data.

use async_trait::async_trait;

use crate::domain::district::District;

use super::GatewayError;

/// Port for fetching the serviceable delivery districts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueGateway: Send + Sync {
    /// Fetch all districts, including inactive ones; callers filter on
    /// [`District::is_active`] where relevant.
    async fn districts(&self) -> Result<Vec<District>, GatewayError>;
}
