//! Typed services over the backend's REST endpoints.
//!
//! Each resource gets a thin wrapper that validates form input locally,
//! issues the request, and propagates typed errors to the caller. Services
//! hang off the [`FolioClient`] facade and share one transport.

mod auth;
mod assets;
mod changes;
mod portfolios;
mod projection;

pub use assets::AssetsApi;
pub use auth::AuthApi;
pub use changes::ChangesApi;
pub use portfolios::PortfoliosApi;
pub use projection::ProjectionApi;

use std::sync::Arc;

use folio_core::config::ClientSettings;
use folio_core::error::Result;

use crate::rest::{RestClient, RestConfig, TokenStore};

/// Facade over the backend services.
///
/// # Example
///
/// ```ignore
/// use folio_client::FolioClient;
/// use folio_core::config::ClientSettings;
///
/// let settings = ClientSettings::default();
/// let client = FolioClient::new(&settings)?;
/// let portfolios = client.portfolios().list().await?;
/// ```
#[derive(Clone)]
pub struct FolioClient {
    rest: Arc<RestClient>,
}

impl FolioClient {
    /// Creates a client from settings, loading the persisted bearer token
    /// from the configured path.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let tokens = Arc::new(TokenStore::load(&settings.token_path));
        let rest = RestClient::new(RestConfig::from(settings), tokens)?;
        Ok(Self {
            rest: Arc::new(rest),
        })
    }

    /// Creates a client from explicit parts.
    pub fn from_parts(config: RestConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let rest = RestClient::new(config, tokens)?;
        Ok(Self {
            rest: Arc::new(rest),
        })
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn rest(&self) -> &Arc<RestClient> {
        &self.rest
    }

    /// Authentication service.
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(Arc::clone(&self.rest))
    }

    /// Portfolio CRUD service.
    #[must_use]
    pub fn portfolios(&self) -> PortfoliosApi {
        PortfoliosApi::new(Arc::clone(&self.rest))
    }

    /// Asset CRUD and bulk-allocation service.
    #[must_use]
    pub fn assets(&self) -> AssetsApi {
        AssetsApi::new(Arc::clone(&self.rest))
    }

    /// Planned-change CRUD service.
    #[must_use]
    pub fn changes(&self) -> ChangesApi {
        ChangesApi::new(Arc::clone(&self.rest))
    }

    /// Projection service.
    #[must_use]
    pub fn projection(&self) -> ProjectionApi {
        ProjectionApi::new(Arc::clone(&self.rest))
    }
}
