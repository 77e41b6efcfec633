//! Authentication service.
//!
//! Login stores the bearer token through the shared [`TokenStore`];
//! logout clears it. Registration applies the password-strength minimum
//! locally before the request goes out.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use folio_core::error::Result;
use folio_core::validate::validate_password;

use crate::rest::RestClient;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Typed wrapper over the `/auth` endpoints.
pub struct AuthApi {
    rest: Arc<RestClient>,
}

impl AuthApi {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Registers a new account, then stores the returned token.
    ///
    /// Passwords below the strength minimum are rejected locally.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        validate_password(password)?;
        let response: TokenResponse = self
            .rest
            .post("/auth/register")
            .json(&Credentials { email, password })
            .send_json()
            .await?;
        self.rest.tokens().set(response.token)?;
        info!(email, "Registered");
        Ok(())
    }

    /// Logs in and stores the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response: TokenResponse = self
            .rest
            .post("/auth/login")
            .json(&Credentials { email, password })
            .send_json()
            .await?;
        self.rest.tokens().set(response.token)?;
        info!(email, "Logged in");
        Ok(())
    }

    /// Clears the stored token. Purely local; the backend's tokens are
    /// stateless.
    pub fn logout(&self) -> Result<()> {
        self.rest.tokens().clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Returns true if a token is currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.rest.tokens().is_authenticated()
    }
}
