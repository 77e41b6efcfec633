//! REST transport for the Folio backend.
//!
//! The transport attaches the bearer token from the [`TokenStore`] to
//! every outgoing request, retries transient failures with exponential
//! backoff, and maps backend rejections to typed errors carrying the
//! server's message when one is present.

mod client;
mod config;
mod token;

pub use client::{RequestBuilder, RestClient, parse_api_error};
pub use config::{RestConfig, RestConfigBuilder};
pub use token::TokenStore;
