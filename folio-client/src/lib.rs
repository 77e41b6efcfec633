//! # Folio Client
//!
//! REST transport and typed services for the Folio portfolio-planning
//! backend, plus the allocation store that keeps per-asset target
//! percentages consistent before they are saved.
//!
//! This crate provides:
//! - [`rest`] - bearer-token HTTP client with retry and error mapping
//! - [`services`] - typed endpoint wrappers behind a [`FolioClient`] facade
//! - [`allocation`] - the [`allocation::AllocationStore`] and its seams

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

/// Allocation store and save pipeline
pub mod allocation;

/// REST transport: client, configuration, token store
pub mod rest;

/// Typed endpoint services
pub mod services;

pub use services::FolioClient;
