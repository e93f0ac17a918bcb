//! Core types and services for stockdata-mcp.
//!
//! This crate owns the provider adapter (configuration value, HTTP transport
//! seam, notice detection) and the control plane that turns typed tool input
//! into provider calls.

pub mod control;
pub mod error;
pub mod http;
pub mod provider;

pub use control::StockControlPlane;
pub use error::{ProviderError, ProviderNotice};
pub use provider::{Payload, ProviderClient, ProviderConfig, ProviderFunction, QueryParams};
pub use reqwest::Url;
