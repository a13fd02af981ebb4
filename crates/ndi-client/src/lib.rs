//! HTTP client for the Nexus Dashboard Insights telemetry API.
//!
//! This crate provides [`NdClient`], an authenticated, read-only client for
//! the Nexus Dashboard Insights (NDI) telemetry endpoints. It implements
//! [`ndi_core::ComplianceGateway`], so it can be handed directly to the
//! compliance analysis layer.

#![doc(html_root_url = "https://docs.rs/ndi-client/0.3.0")]

mod client;
mod config;
mod gateway;
pub mod api;

pub use client::{NdClient, NdClientBuilder};
pub use config::*;
pub use ndi_core::{NdiError, Result};
