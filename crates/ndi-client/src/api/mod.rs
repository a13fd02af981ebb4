//! API endpoint modules.

mod compliance;
mod epochs;

pub use compliance::ComplianceApi;
pub use epochs::EpochApi;
