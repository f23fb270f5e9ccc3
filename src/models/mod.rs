//! Data models for the proxy contract and the stored records.

/// API Gateway proxy event and response
pub mod api;
/// Portfolio records and numeric normalization
pub mod record;
