//! Tenants

pub mod models;

pub use models::TenantId;
