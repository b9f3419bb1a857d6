//! Tenant-scoped persistence and identity layer for the rentals application.

pub mod config;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod logging;
pub mod pagination;
pub mod seeding;
pub mod tenants;
pub mod uuids;

#[cfg(test)]
mod test;
