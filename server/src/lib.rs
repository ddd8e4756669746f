//! Catalog attribute service
//!
//! GraphQL mutations for product attributes and their values, backed by
//! SQLite.

pub mod api;
pub mod attribute;
pub mod attribute_value;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod metrics_exporter;
pub mod validation;

pub mod test_helpers;
