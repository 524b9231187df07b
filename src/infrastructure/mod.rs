//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Project setup for `vidpref init`
//!
//! Storage adapters for the domain ports live in `crate::adapters`.

pub mod config;
pub mod logging;
pub mod setup;
