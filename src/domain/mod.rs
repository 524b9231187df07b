//! Domain layer for the preference study
//!
//! This module contains the study's data model and the ports the core uses
//! to reach the video store and the result log storage.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainResult, StudyError};
