//! # Foodcourt Shared
//!
//! Shared utilities, types, configuration, and telemetry for the
//! food-court ordering platform.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
