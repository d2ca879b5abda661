//! # Foodcourt API
//!
//! HTTP handlers, DTOs, and application state.

pub mod handlers;
pub mod response;
pub mod state;
