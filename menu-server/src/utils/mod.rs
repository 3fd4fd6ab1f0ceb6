//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - boundary error handling
//! - [`logger`] - tracing setup
//! - [`validation`] - input validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult};
