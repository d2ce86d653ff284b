//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelEntry`]: a named model routed through the AI gateway
//! - [`catalog`]: the built-in model catalog and default roster
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe text helpers used when rendering model output

pub mod catalog;
pub mod error;
pub mod model;
pub mod string;
