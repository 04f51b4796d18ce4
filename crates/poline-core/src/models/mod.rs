//! Data models for extracted line items and configuration.

pub mod amount;
pub mod config;
pub mod record;

pub use record::{FIELDS, LineRecord};
