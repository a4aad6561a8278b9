//! # Shoplens Core Types
//!
//! The shared vocabulary of the workspace: the four record types read from the
//! e-commerce dataset and the small helpers needed to build them from raw text.
//!
//! This is a Layer 0 crate. It has no knowledge of files, configuration or views.

pub mod enums;
pub mod error;
pub mod structs;
pub mod parse;

// Re-export the core types to provide a clean public API.
pub use enums::OrderStatus;
pub use error::CoreError;
pub use structs::{Customer, GeoPoint, Order, Payment};
pub use parse::{parse_number, parse_timestamp};
