//! # Shoplens Data Source
//!
//! Read-only access to the four CSV exports (orders, payments, customers,
//! geolocation). The files are read once, derived order fields are filled in, and
//! the result is shared as an immutable `Arc<Dataset>`.
//!
//! ## Public API
//!
//! - `DataSource`: a handle that loads the dataset on first use and hands out the same
//!   `Arc` on every later call.
//! - `load_dataset`: the unmemoized load.
//! - `Dataset`: the loaded records plus a `LoadSummary`.
//! - `SourceError`: the fatal load error.

// Declare the modules that constitute this crate.
pub mod dataset;
pub mod error;
pub mod loader;

// Re-export the key components to create a clean, public-facing API.
pub use dataset::{DataSource, Dataset, LoadSummary};
pub use error::SourceError;
pub use loader::load_dataset;
