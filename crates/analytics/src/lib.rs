//! # Shoplens Analytics
//!
//! The derivation and aggregation layer: turns loaded records into the derived
//! fields and grouped result sets each dashboard view consumes.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   HTTP. It depends only on `core-types` (Layer 0).
//! - **Defined or undefined, never failing:** every derivation returns `Option`, and
//!   aggregations silently skip undefined inputs. Only presentation helpers with
//!   caller-supplied parameters (`histogram`) return errors.
//!
//! ## Public API
//!
//! - `derive`: per-order derived fields (delivery duration, purchase year).
//! - `aggregate`: year filtering, grouped means and counts, daily counts.
//! - `sample`: deterministic uniform sampling.
//! - `histogram`: equal-width binning.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod derive;
pub mod error;
pub mod histogram;
pub mod report;
pub mod sample;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{aggregate_mean, available_years, count_by, daily_counts, filter_by_year};
pub use derive::{apply_derivations, derive_delivery_duration, derive_year};
pub use error::AnalyticsError;
pub use histogram::{DEFAULT_BINS, MAX_BINS, histogram};
pub use report::{DailyCount, GroupCount, GroupMean, HistogramBin};
pub use sample::sample_uniform;
