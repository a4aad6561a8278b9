//! # Shoplens Views
//!
//! Maps a (page, analysis, year) selection to exactly one aggregation pipeline and
//! runs it against the loaded dataset.
//!
//! Views are stateless: every `ViewSelector::select` call recomputes its result from
//! the immutable dataset. A year with no orders produces an empty view, never an error.

pub mod error;
pub mod request;
pub mod selector;
pub mod view;

pub use error::ViewError;
pub use request::{Analysis, Page, ViewRequest};
pub use selector::{ViewSelector, default_year};
pub use view::View;
