//! Screenshot comparison
//!
//! - [`reconcile`] brings two captures onto a shared canvas
//! - [`compare`] counts perceptually different pixels and draws a diff image
//! - [`Aggregator`] runs both over every baseline/current pair and persists
//!   the [`ResultSet`]

pub mod aggregate;
pub mod pixel;
pub mod reconcile;
pub mod results;

pub use aggregate::{index_baseline_keys, Aggregator};
pub use pixel::{compare, DiffOptions, PixelDiff};
pub use reconcile::reconcile;
pub use results::{ComparisonResult, ResultSet};
