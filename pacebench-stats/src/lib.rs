#![warn(missing_docs)]
//! PaceBench Statistical Engine
//!
//! Provides the sample reduction and result-grouping layers:
//! - Median and population standard deviation over iteration samples
//! - Equality grouping: clusters candidates by observed output equivalence
//!   and computes baseline-relative ratios within each cluster

mod grouping;
mod summary;

pub use grouping::{
    Comparison, EqualityGroup, GroupAssignment, GroupingOutcome, group_by_equality, value_equality,
};
pub use summary::{Summary, median, population_std_dev, summarize};
