//! Error types for tree generation

use thiserror::Error;

/// Reasons a `TreeConfig` cannot produce a tree
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TreeError {
    #[error("branching factor must be at least 1")]
    ZeroBranching,

    #[error("inverted value range: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },

    #[error("value range bounds must be finite (got {min}..={max})")]
    NonFiniteBound { min: f64, max: f64 },

    #[error("value range {min}..={max} is too wide to sample")]
    RangeTooWide { min: f64, max: f64 },

    #[error("depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },

    #[error("tree with branching factor {branching_factor} and depth {depth} exceeds {limit} nodes")]
    TooLarge {
        branching_factor: usize,
        depth: usize,
        limit: usize,
    },
}
