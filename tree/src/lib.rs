//! abprune Tree - Game tree generation and printing
//!
//! This crate builds random complete game trees for the engine to evaluate
//! and renders evaluated trees as indented text.

pub mod config;
pub mod error;
pub mod generator;
pub mod printer;

pub use config::TreeConfig;
pub use error::TreeError;
pub use generator::{build_tree, build_tree_with_rng};
pub use printer::{render, Annotated};
