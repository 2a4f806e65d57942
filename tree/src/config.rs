//! Generator configuration

use crate::error::TreeError;
use abprune_engine::node::Player;

/// Upper bound on generated tree size
pub const MAX_NODES: usize = 1 << 26;

/// Upper bound on tree depth. Generation, evaluation, cloning and dropping
/// all recurse once per level.
pub const MAX_DEPTH: usize = 1024;

/// Shape and value range of a generated tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    /// Children per internal node
    pub branching_factor: usize,
    /// Edges from root to every leaf (0 = the root is a leaf)
    pub depth: usize,
    /// Inclusive lower bound for leaf values
    pub min_value: f64,
    /// Inclusive upper bound for leaf values
    pub max_value: f64,
    /// Player at the root
    pub root: Player,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            branching_factor: 3,
            depth: 2,
            min_value: 1.0,
            max_value: 100.0,
            root: Player::Max,
            seed: None,
        }
    }
}

impl TreeConfig {
    pub fn new(branching_factor: usize, depth: usize) -> Self {
        TreeConfig {
            branching_factor,
            depth,
            ..Self::default()
        }
    }

    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn with_root(mut self, root: Player) -> Self {
        self.root = root;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total nodes in the tree: 1 + b + b^2 + ... + b^depth.
    /// `None` on overflow.
    pub fn node_count(&self) -> Option<usize> {
        let mut total: usize = 0;
        let mut level: usize = 1;
        for k in 0..=self.depth {
            total = total.checked_add(level)?;
            if k < self.depth {
                level = level.checked_mul(self.branching_factor)?;
            }
        }
        Some(total)
    }

    /// Check that this configuration describes a buildable tree.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.branching_factor == 0 {
            return Err(TreeError::ZeroBranching);
        }
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(TreeError::NonFiniteBound {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.min_value > self.max_value {
            return Err(TreeError::InvertedRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if !(self.max_value - self.min_value).is_finite() {
            return Err(TreeError::RangeTooWide {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.depth > MAX_DEPTH {
            return Err(TreeError::TooDeep {
                depth: self.depth,
                limit: MAX_DEPTH,
            });
        }
        match self.node_count() {
            Some(n) if n <= MAX_NODES => Ok(()),
            _ => Err(TreeError::TooLarge {
                branching_factor: self.branching_factor,
                depth: self.depth,
                limit: MAX_NODES,
            }),
        }
    }
}
