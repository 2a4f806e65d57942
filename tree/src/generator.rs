//! Random game tree generation
//!
//! Builds a complete tree in pre-order: ids count up from 0 as nodes are
//! created, players alternate by depth, and only leaves receive values,
//! drawn uniformly from the configured inclusive range.

use crate::config::TreeConfig;
use crate::error::TreeError;
use abprune_engine::node::{Node, NodeId, Player};
use rand::distr::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Build a tree from `config`, seeding a `SmallRng` from `config.seed`
/// (or a fresh random seed when unset).
pub fn build_tree(config: &TreeConfig) -> Result<Node, TreeError> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::debug!("generating tree with seed {}", seed);
    let ref mut rng = SmallRng::seed_from_u64(seed);
    build_tree_with_rng(config, rng)
}

/// Build a tree from `config`, drawing leaf values from `rng`.
/// `config.seed` is ignored.
pub fn build_tree_with_rng<R: Rng>(
    config: &TreeConfig,
    rng: &mut R,
) -> Result<Node, TreeError> {
    config.validate()?;
    let values = Uniform::new_inclusive(config.min_value, config.max_value).map_err(|_| {
        TreeError::RangeTooWide {
            min: config.min_value,
            max: config.max_value,
        }
    })?;
    let mut builder = Builder {
        config,
        values,
        rng,
        next_id: 0,
    };
    let root = builder.subtree(0, config.root);
    log::debug!(
        "built tree: branching={} depth={} nodes={}",
        config.branching_factor,
        config.depth,
        builder.next_id
    );
    Ok(root)
}

struct Builder<'a, R: Rng> {
    config: &'a TreeConfig,
    values: Uniform<f64>,
    rng: &'a mut R,
    next_id: NodeId,
}

impl<R: Rng> Builder<'_, R> {
    fn subtree(&mut self, level: usize, player: Player) -> Node {
        let id = self.next_id;
        self.next_id += 1;

        if level >= self.config.depth {
            let value = self.values.sample(&mut *self.rng);
            return Node::leaf(id, player, value);
        }

        let mut node = Node::internal(id, player);
        for _ in 0..self.config.branching_factor {
            let child = self.subtree(level + 1, player.opponent());
            node.add_child(child);
        }
        node
    }
}
