//! Indented text rendering of an annotated tree
//!
//! One line per node in pre-order, two spaces of indentation per level:
//!
//! ```text
//! MAX node 0: 3.00
//!   MIN node 1: 3.00
//!     Leaf 2: 3.00
//!     Leaf 3: 5.00
//!   MIN node 4: 2.00
//!     Leaf 5: 2.00
//!     Leaf 6: 9.00 [PRUNED]
//! ```
//!
//! Internal nodes show their value once one has been computed, including 0.0.

use abprune_engine::node::Node;
use std::fmt;

const PRUNED_TAG: &str = " [PRUNED]";

/// Write `node` and its subtree to `out`.
pub fn write_tree<W: fmt::Write>(out: &mut W, node: &Node) -> fmt::Result {
    write_level(out, node, 0)
}

fn write_level<W: fmt::Write>(out: &mut W, node: &Node, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str("  ")?;
    }

    match (node.is_leaf(), node.value) {
        (true, Some(v)) => write!(out, "Leaf {}: {:.2}", node.id, v)?,
        (true, None) => write!(out, "Leaf {}", node.id)?,
        (false, Some(v)) => write!(out, "{} node {}: {:.2}", node.player, node.id, v)?,
        (false, None) => write!(out, "{} node {}", node.player, node.id)?,
    }
    if node.pruned {
        out.write_str(PRUNED_TAG)?;
    }
    out.write_char('\n')?;

    for child in &node.children {
        write_level(out, child, level + 1)?;
    }
    Ok(())
}

/// Render `node` and its subtree to a string.
pub fn render(node: &Node) -> String {
    Annotated(node).to_string()
}

/// `Display` adapter for printing a whole tree with `{}`
pub struct Annotated<'a>(pub &'a Node);

impl fmt::Display for Annotated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self.0)
    }
}
