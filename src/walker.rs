//! Depth-first application of a rule set to a whole tree.

use log::{debug, trace, warn};

use crate::applier::Appliers;
use crate::cascade::RuleSet;
use crate::selector::MatchContext;
use crate::tree::{ClassLookup, StyleTree};

/// Counters collected while styling a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleStats {
    pub nodes_visited: usize,
    /// Declarations handed to an applier.
    pub declarations_applied: usize,
    /// Declarations with no applier for the node's kind.
    pub declarations_skipped: usize,
}

/// Style `root` and every node below it.
///
/// Nodes are visited in pre-order: a node's declarations are applied before
/// any of its children are resolved. Handles the tree does not contain are
/// skipped. The tree must be acyclic.
pub fn apply_styles<T: StyleTree>(
    tree: &mut T,
    rules: &RuleSet<T::Kind>,
    appliers: &Appliers<T>,
    classes: &dyn ClassLookup<T::Node>,
    root: T::Node,
) -> StyleStats {
    let mut stats = StyleStats::default();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !tree.contains(node) {
            warn!("skipping {node:?}: not in the tree");
            continue;
        }
        stats.nodes_visited += 1;

        let style = {
            let cx = MatchContext::new(&*tree, appliers.kinds(), classes);
            rules.resolve(&cx, node)
        };
        trace!("{:?}: {} declarations", node, style.len());

        for decl in style {
            if appliers.apply(tree, node, decl) {
                stats.declarations_applied += 1;
            } else {
                stats.declarations_skipped += 1;
            }
        }

        // Reverse so the first child is popped first.
        stack.extend(tree.children(node).into_iter().rev());
    }

    debug!(
        "styled {} nodes: {} declarations applied, {} skipped",
        stats.nodes_visited, stats.declarations_applied, stats.declarations_skipped
    );
    stats
}
