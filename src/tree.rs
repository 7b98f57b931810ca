//! Host capabilities: tree navigation and the style-class registry.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::kind::NodeKind;

/// The view tree being styled, as seen by the style engine.
///
/// The engine never owns nodes. It reads kinds and structure through this
/// trait and hands the tree back to appliers mutably.
pub trait StyleTree {
    /// Identity handle of a node.
    type Node: Copy + Eq + Hash + fmt::Debug;
    /// Node type tag.
    type Kind: NodeKind;

    /// The runtime kind of `node`.
    fn kind(&self, node: Self::Node) -> Self::Kind;

    /// The parent of `node`, if the host supports upward lookup.
    ///
    /// Hosts without parent links keep the default, which makes every
    /// ancestor-constrained selector fail.
    fn parent(&self, _node: Self::Node) -> Option<Self::Node> {
        None
    }

    /// Children of `node` in display order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Whether `node` belongs to this tree.
    ///
    /// Handles for which this returns false are never styled.
    fn contains(&self, _node: Self::Node) -> bool {
        true
    }
}

/// Source of style classes for nodes.
pub trait ClassLookup<N> {
    /// Classes attached to `node`, or `None` if the node has no entry.
    fn classes_for(&self, node: N) -> Option<&[String]>;
}

/// Explicit node → style-class registry.
///
/// Passed into style resolution by reference; there is no process-wide
/// registry.
#[derive(Debug, Clone)]
pub struct StyleClasses<N> {
    classes: HashMap<N, Vec<String>>,
}

impl<N> Default for StyleClasses<N> {
    fn default() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> StyleClasses<N> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `class` to `node`. Classes keep insertion order.
    pub fn add_class(&mut self, node: N, class: impl Into<String>) {
        self.classes.entry(node).or_default().push(class.into());
    }

    /// Whether `node` carries `class`.
    pub fn has_class(&self, node: N, class: &str) -> bool {
        self.classes
            .get(&node)
            .is_some_and(|list| list.iter().any(|c| c == class))
    }

    /// Number of nodes with at least one class entry.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no node has classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl<N: Copy + Eq + Hash> ClassLookup<N> for StyleClasses<N> {
    fn classes_for(&self, node: N) -> Option<&[String]> {
        self.classes.get(&node).map(|list| list.as_slice())
    }
}

/// A registry with no classes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClasses;

impl<N> ClassLookup<N> for NoClasses {
    fn classes_for(&self, _node: N) -> Option<&[String]> {
        None
    }
}
