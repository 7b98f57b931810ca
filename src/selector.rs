//! Selectors: kind, class and ancestor predicates over tree nodes.

use std::fmt;

use crate::kind::{KindTable, NodeKind};
use crate::tree::{ClassLookup, StyleTree};

/// Everything a selector needs to look at while matching.
pub struct MatchContext<'a, T: StyleTree> {
    pub tree: &'a T,
    pub kinds: &'a KindTable<T::Kind>,
    pub classes: &'a dyn ClassLookup<T::Node>,
}

impl<'a, T: StyleTree> MatchContext<'a, T> {
    /// Bundle a tree, its kind table and its class registry.
    pub fn new(
        tree: &'a T,
        kinds: &'a KindTable<T::Kind>,
        classes: &'a dyn ClassLookup<T::Node>,
    ) -> Self {
        Self {
            tree,
            kinds,
            classes,
        }
    }
}

// Manual impls: derives would require `T: Clone`.
impl<T: StyleTree> Clone for MatchContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: StyleTree> Copy for MatchContext<'_, T> {}

/// A single predicate over a node.
///
/// All three constraints are optional and must all hold. A selector with no
/// constraints matches every node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector<K> {
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    kind: Option<K>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    class: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    ancestor: Option<Box<Selector<K>>>,
}

impl<K> Default for Selector<K> {
    fn default() -> Self {
        Self {
            kind: None,
            class: None,
            ancestor: None,
        }
    }
}

impl<K: NodeKind> Selector<K> {
    /// The wildcard selector.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match nodes of `kind` or any of its subtypes.
    pub fn kind(kind: K) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Match nodes carrying `class`, whatever their kind.
    pub fn class(class: impl Into<String>) -> Self {
        Self::any().with_class(class)
    }

    /// Builder: require the style class `class`. An empty name means no
    /// class constraint.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.class = (!class.is_empty()).then_some(class);
        self
    }

    /// Builder: require some ancestor (not only the parent) to match `ancestor`.
    pub fn within(mut self, ancestor: Selector<K>) -> Self {
        self.ancestor = Some(Box::new(ancestor));
        self
    }

    /// Required kind, if any.
    pub fn kind_constraint(&self) -> Option<K> {
        self.kind
    }

    /// Required style class, if any.
    pub fn class_constraint(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Selector some ancestor must match, if any.
    pub fn ancestor_constraint(&self) -> Option<&Selector<K>> {
        self.ancestor.as_deref()
    }

    /// Test whether `node` satisfies every constraint of this selector.
    pub fn matches<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> bool
    where
        T: StyleTree<Kind = K>,
    {
        self.kind_matches(cx, node)
            && self.class_matches(cx, node)
            && self.ancestor_matches(cx, node)
    }

    fn kind_matches<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> bool
    where
        T: StyleTree<Kind = K>,
    {
        match self.kind {
            None => true,
            Some(kind) => cx.kinds.is_subtype(cx.tree.kind(node), kind),
        }
    }

    fn class_matches<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> bool
    where
        T: StyleTree<Kind = K>,
    {
        let Some(class) = self.class.as_deref().filter(|c| !c.is_empty()) else {
            return true;
        };
        match cx.classes.classes_for(node) {
            Some(classes) => classes.iter().any(|c| c == class),
            None => false,
        }
    }

    fn ancestor_matches<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> bool
    where
        T: StyleTree<Kind = K>,
    {
        let Some(ancestor_selector) = self.ancestor.as_deref() else {
            return true;
        };

        // Walk up ancestors until one matches or we reach the root.
        let mut ancestor = cx.tree.parent(node);
        while let Some(anc) = ancestor {
            if ancestor_selector.matches(cx, anc) {
                return true;
            }
            ancestor = cx.tree.parent(anc);
        }
        false
    }
}

impl<K: NodeKind> fmt::Display for Selector<K> {
    /// CSS-like notation: `Button Label.Foo`, `.Foo`, `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ancestor) = &self.ancestor {
            write!(f, "{ancestor} ")?;
        }
        match (&self.kind, &self.class) {
            (None, None) => f.write_str("*"),
            (kind, class) => {
                if let Some(kind) = kind {
                    f.write_str(kind.name())?;
                }
                if let Some(class) = class {
                    write!(f, ".{class}")?;
                }
                Ok(())
            }
        }
    }
}
