//! Appliers: the functions that write declarations onto nodes.
//!
//! Appliers are keyed by `(node kind, property)`. Looking one up walks from
//! the node's own kind towards the root of the kind hierarchy, so a
//! registration for a base kind serves every subtype that does not register
//! its own.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::declaration::{Declaration, Property, PropertyId};
use crate::kind::{KindTable, NodeKind, walk};
use crate::tree::StyleTree;

/// Type-erased applier. Only ever called with declarations of the property it
/// was registered for.
type ApplyFn<T> = Box<dyn Fn(&mut T, <T as StyleTree>::Node, &Declaration)>;

/// Mutable registration phase of an applier table.
pub struct AppliersBuilder<T: StyleTree> {
    appliers: Vec<ApplyFn<T>>,
    table: HashMap<(T::Kind, PropertyId), usize>,
}

impl<T: StyleTree> Default for AppliersBuilder<T> {
    fn default() -> Self {
        Self {
            appliers: Vec::new(),
            table: HashMap::new(),
        }
    }
}

impl<T: StyleTree + 'static> AppliersBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `apply` for property `P` on nodes of `kind` (and subtypes
    /// without their own registration).
    ///
    /// Registering the same `(kind, P)` twice replaces the earlier applier.
    pub fn register<P, F>(&mut self, kind: T::Kind, apply: F) -> &mut Self
    where
        P: Property,
        F: Fn(&mut T, T::Node, &P::Value) + 'static,
    {
        let erased: ApplyFn<T> = Box::new(move |tree, node, decl| {
            if let Some(value) = P::value(decl) {
                apply(tree, node, value);
            }
        });
        let slot = self.appliers.len();
        self.appliers.push(erased);
        self.table.insert((kind, P::ID), slot);
        self
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Freeze the table.
    ///
    /// The supertype walk is resolved ahead of time for every kind in the
    /// table, so lookups during traversal are a single hash probe.
    pub fn build(self, kinds: KindTable<T::Kind>) -> Appliers<T> {
        let mut resolved = HashMap::new();
        for &kind in <T::Kind as NodeKind>::ALL {
            for &property in PropertyId::ALL {
                if let Some(slot) = find_slot(&self.table, &kinds, kind, property) {
                    resolved.insert((kind, property), slot);
                }
            }
        }

        debug!(
            "built applier table: {} registrations, {} resolved entries",
            self.table.len(),
            resolved.len()
        );

        Appliers {
            appliers: self.appliers,
            table: self.table,
            resolved,
            kinds,
        }
    }
}

/// Frozen applier table, read-only during traversal.
pub struct Appliers<T: StyleTree> {
    appliers: Vec<ApplyFn<T>>,
    /// Exact registrations.
    table: HashMap<(T::Kind, PropertyId), usize>,
    /// Registrations after the supertype walk, for every kind in `ALL`.
    resolved: HashMap<(T::Kind, PropertyId), usize>,
    kinds: KindTable<T::Kind>,
}

impl<T: StyleTree> Appliers<T> {
    /// The kind table the appliers were built with.
    pub fn kinds(&self) -> &KindTable<T::Kind> {
        &self.kinds
    }

    /// Whether an applier exists for `property` on `kind`, directly or
    /// through a supertype.
    pub fn has_applier(&self, kind: T::Kind, property: PropertyId) -> bool {
        self.find_slot(kind, property).is_some()
    }

    /// The kind whose registration serves `property` for `kind`.
    pub fn provider(&self, kind: T::Kind, property: PropertyId) -> Option<T::Kind> {
        walk(kind).find(|k| self.table.contains_key(&(*k, property)))
    }

    /// Apply `decl` to `node`.
    ///
    /// Does nothing if no applier is registered for the node's kind or any
    /// of its supertypes. Returns whether an applier ran.
    pub fn apply(&self, tree: &mut T, node: T::Node, decl: &Declaration) -> bool {
        if !tree.contains(node) {
            trace!("{node:?} is not in the tree");
            return false;
        }
        let kind = tree.kind(node);
        match self.find_slot(kind, decl.property()) {
            Some(slot) => {
                (self.appliers[slot])(tree, node, decl);
                true
            }
            None => {
                trace!("no applier for {} on {}", decl.property(), kind.name());
                false
            }
        }
    }

    fn find_slot(&self, kind: T::Kind, property: PropertyId) -> Option<usize> {
        if let Some(&slot) = self.resolved.get(&(kind, property)) {
            return Some(slot);
        }
        if self.kinds.chain(kind).is_some() {
            // Resolved at build time: nothing up the chain either.
            return None;
        }
        find_slot(&self.table, &self.kinds, kind, property)
    }
}

impl<T: StyleTree> fmt::Debug for Appliers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Appliers")
            .field("registrations", &self.table.len())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

/// Exact match first, then the immediate supertype, up to the root.
fn find_slot<K: NodeKind>(
    table: &HashMap<(K, PropertyId), usize>,
    kinds: &KindTable<K>,
    kind: K,
    property: PropertyId,
) -> Option<usize> {
    match kinds.chain(kind) {
        Some(chain) => chain
            .iter()
            .find_map(|k| table.get(&(*k, property)).copied()),
        None => walk(kind).find_map(|k| table.get(&(k, property)).copied()),
    }
}
