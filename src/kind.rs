//! Node kinds and the precomputed subtype table.
//!
//! Hosts describe their node types as a closed enum implementing [`NodeKind`].
//! Each kind names its immediate supertype; the root kind has none. Selector
//! matching and applier lookup never inspect runtime types, they only consult
//! the [`KindTable`] built from that declaration.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

/// A closed enumeration of node types with a single-inheritance hierarchy.
///
/// # Example
///
/// ```
/// use viewstyle::NodeKind;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Widget {
///     Base,
///     Text,
/// }
///
/// impl NodeKind for Widget {
///     const ALL: &'static [Self] = &[Widget::Base, Widget::Text];
///
///     fn supertype(self) -> Option<Self> {
///         match self {
///             Widget::Base => None,
///             Widget::Text => Some(Widget::Base),
///         }
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Widget::Base => "Base",
///             Widget::Text => "Text",
///         }
///     }
/// }
/// ```
pub trait NodeKind: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every kind of the hierarchy.
    const ALL: &'static [Self];

    /// The immediate supertype, or `None` for a root kind.
    fn supertype(self) -> Option<Self>;

    /// Display name used in selectors, logs and reports.
    fn name(self) -> &'static str;
}

/// Precomputed supertype chains and subtype relation for a [`NodeKind`].
#[derive(Clone)]
pub struct KindTable<K: NodeKind> {
    /// `kind -> [kind, supertype, supertype's supertype, ...]`.
    chains: HashMap<K, Box<[K]>>,
    /// `(kind, ancestor)` pairs, reflexive.
    subtypes: HashSet<(K, K)>,
}

impl<K: NodeKind> KindTable<K> {
    /// Build the table from `K::ALL`.
    ///
    /// Fails with [`Error::KindCycle`] if following `supertype()` from any kind
    /// never reaches a root.
    pub fn new() -> Result<Self> {
        let mut chains = HashMap::with_capacity(K::ALL.len());
        let mut subtypes = HashSet::new();

        for &kind in K::ALL {
            let chain = supertype_chain(kind)?;
            for &ancestor in &chain {
                subtypes.insert((kind, ancestor));
            }
            chains.insert(kind, chain.into_boxed_slice());
        }

        Ok(Self { chains, subtypes })
    }

    /// Whether `kind` is `of` or one of its subtypes.
    pub fn is_subtype(&self, kind: K, of: K) -> bool {
        if kind == of {
            return true;
        }
        if self.chains.contains_key(&kind) {
            return self.subtypes.contains(&(kind, of));
        }
        // Kind missing from `ALL`: walk the hierarchy directly.
        walk(kind).any(|k| k == of)
    }

    /// The supertype chain starting at `kind` itself.
    ///
    /// Returns `None` for kinds that were not listed in `K::ALL`.
    pub fn chain(&self, kind: K) -> Option<&[K]> {
        self.chains.get(&kind).map(|c| &c[..])
    }

    /// Number of kinds in the table.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Check if the table has no kinds.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<K: NodeKind> fmt::Debug for KindTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindTable")
            .field("kinds", &self.chains.len())
            .finish()
    }
}

/// Iterate `kind` and its supertypes, bounded by the size of the hierarchy.
pub(crate) fn walk<K: NodeKind>(kind: K) -> impl Iterator<Item = K> {
    std::iter::successors(Some(kind), |k| k.supertype()).take(K::ALL.len().max(1) + 1)
}

fn supertype_chain<K: NodeKind>(kind: K) -> Result<Vec<K>> {
    let mut chain = vec![kind];
    let mut current = kind;
    while let Some(parent) = current.supertype() {
        if chain.len() > K::ALL.len() {
            return Err(Error::KindCycle(kind.name()));
        }
        chain.push(parent);
        current = parent;
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Shape {
        Any,
        Polygon,
        Square,
        Circle,
    }

    impl NodeKind for Shape {
        const ALL: &'static [Self] = &[Shape::Any, Shape::Polygon, Shape::Square, Shape::Circle];

        fn supertype(self) -> Option<Self> {
            match self {
                Shape::Any => None,
                Shape::Polygon | Shape::Circle => Some(Shape::Any),
                Shape::Square => Some(Shape::Polygon),
            }
        }

        fn name(self) -> &'static str {
            match self {
                Shape::Any => "Any",
                Shape::Polygon => "Polygon",
                Shape::Square => "Square",
                Shape::Circle => "Circle",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Loop {
        A,
        B,
    }

    impl NodeKind for Loop {
        const ALL: &'static [Self] = &[Loop::A, Loop::B];

        fn supertype(self) -> Option<Self> {
            match self {
                Loop::A => Some(Loop::B),
                Loop::B => Some(Loop::A),
            }
        }

        fn name(self) -> &'static str {
            match self {
                Loop::A => "A",
                Loop::B => "B",
            }
        }
    }

    #[test]
    fn test_chain_walks_to_root() {
        let table = KindTable::<Shape>::new().unwrap();
        assert_eq!(
            table.chain(Shape::Square),
            Some(&[Shape::Square, Shape::Polygon, Shape::Any][..])
        );
        assert_eq!(table.chain(Shape::Any), Some(&[Shape::Any][..]));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_is_subtype() {
        let table = KindTable::<Shape>::new().unwrap();
        assert!(table.is_subtype(Shape::Square, Shape::Square));
        assert!(table.is_subtype(Shape::Square, Shape::Polygon));
        assert!(table.is_subtype(Shape::Square, Shape::Any));
        assert!(table.is_subtype(Shape::Circle, Shape::Any));

        assert!(!table.is_subtype(Shape::Circle, Shape::Polygon));
        assert!(!table.is_subtype(Shape::Any, Shape::Square));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let err = KindTable::<Loop>::new().unwrap_err();
        assert!(matches!(err, Error::KindCycle("A")));
    }

    #[test]
    fn test_walk_terminates_on_cycle() {
        assert_eq!(walk(Loop::A).count(), 3);
    }
}
