//! # viewstyle
//!
//! CSS-like styling for trees of visual nodes.
//!
//! ## Features
//!
//! - Selectors combining a node kind (with subtype matching), a style class and
//!   an "inside some ancestor" constraint
//! - A simple cascade: later rules and later declarations win, per property
//! - Typed declarations over a closed property set
//! - Applier tables keyed by (node kind, property) with supertype fallback
//! - A depth-first walker that styles a whole tree in one pass
//!
//! ## Quick Start
//!
//! ```
//! use viewstyle::view::{ViewKind, ViewTree, default_appliers};
//! use viewstyle::{Color, Declaration, Rule, RuleSet, Selector, StyleClasses, apply_styles};
//!
//! let mut tree = ViewTree::new(ViewKind::View);
//! let label = tree.add_child(tree.root(), ViewKind::Label).unwrap();
//!
//! let mut classes = StyleClasses::new();
//! classes.add_class(label, "Foo");
//!
//! let rules = RuleSet::new()
//!     .with_rule(
//!         Rule::new()
//!             .select(Selector::kind(ViewKind::Label))
//!             .declare(Declaration::Color(Color::GREEN)),
//!     )
//!     .with_rule(
//!         Rule::new()
//!             .select(Selector::kind(ViewKind::Label).with_class("Foo"))
//!             .declare(Declaration::Color(Color::MAGENTA)),
//!     );
//!
//! let appliers = default_appliers().unwrap();
//! let root = tree.root();
//! apply_styles(&mut tree, &rules, &appliers, &classes, root);
//!
//! assert_eq!(tree.props(label).text_color, Some(Color::MAGENTA));
//! ```
//!
//! ## Hosting your own tree
//!
//! Implement [`NodeKind`] for your node-type enum and [`StyleTree`] for your
//! tree, then register appliers with [`AppliersBuilder::register`]. The
//! [`view`] module is a complete example.

pub mod applier;
pub mod cascade;
pub mod declaration;
pub mod error;
pub mod kind;
pub mod rule;
pub mod selector;
pub mod tree;
pub mod value;
pub mod view;
pub mod walker;

pub use applier::{Appliers, AppliersBuilder};
pub use cascade::{ResolvedStyle, RuleSet};
pub use declaration::{Declaration, Property, PropertyId, property};
pub use error::{Error, Result};
pub use kind::{KindTable, NodeKind};
pub use rule::Rule;
pub use selector::{MatchContext, Selector};
pub use tree::{ClassLookup, NoClasses, StyleClasses, StyleTree};
pub use value::{Color, Font, FontWeight, Size, ToCss};
pub use walker::{StyleStats, apply_styles};
