//! Cascade: merge the declarations of all matching rules for a node.
//!
//! There is no specificity and no importance: rules are considered in
//! rule-set order and a later declaration of the same property replaces an
//! earlier one, both across rules and within a single rule.

use std::collections::HashMap;

use log::trace;

use crate::declaration::{Declaration, PropertyId};
use crate::kind::NodeKind;
use crate::rule::Rule;
use crate::selector::MatchContext;
use crate::tree::StyleTree;

/// An ordered list of rules. Later rules override earlier ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct RuleSet<K> {
    rules: Vec<Rule<K>>,
}

impl<K> Default for RuleSet<K> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<K: NodeKind> RuleSet<K> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the highest priority so far.
    pub fn push(&mut self, rule: Rule<K>) {
        self.rules.push(rule);
    }

    /// Builder: append a rule.
    pub fn with_rule(mut self, rule: Rule<K>) -> Self {
        self.push(rule);
        self
    }

    /// Rules in priority order, lowest first.
    pub fn rules(&self) -> &[Rule<K>] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Indices of the rules matching `node`, in rule-set order.
    pub fn matching_rules<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> Vec<usize>
    where
        T: StyleTree<Kind = K>,
    {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(cx, node))
            .map(|(i, _)| i)
            .collect()
    }

    /// Compute the declarations that apply to `node`, one per property.
    pub fn resolve<'r, T>(&'r self, cx: &MatchContext<'_, T>, node: T::Node) -> ResolvedStyle<'r>
    where
        T: StyleTree<Kind = K>,
    {
        let mut resolved = ResolvedStyle::default();

        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.matches(cx, node) {
                continue;
            }
            trace!("{:?}: rule {} matches", node, index);
            for decl in rule.declarations() {
                resolved.insert(decl);
            }
        }

        resolved
    }
}

#[cfg(feature = "cli")]
impl<K> RuleSet<K>
where
    K: NodeKind + serde::de::DeserializeOwned,
{
    /// Read a rule set from JSON.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> crate::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a rule set from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}

/// The merged declarations for one node.
///
/// Holds at most one declaration per property. Each property keeps the
/// position where it was first declared and the value it was last given.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStyle<'r> {
    declarations: Vec<&'r Declaration>,
    index: HashMap<PropertyId, usize>,
}

impl<'r> ResolvedStyle<'r> {
    fn insert(&mut self, decl: &'r Declaration) {
        match self.index.get(&decl.property()) {
            Some(&slot) => self.declarations[slot] = decl,
            None => {
                self.index.insert(decl.property(), self.declarations.len());
                self.declarations.push(decl);
            }
        }
    }

    /// The winning declaration for `property`, if any.
    pub fn get(&self, property: PropertyId) -> Option<&'r Declaration> {
        self.index.get(&property).map(|&slot| self.declarations[slot])
    }

    /// Whether some matching rule declared `property`.
    pub fn contains(&self, property: PropertyId) -> bool {
        self.index.contains_key(&property)
    }

    /// Iterate the winning declarations.
    pub fn iter(&self) -> impl Iterator<Item = &'r Declaration> + '_ {
        self.declarations.iter().copied()
    }

    /// Number of distinct properties.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether no rule matched.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<'r> IntoIterator for ResolvedStyle<'r> {
    type Item = &'r Declaration;
    type IntoIter = std::vec::IntoIter<&'r Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::KindTable;
    use crate::selector::Selector;
    use crate::tree::StyleClasses;
    use crate::value::{Color, Size};
    use crate::view::{ViewId, ViewKind, ViewTree};
    use proptest::prelude::*;

    fn label_tree() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new(ViewKind::View);
        let plain = tree.add_child(tree.root(), ViewKind::Label).unwrap();
        let foo = tree.add_child(tree.root(), ViewKind::Label).unwrap();
        (tree, plain, foo)
    }

    fn label_rules() -> RuleSet<ViewKind> {
        RuleSet::new()
            .with_rule(
                Rule::new()
                    .select(Selector::kind(ViewKind::Label))
                    .declare(Declaration::Color(Color::GREEN))
                    .declare(Declaration::CornerRadius(10.0)),
            )
            .with_rule(
                Rule::new()
                    .select(Selector::kind(ViewKind::Label).with_class("Foo"))
                    .declare(Declaration::Color(Color::MAGENTA))
                    .declare(Declaration::CornerRadius(0.0)),
            )
    }

    #[test]
    fn test_later_rule_wins() {
        let (tree, plain, foo) = label_tree();
        let kinds = KindTable::new().unwrap();
        let mut classes = StyleClasses::new();
        classes.add_class(foo, "Foo");
        let cx = MatchContext::new(&tree, &kinds, &classes);
        let rules = label_rules();

        let style = rules.resolve(&cx, foo);
        assert_eq!(style.len(), 2);
        assert_eq!(style.get(PropertyId::Color), Some(&Declaration::Color(Color::MAGENTA)));
        assert_eq!(
            style.get(PropertyId::CornerRadius),
            Some(&Declaration::CornerRadius(0.0))
        );

        let style = rules.resolve(&cx, plain);
        assert_eq!(style.get(PropertyId::Color), Some(&Declaration::Color(Color::GREEN)));
        assert_eq!(
            style.get(PropertyId::CornerRadius),
            Some(&Declaration::CornerRadius(10.0))
        );
    }

    #[test]
    fn test_last_declaration_within_rule_wins() {
        let (tree, plain, _) = label_tree();
        let kinds = KindTable::new().unwrap();
        let classes = StyleClasses::new();
        let cx = MatchContext::new(&tree, &kinds, &classes);

        let rules = RuleSet::new().with_rule(
            Rule::new()
                .select(Selector::any())
                .declare(Declaration::Color(Color::RED))
                .declare(Declaration::ShadowOffset(Size::new(1.0, 1.0)))
                .declare(Declaration::Color(Color::BLUE)),
        );

        let style = rules.resolve(&cx, plain);
        let decls: Vec<_> = style.iter().cloned().collect();
        // First-seen position, last-written value.
        assert_eq!(
            decls,
            vec![
                Declaration::Color(Color::BLUE),
                Declaration::ShadowOffset(Size::new(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn test_non_matching_rules_contribute_nothing() {
        let (tree, plain, _) = label_tree();
        let kinds = KindTable::new().unwrap();
        let classes = StyleClasses::new();
        let cx = MatchContext::new(&tree, &kinds, &classes);
        let rules = label_rules();

        assert_eq!(rules.matching_rules(&cx, plain), vec![0]);
        assert!(rules.resolve(&cx, tree.root()).is_empty());
    }

    fn arb_declaration() -> impl Strategy<Value = Declaration> {
        prop_oneof![
            any::<u8>().prop_map(|g| Declaration::Color(Color::rgb(0, g, 0))),
            any::<u8>().prop_map(|b| Declaration::BackgroundColor(Color::rgb(0, 0, b))),
            (0u16..100).prop_map(|r| Declaration::CornerRadius(r as f32)),
            (0u16..100).prop_map(|w| Declaration::BorderWidth(w as f32)),
        ]
    }

    proptest! {
        #[test]
        fn prop_resolve_has_one_declaration_per_property(
            rules in prop::collection::vec(prop::collection::vec(arb_declaration(), 0..6), 0..6)
        ) {
            let (tree, plain, _) = label_tree();
            let kinds = KindTable::new().unwrap();
            let classes = StyleClasses::new();
            let cx = MatchContext::new(&tree, &kinds, &classes);

            let mut set = RuleSet::new();
            for decls in &rules {
                set.push(Rule::from_parts(vec![Selector::any()], decls.clone()));
            }

            let style = set.resolve(&cx, plain);
            let mut seen = std::collections::HashSet::new();
            for decl in style.iter() {
                prop_assert!(seen.insert(decl.property()));
            }

            // Every property takes the value of its last declaration overall.
            for decl in style.iter() {
                let last = rules
                    .iter()
                    .flatten()
                    .filter(|d| d.property() == decl.property())
                    .last();
                prop_assert_eq!(last, Some(decl));
            }
        }
    }
}
