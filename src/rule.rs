//! Style rules: selectors plus the declarations they apply.

use crate::declaration::Declaration;
use crate::kind::NodeKind;
use crate::selector::{MatchContext, Selector};
use crate::tree::StyleTree;

/// A list of selectors (matched as OR) and the declarations that apply when
/// any of them matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule<K> {
    selectors: Vec<Selector<K>>,
    declarations: Vec<Declaration>,
}

impl<K> Default for Rule<K> {
    fn default() -> Self {
        Self {
            selectors: Vec::new(),
            declarations: Vec::new(),
        }
    }
}

impl<K: NodeKind> Rule<K> {
    /// Create an empty rule. It matches nothing until a selector is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rule from its parts.
    pub fn from_parts(selectors: Vec<Selector<K>>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// Builder: add a selector.
    pub fn select(mut self, selector: Selector<K>) -> Self {
        self.selectors.push(selector);
        self
    }

    /// Builder: add a declaration. Later declarations of the same property
    /// override earlier ones.
    pub fn declare(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Selectors, any of which makes the rule apply.
    pub fn selectors(&self) -> &[Selector<K>] {
        &self.selectors
    }

    /// Declarations in source order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Whether any selector matches `node`.
    pub fn matches<T>(&self, cx: &MatchContext<'_, T>, node: T::Node) -> bool
    where
        T: StyleTree<Kind = K>,
    {
        self.selectors.iter().any(|selector| selector.matches(cx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::KindTable;
    use crate::tree::StyleClasses;
    use crate::value::Color;
    use crate::view::{ViewKind, ViewTree};

    #[test]
    fn test_selectors_are_ored() {
        let mut tree = ViewTree::new(ViewKind::View);
        let label = tree.add_child(tree.root(), ViewKind::Label).unwrap();
        let button = tree.add_child(tree.root(), ViewKind::Button).unwrap();
        let image = tree.add_child(tree.root(), ViewKind::ImageView).unwrap();
        let kinds = KindTable::new().unwrap();
        let classes = StyleClasses::new();
        let cx = MatchContext::new(&tree, &kinds, &classes);

        let rule = Rule::new()
            .select(Selector::kind(ViewKind::Label))
            .select(Selector::kind(ViewKind::Button))
            .declare(Declaration::Color(Color::RED));

        assert!(rule.matches(&cx, label));
        assert!(rule.matches(&cx, button));
        assert!(!rule.matches(&cx, image));
    }

    #[test]
    fn test_rule_without_selectors_matches_nothing() {
        let tree = ViewTree::new(ViewKind::View);
        let kinds = KindTable::new().unwrap();
        let classes = StyleClasses::new();
        let cx = MatchContext::new(&tree, &kinds, &classes);

        let rule = Rule::<ViewKind>::new().declare(Declaration::CornerRadius(4.0));
        assert!(!rule.matches(&cx, tree.root()));
        assert_eq!(rule.declarations().len(), 1);
    }
}
