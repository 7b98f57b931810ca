//! In-memory reference host: a small view tree with visual properties.
//!
//! The style engine works against any [`StyleTree`]. This module provides a
//! concrete one so rules can be exercised end to end, plus the standard
//! applier table and the demo style sheet used by the `viewstyle` binary.

use std::fmt::Write;

use crate::applier::{Appliers, AppliersBuilder};
use crate::cascade::RuleSet;
use crate::declaration::{Declaration, property};
use crate::error::{Error, Result};
use crate::kind::{KindTable, NodeKind};
use crate::rule::Rule;
use crate::selector::Selector;
use crate::tree::{ClassLookup, StyleClasses, StyleTree};
use crate::value::{Color, Font, FontWeight, Size, ToCss};

/// View types of the reference host.
///
/// ```text
/// View
/// ├── Label
/// ├── ImageView
/// └── Control
///     ├── Button
///     └── TextField
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewKind {
    View,
    Label,
    ImageView,
    Control,
    Button,
    TextField,
}

impl NodeKind for ViewKind {
    const ALL: &'static [Self] = &[
        ViewKind::View,
        ViewKind::Label,
        ViewKind::ImageView,
        ViewKind::Control,
        ViewKind::Button,
        ViewKind::TextField,
    ];

    fn supertype(self) -> Option<Self> {
        match self {
            ViewKind::View => None,
            ViewKind::Label | ViewKind::ImageView | ViewKind::Control => Some(ViewKind::View),
            ViewKind::Button | ViewKind::TextField => Some(ViewKind::Control),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ViewKind::View => "View",
            ViewKind::Label => "Label",
            ViewKind::ImageView => "ImageView",
            ViewKind::Control => "Control",
            ViewKind::Button => "Button",
            ViewKind::TextField => "TextField",
        }
    }
}

/// Unique identifier for a view within a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

impl ViewId {
    /// The root view ID (always 0).
    pub const ROOT: ViewId = ViewId(0);
}

/// Visual state written by appliers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct VisualProps {
    pub text_color: Option<Color>,
    /// Button title color for the normal control state.
    pub title_color: Option<Color>,
    pub background_color: Option<Color>,
    pub corner_radius: f32,
    pub shadow_color: Option<Color>,
    pub shadow_radius: f32,
    pub shadow_offset: Size,
    pub shadow_opacity: f32,
    /// Clipping hides shadows, so shadow appliers turn it off.
    pub clips_to_bounds: bool,
    pub font: Option<Font>,
    pub border_width: f32,
    pub border_color: Option<Color>,
}

impl Default for VisualProps {
    fn default() -> Self {
        Self {
            text_color: None,
            title_color: None,
            background_color: None,
            corner_radius: 0.0,
            shadow_color: None,
            shadow_radius: 0.0,
            shadow_offset: Size::ZERO,
            shadow_opacity: 0.0,
            clips_to_bounds: true,
            font: None,
            border_width: 0.0,
            border_color: None,
        }
    }
}

impl VisualProps {
    /// Space-separated `name=value` list of every property that differs from
    /// the default.
    pub fn describe(&self) -> String {
        let defaults = VisualProps::default();
        let mut buf = String::new();
        let mut field = |name: &str, value: &dyn ToCss| {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(name);
            buf.push('=');
            value.to_css(&mut buf);
        };

        if let Some(c) = &self.text_color {
            field("text_color", c);
        }
        if let Some(c) = &self.title_color {
            field("title_color", c);
        }
        if let Some(c) = &self.background_color {
            field("background_color", c);
        }
        if self.corner_radius != defaults.corner_radius {
            field("corner_radius", &self.corner_radius);
        }
        if let Some(c) = &self.shadow_color {
            field("shadow_color", c);
        }
        if self.shadow_radius != defaults.shadow_radius {
            field("shadow_radius", &self.shadow_radius);
        }
        if self.shadow_offset != defaults.shadow_offset {
            field("shadow_offset", &self.shadow_offset);
        }
        if self.shadow_opacity != defaults.shadow_opacity {
            field("shadow_opacity", &self.shadow_opacity);
        }
        if let Some(f) = &self.font {
            field("font", f);
        }
        if self.border_width != defaults.border_width {
            field("border_width", &self.border_width);
        }
        if let Some(c) = &self.border_color {
            field("border_color", c);
        }
        if self.clips_to_bounds != defaults.clips_to_bounds {
            buf.push_str(if buf.is_empty() { "unclipped" } else { " unclipped" });
        }
        buf
    }
}

/// A view in the tree.
#[derive(Debug, Clone)]
pub struct View {
    pub kind: ViewKind,
    pub name: Option<String>,
    pub parent: Option<ViewId>,
    pub children: Vec<ViewId>,
    pub props: VisualProps,
}

impl View {
    fn new(kind: ViewKind, parent: Option<ViewId>) -> Self {
        Self {
            kind,
            name: None,
            parent,
            children: Vec::new(),
            props: VisualProps::default(),
        }
    }
}

/// Arena-backed view tree. Parents own their children; the parent link is
/// only used for upward lookup.
///
/// Ids are `u32` indices, so a tree holds at most `u32::MAX + 1` views.
/// `add_child` fails with [`Error::TreeFull`] past that; every stored index
/// therefore fits in a `u32`.
#[derive(Debug, Clone)]
pub struct ViewTree {
    /// All views (index 0 is always the root).
    views: Vec<View>,
}

impl ViewTree {
    /// Create a tree containing only a root view of `kind`.
    pub fn new(root_kind: ViewKind) -> Self {
        Self {
            views: vec![View::new(root_kind, None)],
        }
    }

    /// Get the root view ID.
    pub fn root(&self) -> ViewId {
        ViewId::ROOT
    }

    /// Append a new view of `kind` as the last child of `parent`.
    pub fn add_child(&mut self, parent: ViewId, kind: ViewKind) -> Result<ViewId> {
        let id = next_id(self.views.len())?;
        let parent_view = self
            .views
            .get_mut(parent.0 as usize)
            .ok_or(Error::UnknownNode(parent.0))?;
        parent_view.children.push(id);
        self.views.push(View::new(kind, Some(parent)));
        Ok(id)
    }

    /// Append a named child.
    pub fn add_named(&mut self, parent: ViewId, kind: ViewKind, name: &str) -> Result<ViewId> {
        let id = self.add_child(parent, kind)?;
        self.set_name(id, name)?;
        Ok(id)
    }

    /// Give a view a name for lookups and reports.
    pub fn set_name(&mut self, id: ViewId, name: impl Into<String>) -> Result<()> {
        let view = self
            .views
            .get_mut(id.0 as usize)
            .ok_or(Error::UnknownNode(id.0))?;
        view.name = Some(name.into());
        Ok(())
    }

    /// Get a view by ID.
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id.0 as usize)
    }

    /// First view (in creation order) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .position(|v| v.name.as_deref() == Some(name))
            .map(|i| ViewId(i as u32))
    }

    /// Whether `id` was allocated by this tree.
    pub fn contains(&self, id: ViewId) -> bool {
        (id.0 as usize) < self.views.len()
    }

    /// Visual properties of a view.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn props(&self, id: ViewId) -> &VisualProps {
        &self.views[id.0 as usize].props
    }

    /// Mutable visual properties of a view.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn props_mut(&mut self, id: ViewId) -> &mut VisualProps {
        &mut self.views[id.0 as usize].props
    }

    /// Get the number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterate all view IDs in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        (0..self.views.len()).map(|i| ViewId(i as u32))
    }

    /// Owned copy of the subtree at `id` with class tags, for reports.
    pub fn snapshot(&self, id: ViewId, classes: &dyn ClassLookup<ViewId>) -> Option<ViewSnapshot> {
        let view = self.view(id)?;
        Some(ViewSnapshot {
            kind: view.kind,
            name: view.name.clone(),
            classes: classes.classes_for(id).map(<[String]>::to_vec).unwrap_or_default(),
            props: view.props.clone(),
            children: view
                .children
                .iter()
                .filter_map(|&child| self.snapshot(child, classes))
                .collect(),
        })
    }
}

impl StyleTree for ViewTree {
    type Node = ViewId;
    type Kind = ViewKind;

    fn kind(&self, node: ViewId) -> ViewKind {
        self.view(node).map_or(ViewKind::View, |v| v.kind)
    }

    fn parent(&self, node: ViewId) -> Option<ViewId> {
        self.view(node).and_then(|v| v.parent)
    }

    fn children(&self, node: ViewId) -> Vec<ViewId> {
        self.view(node).map(|v| v.children.clone()).unwrap_or_default()
    }

    fn contains(&self, node: ViewId) -> bool {
        ViewTree::contains(self, node)
    }
}

fn next_id(len: usize) -> Result<ViewId> {
    u32::try_from(len).map(ViewId).map_err(|_| Error::TreeFull)
}

/// Serializable copy of a styled subtree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ViewSnapshot {
    pub kind: ViewKind,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub classes: Vec<String>,
    pub props: VisualProps,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<ViewSnapshot>,
}

impl ViewSnapshot {
    /// Indented one-line-per-view text report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{:indent$}{}", "", self.kind.name(), indent = depth * 2);
        if let Some(name) = &self.name {
            let _ = write!(out, "#{name}");
        }
        for class in &self.classes {
            let _ = write!(out, ".{class}");
        }
        let props = self.props.describe();
        if !props.is_empty() {
            let _ = write!(out, "  {props}");
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

/// Clear the clip so shadow properties become visible. Idempotent.
fn unclip(tree: &mut ViewTree, node: ViewId) {
    tree.props_mut(node).clips_to_bounds = false;
}

/// The standard applier table for [`ViewTree`].
pub fn default_appliers() -> Result<Appliers<ViewTree>> {
    let mut builder = AppliersBuilder::<ViewTree>::new();

    builder
        .register::<property::Color, _>(ViewKind::Label, |tree, node, color| {
            tree.props_mut(node).text_color = Some(*color);
        })
        .register::<property::Color, _>(ViewKind::TextField, |tree, node, color| {
            tree.props_mut(node).text_color = Some(*color);
        })
        // Normal state only; other control states are out of scope.
        .register::<property::Color, _>(ViewKind::Button, |tree, node, color| {
            tree.props_mut(node).title_color = Some(*color);
        })
        .register::<property::BackgroundColor, _>(ViewKind::View, |tree, node, color| {
            tree.props_mut(node).background_color = Some(*color);
        })
        .register::<property::CornerRadius, _>(ViewKind::View, |tree, node, radius| {
            tree.props_mut(node).corner_radius = *radius;
        })
        .register::<property::ShadowColor, _>(ViewKind::View, |tree, node, color| {
            tree.props_mut(node).shadow_color = Some(*color);
            unclip(tree, node);
        })
        .register::<property::ShadowRadius, _>(ViewKind::View, |tree, node, radius| {
            tree.props_mut(node).shadow_radius = *radius;
            unclip(tree, node);
        })
        .register::<property::ShadowOffset, _>(ViewKind::View, |tree, node, offset| {
            tree.props_mut(node).shadow_offset = *offset;
            unclip(tree, node);
        })
        .register::<property::ShadowOpacity, _>(ViewKind::View, |tree, node, opacity| {
            tree.props_mut(node).shadow_opacity = *opacity;
            unclip(tree, node);
        })
        .register::<property::BorderWidth, _>(ViewKind::View, |tree, node, width| {
            tree.props_mut(node).border_width = *width;
        })
        .register::<property::BorderColor, _>(ViewKind::View, |tree, node, color| {
            tree.props_mut(node).border_color = Some(*color);
        });

    for kind in [ViewKind::Label, ViewKind::Button, ViewKind::TextField] {
        builder.register::<property::Font, _>(kind, |tree, node, font| {
            tree.props_mut(node).font = Some(font.clone());
        });
    }

    Ok(builder.build(KindTable::new()?))
}

/// The demo style sheet.
pub fn demo_rules() -> RuleSet<ViewKind> {
    RuleSet::new()
        .with_rule(
            Rule::new()
                .select(Selector::kind(ViewKind::Label))
                .declare(Declaration::Color(Color::GREEN))
                .declare(Declaration::CornerRadius(10.0))
                .declare(Declaration::BackgroundColor(Color::BLUE)),
        )
        .with_rule(
            Rule::new()
                .select(Selector::kind(ViewKind::Button))
                .declare(Declaration::Color(Color::CYAN))
                .declare(Declaration::CornerRadius(30.0))
                .declare(Declaration::BackgroundColor(Color::ORANGE))
                .declare(Declaration::ShadowOffset(Size::new(4.0, 10.0)))
                .declare(Declaration::ShadowRadius(7.0))
                .declare(Declaration::ShadowColor(Color::BLACK))
                .declare(Declaration::ShadowOpacity(0.5)),
        )
        .with_rule(
            Rule::new()
                .select(Selector::kind(ViewKind::Label).with_class("Foo"))
                .declare(Declaration::Color(Color::MAGENTA))
                .declare(Declaration::CornerRadius(0.0)),
        )
        .with_rule(
            Rule::new()
                .select(Selector::kind(ViewKind::Label).within(Selector::kind(ViewKind::Button)))
                .declare(Declaration::Font(
                    Font::new("Helvetica", 15.0).with_weight(FontWeight::BOLD),
                )),
        )
        .with_rule(
            Rule::new()
                .select(Selector::kind(ViewKind::ImageView))
                .select(Selector::class("Framed"))
                .declare(Declaration::BorderWidth(1.0))
                .declare(Declaration::BorderColor(Color::BLACK)),
        )
}

/// The demo view tree and its class tags.
pub fn demo_tree() -> Result<(ViewTree, StyleClasses<ViewId>)> {
    let mut tree = ViewTree::new(ViewKind::View);
    let root = tree.root();
    tree.set_name(root, "root")?;

    tree.add_named(root, ViewKind::Label, "title")?;
    let special = tree.add_named(root, ViewKind::Label, "special")?;
    let button = tree.add_named(root, ViewKind::Button, "action")?;
    tree.add_named(button, ViewKind::Label, "caption")?;
    tree.add_named(root, ViewKind::ImageView, "logo")?;
    tree.add_named(root, ViewKind::TextField, "input")?;

    let mut classes = StyleClasses::new();
    classes.add_class(special, "Foo");

    Ok((tree, classes))
}
