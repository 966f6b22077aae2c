//! Declarative view tree.
//!
//! Widgets in this crate are headless: each render pass produces a
//! [`ViewNode`] tree that the host runtime paints. The tree carries content,
//! colours and the panel's computed layout, nothing more.

use account_lookup_core::Color;

use super::floating_panel::PanelLayout;

// ============================================================================
// Nodes
// ============================================================================

/// A single-line text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputView {
    pub placeholder: String,
    pub value: String,
    pub border_color: Color,
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelView {
    pub text: String,
    pub color: Color,
    /// Font size in pixels.
    pub font_size: f32,
    /// Padding above and below the text.
    pub vertical_padding: f32,
    /// Space below the label, outside its padding.
    pub margin_bottom: f32,
    /// Whether the label takes part in layout at all.
    pub visible: bool,
}

impl LabelView {
    /// Default label font size.
    pub const DEFAULT_FONT_SIZE: f32 = 14.0;

    /// A visible black label with default metrics.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::BLACK,
            font_size: Self::DEFAULT_FONT_SIZE,
            vertical_padding: 0.0,
            margin_bottom: 0.0,
            visible: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_vertical_padding(mut self, padding: f32) -> Self {
        self.vertical_padding = padding;
        self
    }

    pub fn with_margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = margin;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A floating list of labels drawn above everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub layout: PanelLayout,
    pub background: Color,
    pub corner_radius: f32,
    pub header: Option<LabelView>,
    pub items: Vec<LabelView>,
}

/// A node of the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// Vertical stack, full width of its parent.
    Container(Vec<ViewNode>),
    TextInput(TextInputView),
    Label(LabelView),
    Panel(PanelView),
}

// ============================================================================
// Queries
// ============================================================================

impl ViewNode {
    /// Direct children of this node.
    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Container(children) => children,
            _ => &[],
        }
    }

    /// This node and all its descendants, depth first.
    pub fn descendants(&self) -> Vec<&ViewNode> {
        let mut nodes = vec![self];
        for child in self.children() {
            nodes.extend(child.descendants());
        }
        nodes
    }

    /// The first text input in the tree.
    pub fn text_input(&self) -> Option<&TextInputView> {
        self.descendants().into_iter().find_map(|node| match node {
            ViewNode::TextInput(input) => Some(input),
            _ => None,
        })
    }

    /// The first floating panel in the tree.
    pub fn panel(&self) -> Option<&PanelView> {
        self.descendants().into_iter().find_map(|node| match node {
            ViewNode::Panel(panel) => Some(panel),
            _ => None,
        })
    }

    /// All labels that are direct parts of the tree (panel rows excluded).
    pub fn labels(&self) -> Vec<&LabelView> {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                ViewNode::Label(label) => Some(label),
                _ => None,
            })
            .collect()
    }
}
