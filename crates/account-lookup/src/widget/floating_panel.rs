//! Floating candidate panel.
//!
//! [`FloatingPanel`] is the dropdown shown under the lookup input. It holds
//! no interaction state: the owner hands it the candidates and the reference
//! rectangle on every render, and it answers with a layout and a view.
//!
//! The panel is anchored start-aligned below the reference rectangle with a
//! fixed gap, keeps a fixed width, and scrolls once its content is taller than
//! the maximum height.

use account_lookup_core::logging::targets;
use account_lookup_core::{Color, Rect};

use super::candidate::Candidate;
use super::view::{LabelView, PanelView, ViewNode};

/// Vertical gap between the reference rectangle and the panel.
pub const PANEL_GAP: f32 = 5.0;

/// Padding inside the panel on every side.
pub const PANEL_PADDING: f32 = 10.0;

/// Padding above and below each candidate row.
pub const ITEM_PADDING: f32 = 5.0;

/// Space below the header row.
pub const HEADER_MARGIN: f32 = 3.0;

/// Line height of one row of text.
pub const LINE_HEIGHT: f32 = 20.0;

/// Height of one candidate row.
pub const ITEM_HEIGHT: f32 = LINE_HEIGHT + 2.0 * ITEM_PADDING;

/// Height of the header row.
pub const HEADER_HEIGHT: f32 = LINE_HEIGHT + HEADER_MARGIN;

/// Corner radius of the panel background.
pub const CORNER_RADIUS: f32 = 4.0;

/// Stacking order that keeps the panel above every other element.
pub const TOP_MOST_Z: i32 = 9999;

pub const DEFAULT_MAX_HEIGHT: f32 = 300.0;
pub const DEFAULT_PANEL_WIDTH: f32 = 250.0;

/// Computed placement of the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Visible box of the panel.
    pub rect: Rect,
    /// Full height of the content, which may exceed the visible box.
    pub content_height: f32,
    /// Whether the content needs a vertical scrollbar.
    pub scrollable: bool,
    pub z_order: i32,
}

/// A positioned list of candidate names with an optional header.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingPanel {
    items: Vec<Candidate>,
    header: String,
    header_color: Color,
    max_height: f32,
    width: f32,
}

impl Default for FloatingPanel {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            header: String::new(),
            header_color: Color::BLACK,
            max_height: DEFAULT_MAX_HEIGHT,
            width: DEFAULT_PANEL_WIDTH,
        }
    }
}

impl FloatingPanel {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    /// Set the header text; an empty header is not shown.
    pub fn with_header(mut self, header: impl Into<String>, color: Color) -> Self {
        self.header = header.into();
        self.header_color = color;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn header(&self) -> Option<&str> {
        (!self.header.is_empty()).then_some(self.header.as_str())
    }

    /// Total height of the panel content including padding.
    pub fn content_height(&self) -> f32 {
        let header = if self.header().is_some() {
            HEADER_HEIGHT
        } else {
            0.0
        };
        2.0 * PANEL_PADDING + header + self.items.len() as f32 * ITEM_HEIGHT
    }

    /// Place the panel below `anchor`.
    pub fn layout(&self, anchor: Rect) -> PanelLayout {
        let content_height = self.content_height();
        let height = content_height.min(self.max_height);
        tracing::trace!(
            target: targets::PANEL,
            items = self.items.len(),
            content_height,
            height,
            "panel laid out"
        );
        PanelLayout {
            rect: Rect::new(anchor.left(), anchor.bottom() + PANEL_GAP, self.width, height),
            content_height,
            scrollable: content_height > self.max_height,
            z_order: TOP_MOST_Z,
        }
    }

    /// Render the panel below `anchor`.
    pub fn view(&self, anchor: Rect) -> ViewNode {
        let header = self.header().map(|text| {
            LabelView::new(text)
                .with_color(self.header_color)
                .with_margin_bottom(HEADER_MARGIN)
        });
        let items = self
            .items
            .iter()
            .map(|item| LabelView::new(&item.name).with_vertical_padding(ITEM_PADDING))
            .collect();

        ViewNode::Panel(PanelView {
            layout: self.layout(anchor),
            background: Color::WHITE,
            corner_radius: CORNER_RADIUS,
            header,
            items,
        })
    }
}
