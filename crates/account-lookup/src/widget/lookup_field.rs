//! Lookup field widget.
//!
//! [`LookupField`] is a text input that searches for similar records as the
//! user types and warns when the typed value already exists. It owns all of
//! the interactive state and drives a [`FloatingPanel`] with the candidates
//! of the latest search.
//!
//! # Searching
//!
//! Each text change produces a [`SearchTicket`], a generation-stamped
//! description of the request to issue. The owner runs it with
//! [`LookupField::execute`] and hands the outcome back with
//! [`LookupField::apply_search_result`]. Results from any ticket older than
//! the latest one are discarded, so a slow response can never overwrite a
//! newer one. [`LookupField::edit_text`] does all three steps in one call.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use account_lookup::prelude::*;
//!
//! let mut field = LookupField::new(config, Arc::new(client));
//!
//! field.resolved.connect(|resolution| {
//!     if resolution.is_duplicate {
//!         println!("'{}' already exists", resolution.text);
//!     }
//! });
//!
//! field.edit_text("Contoso").await;
//! field.focus_out();
//! ```
//!
//! # Signals
//!
//! - `resolved(Resolution)`: Emitted once per focus loss with the duplicate
//!   verdict for the current text

use std::sync::Arc;

use account_lookup_core::logging::targets;
use account_lookup_core::{Color, Rect, Signal};
use account_lookup_net::odata::{Filter, ODataQuery};
use account_lookup_net::{EntitySearch, Record};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use super::candidate::Candidate;
use super::floating_panel::FloatingPanel;
use super::view::{LabelView, TextInputView, ViewNode};
use crate::config::LookupConfig;

/// Status shown when a search fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Font size of the status line under the input.
pub const STATUS_FONT_SIZE: f32 = 12.0;

// ============================================================================
// State
// ============================================================================

/// Colour of the input border and status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusColor {
    #[default]
    Black,
    Green,
    Orange,
    Red,
}

impl StatusColor {
    pub fn color(self) -> Color {
        match self {
            StatusColor::Black => Color::BLACK,
            StatusColor::Green => Color::GREEN,
            StatusColor::Orange => Color::ORANGE,
            StatusColor::Red => Color::RED,
        }
    }

    /// CSS name of the colour.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusColor::Black => "black",
            StatusColor::Green => "green",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
        }
    }
}

/// Where the field is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    /// No search in flight and no results shown.
    #[default]
    Idle,
    /// A search has been requested and has not completed.
    Searching,
    /// The last search found similar records.
    ResultsShown,
    /// The last search found nothing.
    NoMatch,
    /// The last search failed.
    Error,
}

/// Interactive state of a [`LookupField`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    pub text: String,
    pub panel_visible: bool,
    pub candidates: Vec<Candidate>,
    pub status_message: String,
    pub status_color: StatusColor,
    pub phase: FieldPhase,
}

impl FieldState {
    /// Initial state for a field seeded with `text`.
    pub fn seeded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A search to issue on behalf of a [`LookupField`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    /// Increases with every text change; only the latest ticket's result is
    /// applied.
    pub generation: u64,
    /// Plural logical name of the table searched.
    pub entity_set: String,
    pub query: ODataQuery,
    /// Column mapped to [`Candidate::name`].
    pub name_column: String,
    /// Column mapped to [`Candidate::id`].
    pub id_column: String,
}

/// Outcome of a focus loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the text matches a candidate name, ignoring case.
    pub is_duplicate: bool,
    /// The text at the time focus was lost.
    pub text: String,
}

/// Input events understood by [`LookupField::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    TextChanged(String),
    FocusIn,
    FocusOut,
    /// The reference element moved or changed size.
    Resized(Rect),
}

// ============================================================================
// Lookup Field
// ============================================================================

/// A text input with duplicate detection backed by an entity search.
pub struct LookupField {
    config: LookupConfig,
    search: Arc<dyn EntitySearch>,
    state: FieldState,
    generation: u64,
    geometry: Rect,

    /// Signal emitted on every focus loss.
    pub resolved: Signal<Resolution>,
}

impl LookupField {
    /// Create a field whose text starts as `config.user_input`.
    pub fn new(config: LookupConfig, search: Arc<dyn EntitySearch>) -> Self {
        let state = FieldState::seeded(config.user_input.clone());
        Self {
            config,
            search,
            state,
            generation: 0,
            geometry: Rect::ZERO,
            resolved: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.state.candidates
    }

    pub fn is_panel_visible(&self) -> bool {
        self.state.panel_visible
    }

    pub fn status_message(&self) -> &str {
        &self.state.status_message
    }

    pub fn status_color(&self) -> StatusColor {
        self.state.status_color
    }

    pub fn phase(&self) -> FieldPhase {
        self.state.phase
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Generation of the latest text change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Replace the configuration. Interactive state is kept.
    pub fn apply_config(&mut self, config: LookupConfig) {
        self.config = config;
    }

    /// Set the reference element's rectangle; the panel anchors below it.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    // =========================================================================
    // Searching
    // =========================================================================

    /// Record new text.
    ///
    /// Returns the search to issue for non-empty text. Empty text clears
    /// the candidates and hides the panel instead.
    pub fn text_changed(&mut self, value: impl Into<String>) -> Option<SearchTicket> {
        self.state.text = value.into();
        self.generation += 1;

        if self.state.text.is_empty() {
            self.state.candidates.clear();
            self.state.panel_visible = false;
            self.state.status_message = self.config.no_matches_message.clone();
            self.state.status_color = StatusColor::Green;
            self.state.phase = FieldPhase::Idle;
            return None;
        }

        self.state.panel_visible = true;
        self.state.phase = FieldPhase::Searching;
        Some(self.ticket())
    }

    fn ticket(&self) -> SearchTicket {
        let filter = Filter::contains_terms(
            &self.config.filter_column,
            &self.state.text,
            self.config.join_operator(),
        );
        let query = ODataQuery::new().filter(filter).select([
            self.config.filter_column.as_str(),
            self.config.identifier_column.as_str(),
        ]);

        SearchTicket {
            generation: self.generation,
            entity_set: self.config.entity_set.clone(),
            query,
            name_column: self.config.filter_column.clone(),
            id_column: self.config.identifier_column.clone(),
        }
    }

    /// Run the search described by `ticket`.
    ///
    /// The returned future does not borrow the field, so it can be spawned.
    pub fn execute(
        &self,
        ticket: &SearchTicket,
    ) -> BoxFuture<'static, account_lookup_net::Result<Vec<Record>>> {
        run_search(Arc::clone(&self.search), ticket.clone()).boxed()
    }

    /// Apply the outcome of the search for `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the result was dropped.
    pub fn apply_search_result(
        &mut self,
        ticket: &SearchTicket,
        result: account_lookup_net::Result<Vec<Record>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                target: targets::FIELD,
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale search result"
            );
            return false;
        }

        match result {
            Ok(records) => {
                let candidates: Vec<Candidate> = records
                    .iter()
                    .map(|record| {
                        Candidate::from_record(record, &ticket.name_column, &ticket.id_column)
                    })
                    .collect();
                tracing::debug!(target: targets::FIELD, ?candidates, "fetched candidates");

                if candidates.is_empty() {
                    self.state.status_message = self.config.no_matches_message.clone();
                    self.state.status_color = StatusColor::Green;
                    self.state.phase = FieldPhase::NoMatch;
                } else {
                    self.state.status_message = self.config.partial_match_message.clone();
                    self.state.status_color = StatusColor::Orange;
                    self.state.phase = FieldPhase::ResultsShown;
                }
                self.state.candidates = candidates;
            }
            Err(err) => {
                tracing::error!(target: targets::FIELD, error = %err, "error fetching candidates");
                self.state.status_message = FETCH_FAILED_MESSAGE.to_string();
                self.state.status_color = StatusColor::Red;
                self.state.panel_visible = false;
                self.state.phase = FieldPhase::Error;
            }
        }
        true
    }

    /// Set the text and, when non-empty, search and apply the result.
    pub async fn edit_text(&mut self, value: impl Into<String>) {
        if let Some(ticket) = self.text_changed(value) {
            let result = self.execute(&ticket).await;
            self.apply_search_result(&ticket, result);
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Show the panel.
    pub fn focus_in(&mut self) {
        self.state.panel_visible = true;
    }

    /// Hide the panel and decide whether the text is a duplicate.
    ///
    /// Emits [`resolved`](Self::resolved) and returns the same resolution.
    pub fn focus_out(&mut self) -> Resolution {
        self.state.panel_visible = false;

        let is_duplicate = self
            .state
            .candidates
            .iter()
            .any(|candidate| candidate.matches(&self.state.text));
        if is_duplicate {
            self.state.status_message = self.config.duplicate_message.clone();
            self.state.status_color = StatusColor::Red;
        }

        let resolution = Resolution {
            is_duplicate,
            text: self.state.text.clone(),
        };
        tracing::debug!(
            target: targets::FIELD,
            is_duplicate,
            text = %resolution.text,
            "focus lost"
        );
        self.resolved.emit(resolution.clone());
        resolution
    }

    /// Dispatch an input event.
    ///
    /// Returns the resolution for [`FieldEvent::FocusOut`].
    pub async fn handle_event(&mut self, event: FieldEvent) -> Option<Resolution> {
        match event {
            FieldEvent::TextChanged(text) => {
                self.edit_text(text).await;
                None
            }
            FieldEvent::FocusIn => {
                self.focus_in();
                None
            }
            FieldEvent::FocusOut => Some(self.focus_out()),
            FieldEvent::Resized(rect) => {
                self.set_geometry(rect);
                None
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The panel as it would be drawn now, if it is drawn at all.
    pub fn panel(&self) -> Option<FloatingPanel> {
        if !self.state.panel_visible || self.state.candidates.is_empty() {
            return None;
        }
        Some(
            FloatingPanel::new(self.state.candidates.clone())
                .with_header(self.config.header.clone(), self.config.header_color())
                .with_max_height(self.config.max_height)
                .with_width(self.config.width),
        )
    }

    /// Render the input, the status line and, when shown, the panel.
    pub fn view(&self) -> ViewNode {
        let color = self.state.status_color.color();
        let mut children = vec![
            ViewNode::TextInput(TextInputView {
                placeholder: self.config.placeholder.clone(),
                value: self.state.text.clone(),
                border_color: color,
            }),
            ViewNode::Label(
                LabelView::new(&self.state.status_message)
                    .with_color(color)
                    .with_font_size(STATUS_FONT_SIZE)
                    .with_visible(!self.state.panel_visible),
            ),
        ];
        if let Some(panel) = self.panel() {
            children.push(panel.view(self.geometry));
        }
        ViewNode::Container(children)
    }
}

#[tracing::instrument(
    name = "account_lookup::search",
    skip_all,
    target = "account_lookup::field",
    level = "debug",
    fields(generation = ticket.generation, entity_set = %ticket.entity_set)
)]
async fn run_search(
    search: Arc<dyn EntitySearch>,
    ticket: SearchTicket,
) -> account_lookup_net::Result<Vec<Record>> {
    tracing::debug!(
        target: targets::FIELD,
        query = %ticket.query.to_query_string(),
        "searching"
    );
    search.retrieve_multiple(&ticket.entity_set, &ticket.query).await
}

impl std::fmt::Debug for LookupField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupField")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}
