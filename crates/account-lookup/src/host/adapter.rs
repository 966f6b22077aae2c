//! The account lookup control.
//!
//! [`AccountLookup`] adapts a [`LookupField`] to the [`StandardControl`]
//! lifecycle: it turns host parameters into a [`LookupConfig`] on every
//! update, renders the field into the host's [`Container`], and relays each
//! focus-loss verdict to the host as the `userInput` output.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use account_lookup::prelude::*;
//!
//! let mut control = AccountLookup::new(Arc::new(client));
//! let container = Container::new();
//! control.init(&context, Arc::new(|| println!("outputs changed")), container.clone());
//!
//! control.dispatch(FieldEvent::TextChanged("Contoso".into())).await;
//! control.dispatch(FieldEvent::FocusOut).await;
//! println!("{:?}", control.get_outputs());
//! ```

use std::sync::Arc;

use account_lookup_core::logging::{span_names, targets};
use account_lookup_core::{ConnectionGuard, Rect};
use account_lookup_net::{EntitySearch, WebApiClient};
use parking_lot::Mutex;

use super::container::Container;
use super::context::{Context, Outputs, Parameters, param};
use super::control::{NotifyOutputChanged, StandardControl};
use crate::config::LookupConfig;
use crate::widget::{FieldEvent, LookupField, Resolution, ViewNode};

/// Height assumed for the input when the host reports only a width.
pub const DEFAULT_INPUT_HEIGHT: f32 = 32.0;

/// State shared with the `resolved` slot.
struct HostState {
    /// Last confirmed non-duplicate input.
    user_input: String,
    /// True until the first non-duplicate resolution.
    is_first_load: bool,
    notify: Option<NotifyOutputChanged>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            user_input: String::new(),
            is_first_load: true,
            notify: None,
        }
    }
}

/// Duplicate-detecting lookup control for low-code hosts.
pub struct AccountLookup {
    search: Arc<dyn EntitySearch>,
    state: Arc<Mutex<HostState>>,
    container: Option<Container>,
    field: Option<LookupField>,
    connection: Option<ConnectionGuard<Resolution>>,
}

impl AccountLookup {
    /// Create a control that searches through `search`.
    pub fn new(search: Arc<dyn EntitySearch>) -> Self {
        Self {
            search,
            state: Arc::new(Mutex::new(HostState::default())),
            container: None,
            field: None,
            connection: None,
        }
    }

    /// Create a control backed by a Web API client for the host's
    /// `EnvironmentURL` parameter.
    pub fn from_parameters(
        parameters: &Parameters,
        bearer_token: Option<&str>,
    ) -> account_lookup_net::Result<Self> {
        let mut builder = WebApiClient::builder(parameters.text_or(param::ENVIRONMENT_URL, ""));
        if let Some(token) = bearer_token {
            builder = builder.bearer_auth(token);
        }
        let client = builder.build()?;
        tracing::debug!(
            target: targets::HOST,
            base_url = client.base_url(),
            "using web api client"
        );
        Ok(Self::new(Arc::new(client)))
    }

    /// The live field, once the first render has happened.
    pub fn field(&self) -> Option<&LookupField> {
        self.field.as_ref()
    }

    /// Forward an input event to the field and re-render.
    ///
    /// Returns the resolution for [`FieldEvent::FocusOut`]. Events arriving
    /// before the first render or after `destroy` are ignored.
    pub async fn dispatch(&mut self, event: FieldEvent) -> Option<Resolution> {
        let Some(field) = self.field.as_mut() else {
            tracing::warn!(target: targets::HOST, ?event, "event ignored, control not rendered");
            return None;
        };
        let resolution = field.handle_event(event).await;
        self.render();
        resolution
    }

    fn seed(&self, config: &LookupConfig) -> String {
        let state = self.state.lock();
        if state.is_first_load {
            config.user_input.clone()
        } else {
            state.user_input.clone()
        }
    }

    fn create_field(&mut self, config: LookupConfig) {
        let field = LookupField::new(config, Arc::clone(&self.search));

        let state = Arc::clone(&self.state);
        let guard = field.resolved.connect_scoped(move |resolution: &Resolution| {
            let notify = {
                let mut state = state.lock();
                if resolution.is_duplicate {
                    state.user_input.clear();
                } else {
                    state.is_first_load = false;
                    state.user_input = resolution.text.clone();
                }
                state.notify.clone()
            };
            tracing::debug!(
                target: targets::HOST,
                is_duplicate = resolution.is_duplicate,
                "output changed"
            );
            if let Some(notify) = notify {
                notify();
            }
        });

        self.connection = Some(guard);
        self.field = Some(field);
    }

    fn apply_allocated_size(&mut self, context: &Context) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        if let Some(width) = context.allocated_width {
            let height = context.allocated_height.unwrap_or(DEFAULT_INPUT_HEIGHT);
            field.set_geometry(Rect::new(0.0, 0.0, width, height));
        }
    }

    fn render(&self) -> Option<ViewNode> {
        let view = self.field.as_ref()?.view();
        if let Some(container) = &self.container {
            container.set_content(view.clone());
        }
        Some(view)
    }
}

impl StandardControl for AccountLookup {
    fn init(
        &mut self,
        context: &Context,
        notify_output_changed: NotifyOutputChanged,
        container: Container,
    ) {
        let _span =
            tracing::info_span!(target: targets::HOST, span_names::LIFECYCLE, phase = "init")
                .entered();

        {
            let mut state = self.state.lock();
            state.user_input.clear();
            state.is_first_load = true;
            state.notify = Some(notify_output_changed);
        }
        container.track_resize(true);
        self.container = Some(container);

        self.update_view(context);
    }

    fn update_view(&mut self, context: &Context) -> ViewNode {
        let _span = tracing::debug_span!(
            target: targets::HOST,
            span_names::LIFECYCLE,
            phase = "update_view"
        )
        .entered();

        let mut config = LookupConfig::from_parameters(&context.parameters);
        config.user_input = self.seed(&config);

        match self.field.as_mut() {
            Some(field) => field.apply_config(config),
            None => {
                tracing::debug!(
                    target: targets::HOST,
                    seed = %config.user_input,
                    "creating lookup field"
                );
                self.create_field(config);
            }
        }
        self.apply_allocated_size(context);

        self.render().unwrap_or_else(|| ViewNode::Container(Vec::new()))
    }

    fn get_outputs(&self) -> Outputs {
        Outputs {
            user_input: self.state.lock().user_input.clone(),
        }
    }

    fn destroy(&mut self) {
        let _span =
            tracing::info_span!(target: targets::HOST, span_names::LIFECYCLE, phase = "destroy")
                .entered();

        if let Some(container) = self.container.take() {
            container.clear();
            container.track_resize(false);
        }
        self.connection = None;
        self.field = None;
        self.state.lock().notify = None;
    }
}

impl std::fmt::Debug for AccountLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AccountLookup")
            .field("user_input", &state.user_input)
            .field("is_first_load", &state.is_first_load)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
