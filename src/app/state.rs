//! App state - pure data structure with no I/O logic
//!
//! Fields are private: the state only changes through the handlers in
//! `commands.rs`, which are driven by `UiEvent`s and `NetworkResponse`s.

use crate::app::status;
use crate::messages::ui_events::Field;
use crate::messages::RenderState;
use crate::models::{ConnectivityState, FormInput, RequestState};

/// Main application state - pure data, no I/O
#[derive(Debug, Clone, Default)]
pub struct AppState {
    // Form
    pub(super) form: FormInput,
    pub(super) locations: Vec<String>,

    // Backend
    pub(super) connectivity: ConnectivityState,
    pub(super) request: RequestState,

    // Request tokens
    pub(super) next_request_id: u64,
    pub(super) pending_probe_id: Option<u64>,
    pub(super) pending_estimate_id: Option<u64>,

    // UI
    pub(super) focus: Field,
    pub(super) show_help: bool,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            next_request_id: 1,
            ..Default::default()
        }
    }

    /// Generate a unique request ID
    pub(super) fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn connectivity(&self) -> &ConnectivityState {
        &self.connectivity
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// A probe is in flight
    pub fn is_probing(&self) -> bool {
        self.pending_probe_id.is_some()
    }

    /// An estimate is in flight
    pub fn is_estimating(&self) -> bool {
        self.pending_estimate_id.is_some()
    }

    /// Area and room selectors accept edits
    pub fn form_enabled(&self) -> bool {
        !self.connectivity.is_offline()
    }

    /// Locality selector accepts edits
    pub fn locality_enabled(&self) -> bool {
        self.form_enabled() && !self.locations.is_empty() && !self.is_probing() && !self.is_estimating()
    }

    /// Submit control is active
    pub fn submit_enabled(&self) -> bool {
        self.connectivity.is_online() && !self.form.locality.is_empty() && !self.is_estimating()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            area_sqft: self.form.area_sqft.clone(),
            bedrooms: self.form.bedrooms,
            bathrooms: self.form.bathrooms,
            locality: self.form.locality.clone(),
            locations: self.locations.clone(),
            connectivity: self.connectivity.clone(),
            banner: status::banner(&self.connectivity, &self.request),
            estimate: status::success_panel(&self.request).cloned(),
            is_loading: self.is_probing() || self.is_estimating(),
            form_enabled: self.form_enabled(),
            locality_enabled: self.locality_enabled(),
            submit_enabled: self.submit_enabled(),
            locality_placeholder: status::locality_placeholder(&self.connectivity, &self.locations),
            submit_label: status::submit_label(&self.request),
            focus: self.focus,
            show_help: self.show_help,
        }
    }
}
