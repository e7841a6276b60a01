//! Command handlers - business logic for processing UI events and network responses

use crate::app::AppState;
use crate::messages::ui_events::Field;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ConnectivityState, RequestState, RoomCount};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    // ========================
    // Area
    // ========================

    pub fn enter_char(&mut self, c: char) {
        if !self.form_enabled() {
            return;
        }
        let accepted = c.is_ascii_digit() || (c == '.' && !self.form.area_sqft.contains('.'));
        if accepted {
            self.form.area_sqft.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if self.form_enabled() {
            self.form.area_sqft.pop();
        }
    }

    // ========================
    // Selectors
    // ========================

    pub fn select_prev(&mut self) {
        match self.focus {
            Field::Bedrooms | Field::Bathrooms => self.step_rooms(RoomCount::prev),
            Field::Locality => self.step_locality(false),
            Field::Area | Field::Submit => {}
        }
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Field::Bedrooms | Field::Bathrooms => self.step_rooms(RoomCount::next),
            Field::Locality => self.step_locality(true),
            Field::Area | Field::Submit => {}
        }
    }

    /// Pick a room count on the focused selector
    pub fn select_value(&mut self, value: u8) {
        let Some(count) = RoomCount::new(value) else { return };
        if !self.form_enabled() {
            return;
        }
        match self.focus {
            Field::Bedrooms => self.form.bedrooms = count,
            Field::Bathrooms => self.form.bathrooms = count,
            _ => {}
        }
    }

    pub fn set_area(&mut self, area: &str) {
        if !self.form_enabled() {
            return;
        }
        self.form.area_sqft.clear();
        for c in area.chars() {
            self.enter_char(c);
        }
    }

    pub fn set_bedrooms(&mut self, count: RoomCount) {
        if self.form_enabled() {
            self.form.bedrooms = count;
        }
    }

    pub fn set_bathrooms(&mut self, count: RoomCount) {
        if self.form_enabled() {
            self.form.bathrooms = count;
        }
    }

    /// Select a locality by name; names outside the fetched set are rejected
    pub fn select_locality(&mut self, name: &str) -> bool {
        if !self.locality_enabled() || !self.locations.iter().any(|l| l == name) {
            tracing::debug!(name, "Locality selection rejected");
            return false;
        }
        self.form.locality = name.to_string();
        true
    }

    fn step_rooms(&mut self, step: fn(RoomCount) -> RoomCount) {
        if !self.form_enabled() {
            return;
        }
        match self.focus {
            Field::Bedrooms => self.form.bedrooms = step(self.form.bedrooms),
            Field::Bathrooms => self.form.bathrooms = step(self.form.bathrooms),
            _ => {}
        }
    }

    fn step_locality(&mut self, forward: bool) {
        if !self.locality_enabled() {
            return;
        }
        let len = self.locations.len();
        let current = self.locations.iter().position(|l| *l == self.form.locality);
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => i.checked_sub(1).unwrap_or(len - 1),
        };
        self.form.locality = self.locations[index].clone();
    }

    // ========================
    // Connectivity probe
    // ========================

    /// Start the startup probe
    pub fn start_probe(&mut self) -> Option<NetworkCommand> {
        if self.is_probing() {
            return None;
        }
        let id = self.next_id();
        self.pending_probe_id = Some(id);
        self.connectivity = ConnectivityState::Checking;
        tracing::info!(id, "Probing backend");
        Some(NetworkCommand::FetchLocations { id })
    }

    /// Re-run the probe after the backend was found offline
    pub fn retry(&mut self) -> Option<NetworkCommand> {
        if !self.connectivity.is_offline() {
            return None;
        }
        if matches!(self.request, RequestState::Failed(_)) {
            self.request = RequestState::Idle;
        }
        self.start_probe()
    }

    // ========================
    // Estimate
    // ========================

    /// Validate the form and prepare the estimate request
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if let Some(id) = self.pending_estimate_id {
            tracing::debug!(id, "Estimate already in flight, ignoring submit");
            return None;
        }
        if !self.connectivity.is_online() {
            tracing::debug!(connectivity = ?self.connectivity, "Backend not online, ignoring submit");
            return None;
        }
        if let Err(err) = self.form.validate() {
            tracing::info!(error = %err, "Submit rejected by validation");
            self.request = RequestState::Failed(err.user_message());
            return None;
        }

        let id = self.next_id();
        self.pending_estimate_id = Some(id);
        self.request = RequestState::Loading;
        tracing::info!(id, locality = %self.form.locality, "Requesting estimate");

        Some(NetworkCommand::RequestEstimate {
            id,
            input: self.form.clone(),
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();
        let time_ms = response.time_ms();

        match response {
            NetworkResponse::LocationsLoaded { locations, .. } => {
                if self.pending_probe_id != Some(response_id) {
                    tracing::debug!(id = response_id, "Stale probe response dropped");
                    return;
                }
                tracing::info!(id = response_id, count = locations.len(), time_ms, "Backend online");
                self.pending_probe_id = None;
                self.connectivity = ConnectivityState::Online;
                self.locations = locations;
            }
            NetworkResponse::ProbeFailed { message, .. } => {
                if self.pending_probe_id != Some(response_id) {
                    tracing::debug!(id = response_id, "Stale probe response dropped");
                    return;
                }
                tracing::warn!(id = response_id, time_ms, reason = %message, "Backend offline");
                self.pending_probe_id = None;
                self.connectivity = ConnectivityState::Offline { reason: message };
            }
            NetworkResponse::EstimateReady { estimate, .. } => {
                if self.pending_estimate_id != Some(response_id) {
                    tracing::debug!(id = response_id, "Stale estimate response dropped");
                    return;
                }
                tracing::info!(id = response_id, price = %estimate.price, time_ms, "Estimate ready");
                self.pending_estimate_id = None;
                self.request = RequestState::Succeeded(estimate);
            }
            NetworkResponse::EstimateFailed { message, .. } => {
                if self.pending_estimate_id != Some(response_id) {
                    tracing::debug!(id = response_id, "Stale estimate response dropped");
                    return;
                }
                tracing::warn!(id = response_id, time_ms, reason = %message, "Estimate failed");
                self.pending_estimate_id = None;
                self.request = RequestState::Failed(message);
            }
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
