//! Render state - data structure sent from App layer to UI for rendering

use crate::app::status::Banner;
use crate::messages::ui_events::Field;
use crate::models::{ConnectivityState, PriceEstimate, RoomCount};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Form values
    pub area_sqft: String,
    pub bedrooms: RoomCount,
    pub bathrooms: RoomCount,
    pub locality: String,
    pub locations: Vec<String>,

    // Status
    pub connectivity: ConnectivityState,
    pub banner: Option<Banner>,
    pub estimate: Option<PriceEstimate>,
    pub is_loading: bool,

    // Enablement
    pub form_enabled: bool,
    pub locality_enabled: bool,
    pub submit_enabled: bool,
    pub locality_placeholder: &'static str,
    pub submit_label: &'static str,

    // UI state
    pub focus: Field,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        crate::app::AppState::new().to_render_state()
    }
}
