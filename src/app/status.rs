//! Status rendering rules - pure functions of connectivity and request state

use crate::models::{ConnectivityState, PriceEstimate, RequestState};

/// The single banner shown above the form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    /// Probe in flight
    Checking,
    /// Backend unreachable; carries the probe diagnostic and offers a retry
    Offline { reason: String },
    /// Validation or estimate failure while the backend is reachable
    Error(String),
}

/// Pick the banner for the current state.
///
/// Offline always wins, then Checking, then the request error.
pub fn banner(connectivity: &ConnectivityState, request: &RequestState) -> Option<Banner> {
    match connectivity {
        ConnectivityState::Offline { reason } => Some(Banner::Offline { reason: reason.clone() }),
        ConnectivityState::Checking => Some(Banner::Checking),
        ConnectivityState::Online => request.error().map(|msg| Banner::Error(msg.to_string())),
    }
}

/// Success panel, independent of the banner
pub fn success_panel(request: &RequestState) -> Option<&PriceEstimate> {
    request.estimate()
}

/// Placeholder text of the locality selector when nothing is selected
pub fn locality_placeholder(connectivity: &ConnectivityState, locations: &[String]) -> &'static str {
    if connectivity.is_offline() {
        "Backend server offline"
    } else if locations.is_empty() {
        "Loading locations..."
    } else {
        "Select a location"
    }
}

/// Label of the submit control
pub fn submit_label(request: &RequestState) -> &'static str {
    if request.is_loading() {
        "Calculating..."
    } else {
        "Estimate Price"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> ConnectivityState {
        ConnectivityState::Offline { reason: "down".into() }
    }

    #[test]
    fn test_offline_supersedes_request_error() {
        let failed = RequestState::Failed("boom".into());
        assert_eq!(banner(&offline(), &failed), Some(Banner::Offline { reason: "down".into() }));
    }

    #[test]
    fn test_checking_banner_during_probe() {
        assert_eq!(banner(&ConnectivityState::Checking, &RequestState::Idle), Some(Banner::Checking));
        assert_eq!(
            banner(&ConnectivityState::Checking, &RequestState::Failed("x".into())),
            Some(Banner::Checking)
        );
    }

    #[test]
    fn test_error_banner_only_when_online() {
        let failed = RequestState::Failed("Please fill all the fields".into());
        assert_eq!(
            banner(&ConnectivityState::Online, &failed),
            Some(Banner::Error("Please fill all the fields".into()))
        );
        assert_eq!(banner(&ConnectivityState::Online, &RequestState::Idle), None);
        assert_eq!(banner(&ConnectivityState::Online, &RequestState::Loading), None);
    }

    #[test]
    fn test_success_panel_is_additive() {
        let done = RequestState::Succeeded(PriceEstimate::new("150.75"));
        assert_eq!(banner(&ConnectivityState::Online, &done), None);
        assert_eq!(success_panel(&done).map(|e| e.display()).as_deref(), Some("₹ 150.75 Lakhs"));
        assert!(success_panel(&RequestState::Loading).is_none());
    }

    #[test]
    fn test_placeholders_and_labels() {
        let locations = vec!["Whitefield".to_string()];
        assert_eq!(locality_placeholder(&offline(), &locations), "Backend server offline");
        assert_eq!(locality_placeholder(&ConnectivityState::Checking, &[]), "Loading locations...");
        assert_eq!(locality_placeholder(&ConnectivityState::Online, &locations), "Select a location");
        assert_eq!(submit_label(&RequestState::Loading), "Calculating...");
        assert_eq!(submit_label(&RequestState::Idle), "Estimate Price");
    }
}
