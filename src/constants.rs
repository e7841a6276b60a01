//! Application constants
//!
//! Centralized location for endpoint paths, user-facing messages and
//! configuration defaults.

/// Backend address used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Location-list endpoint, relative to the backend address
pub const LOCATIONS_PATH: &str = "/get_location_names";

/// Price-estimate endpoint, relative to the backend address
pub const PREDICT_PATH: &str = "/predict_home_price";

/// Upper bound on the startup probe
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Default area pre-filled in the form
pub const DEFAULT_AREA_SQFT: &str = "1000";

/// Default log file for the interactive client
pub const DEFAULT_LOG_FILE: &str = "bhp.log";

/// Environment variable overriding the backend address
pub const BACKEND_URL_ENV: &str = "BHP_BACKEND_URL";

/// Application name
pub const APP_NAME: &str = "Bangalore Home Price Predictor";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// User-facing messages

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill all the fields";
pub const MSG_BACKEND_ERROR_STATUS: &str = "Backend server returned an error";
pub const MSG_BACKEND_INVALID_DATA: &str = "Backend returned invalid data format";
pub const MSG_ESTIMATE_FAILED: &str =
    "Failed to get price estimation. Please make sure the backend server is running.";
pub const MSG_ESTIMATE_MALFORMED: &str = "Failed to get price estimation from server";

/// Diagnostic shown when the backend cannot be reached at all
pub fn cannot_connect_message(base_url: &str) -> String {
    format!(
        "Cannot connect to the backend server. Please make sure it's running at {}",
        base_url
    )
}
