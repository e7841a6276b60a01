use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::constants::{DEFAULT_AREA_SQFT, MSG_FILL_ALL_FIELDS};
use crate::error::EstimatorError;

/// Bedroom or bathroom count, confined to 1..=5
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoomCount(u8);

impl RoomCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Every selectable value, in display order
    pub const ALL: [RoomCount; 5] = [
        RoomCount(1),
        RoomCount(2),
        RoomCount(3),
        RoomCount(4),
        RoomCount(5),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(RoomCount(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn next(self) -> RoomCount {
        RoomCount((self.0 + 1).min(Self::MAX))
    }

    pub fn prev(self) -> RoomCount {
        RoomCount(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for RoomCount {
    fn default() -> Self {
        RoomCount(2)
    }
}

impl TryFrom<u8> for RoomCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RoomCount::new(value).ok_or_else(|| format!("room count {} outside 1..=5", value))
    }
}

impl From<RoomCount> for u8 {
    fn from(count: RoomCount) -> u8 {
        count.0
    }
}

impl std::fmt::Display for RoomCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four attributes sent to the prediction endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormInput {
    pub area_sqft: String,
    pub bedrooms: RoomCount,
    pub bathrooms: RoomCount,
    pub locality: String,
}

impl Default for FormInput {
    fn default() -> Self {
        FormInput {
            area_sqft: String::from(DEFAULT_AREA_SQFT),
            bedrooms: RoomCount::default(),
            bathrooms: RoomCount::default(),
            locality: String::new(),
        }
    }
}

impl FormInput {
    /// Presence check performed at submission time
    pub fn validate(&self) -> Result<(), EstimatorError> {
        if self.area_sqft.trim().is_empty() || self.locality.is_empty() {
            return Err(EstimatorError::Validation(MSG_FILL_ALL_FIELDS.to_string()));
        }
        Ok(())
    }

    /// Form-encoded body of the estimate request
    pub fn form_fields(&self) -> [(&'static str, String); 4] {
        [
            ("total_sqft", self.area_sqft.trim().to_string()),
            ("bhk", self.bedrooms.to_string()),
            ("bath", self.bathrooms.to_string()),
            ("location", self.locality.clone()),
        ]
    }
}

/// Whether the backend answered the startup probe
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    #[default]
    Checking,
    Online,
    Offline {
        reason: String,
    },
}

impl ConnectivityState {
    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, ConnectivityState::Offline { .. })
    }
}

/// A price returned by the backend, kept as the backend rendered it
#[derive(Clone, Debug, PartialEq)]
pub struct PriceEstimate {
    pub price: String,
    pub received_at: DateTime<Local>,
}

impl PriceEstimate {
    pub fn new(price: impl Into<String>) -> Self {
        PriceEstimate {
            price: price.into(),
            received_at: Local::now(),
        }
    }

    /// Price in the backend's unit, e.g. "₹ 85.4 Lakhs"
    pub fn display(&self) -> String {
        format!("₹ {} Lakhs", self.price)
    }
}

/// Lifecycle of the estimate request
#[derive(Clone, Debug, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(PriceEstimate),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn estimate(&self) -> Option<&PriceEstimate> {
        match self {
            RequestState::Succeeded(estimate) => Some(estimate),
            _ => None,
        }
    }
}

/// Body of the location-list endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

/// Body of the price-estimate endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct EstimateResponse {
    #[serde(default)]
    pub estimated_price: Option<serde_json::Value>,
}

impl EstimateResponse {
    /// Price text if the field is a number or a numeric string. Numbers use
    /// the shortest round-trip form, so `90.0` reads as `90`
    pub fn price_text(&self) -> Option<String> {
        match self.estimated_price.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).map(|v| v.to_string()),
            serde_json::Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(|_| trimmed.to_string())
            }
            _ => None,
        }
    }
}
