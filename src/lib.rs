//! # BHP TUI
//!
//! A terminal client for the Bengaluru home price prediction service.
//!
//! ## Features
//! - Startup probe of the backend that also loads the locality list
//! - Form for area, bedrooms, bathrooms and locality
//! - Price estimate in lakhs, with loading, error and offline states
//! - Manual retry when the backend is offline
//! - One-shot `locations` and `estimate` commands
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::EstimatorError;
pub use models::{ConnectivityState, FormInput, PriceEstimate, RequestState, RoomCount};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, Banner};
pub use network::{EstimatorClient, NetworkActor};
