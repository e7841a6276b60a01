//! Network messages - communication between App and Network layers

use crate::models::{FormInput, PriceEstimate};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Probe the backend and fetch the locality list
    FetchLocations { id: u64 },
    /// Submit the form to the prediction endpoint
    RequestEstimate { id: u64, input: FormInput },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Probe succeeded with a well-formed location list
    LocationsLoaded {
        id: u64,
        locations: Vec<String>,
        time_ms: u64,
    },
    /// Probe failed: timeout, transport error, error status or bad body
    ProbeFailed {
        id: u64,
        message: String,
        time_ms: u64,
    },
    /// Estimate succeeded
    EstimateReady {
        id: u64,
        estimate: PriceEstimate,
        time_ms: u64,
    },
    /// Estimate failed after submission
    EstimateFailed {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::LocationsLoaded { id, .. } => *id,
            NetworkResponse::ProbeFailed { id, .. } => *id,
            NetworkResponse::EstimateReady { id, .. } => *id,
            NetworkResponse::EstimateFailed { id, .. } => *id,
        }
    }

    /// Round-trip time of the request that produced this response
    pub fn time_ms(&self) -> u64 {
        match self {
            NetworkResponse::LocationsLoaded { time_ms, .. }
            | NetworkResponse::ProbeFailed { time_ms, .. }
            | NetworkResponse::EstimateReady { time_ms, .. }
            | NetworkResponse::EstimateFailed { time_ms, .. } => *time_ms,
        }
    }
}
