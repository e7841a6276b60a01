//! Network layer - backend request execution
//!
//! The Network actor receives probe/estimate commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::EstimatorClient;
