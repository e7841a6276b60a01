//! Network actor - runs backend requests in the Tokio async runtime

use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::EstimatorClient;

/// Network actor that executes probe and estimate commands
pub struct NetworkActor {
    client: EstimatorClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: EstimatorClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchLocations { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "Fetching locations");
                                let start = Instant::now();
                                let result = client.fetch_locations().await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                let response = match result {
                                    Ok(locations) => NetworkResponse::LocationsLoaded { id, locations, time_ms },
                                    Err(e) => NetworkResponse::ProbeFailed { id, message: e.user_message(), time_ms },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::RequestEstimate { id, input }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "Requesting estimate");
                                let start = Instant::now();
                                let result = client.estimate(&input).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                let response = match result {
                                    Ok(estimate) => NetworkResponse::EstimateReady { id, estimate, time_ms },
                                    Err(e) => NetworkResponse::EstimateFailed { id, message: e.user_message(), time_ms },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!(error = %e, "Network task panicked");
                        }
                    }
                }
            }
        }
    }
}
