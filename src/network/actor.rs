//! Network actor - runs API calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute_call, ApiClient};

/// Network actor that executes API calls, one task per call
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
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

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { screen, call }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            // No de-duplication: every call runs and reports
                            self.active_requests.spawn(async move {
                                let name = call.name();
                                tracing::info!(screen = screen.0, call = name, "Executing call");
                                let outcome = execute_call(&client, call).await;
                                match outcome.error() {
                                    Some(e) => tracing::info!(screen = screen.0, call = name, error = %e, "Call failed"),
                                    None => tracing::info!(screen = screen.0, call = name, "Call completed"),
                                }
                                let _ = response_tx.send(NetworkResponse { screen, outcome });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
