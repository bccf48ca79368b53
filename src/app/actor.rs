//! App actor - message loop processing UI events, network responses,
//! session changes and the notice timer

use std::time::Instant;

use tokio::sync::{broadcast, mpsc};

use crate::app::state::AppState;
use crate::constants::TICK_INTERVAL;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::session::Session;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        session: Session,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(session),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mut session_rx = self.state.subscribe();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        let first = self.state.start();
        self.send(first);
        self.render();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if event == UiEvent::Quit {
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let cmd = self.state.handle_ui_event(event);
                    self.send(cmd);
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    let cmd = self.state.handle_response(response, Instant::now());
                    self.send(cmd);
                    self.render();
                }
                event = session_rx.recv() => {
                    let cmd = match event {
                        Ok(event) => self.state.handle_session_event(event),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Missed session events, resyncing");
                            self.state.sync_with_session()
                        }
                        // The state owns a sender, so this never closes while we run
                        Err(broadcast::error::RecvError::Closed) => None,
                    };
                    self.send(cmd);
                    self.render();
                }
                _ = ticker.tick() => {
                    if self.state.tick(Instant::now()) {
                        self.render();
                    }
                }
                else => break,
            }
        }
        tracing::debug!("App actor stopped");
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}
