use crate::address::{control_url, CONTROL_PORT};
use futures_util::{SinkExt, StreamExt};
use sawbot_protocol::{Command, CommandEnvelope};
use std::net::Ipv4Addr;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const COMMAND_CHANNEL_CAP: usize = 32;

/// Requests from the session to the link actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCommand {
    Connect(Ipv4Addr),
    Send(Command),
    Disconnect,
}

/// Lifecycle transitions reported back to the frontend, one per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Connected,
    ConnectFailed(String),
    Disconnected(DisconnectReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    Local,
    Remote,
    Transport(String),
}

/// Handle to the spawned connection actor. The actor owns the single
/// outbound WebSocket; it is either Closed (waiting for a `Connect`) or
/// Open (relaying `Send`s until something terminates the socket).
pub struct RobotLink {
    tx: mpsc::Sender<LinkCommand>,
}

impl RobotLink {
    /// Spawn the actor targeting the fixed control port.
    pub fn spawn(events: mpsc::UnboundedSender<LinkEvent>) -> Self {
        Self::spawn_with_port(CONTROL_PORT, events)
    }

    /// Same actor, caller-chosen port. Test seam.
    pub fn spawn_with_port(port: u16, events: mpsc::UnboundedSender<LinkEvent>) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAP);
        tokio::spawn(run(rx, events, port));
        Self { tx }
    }

    pub fn sender(&self) -> mpsc::Sender<LinkCommand> {
        self.tx.clone()
    }
}

async fn run(
    mut rx: mpsc::Receiver<LinkCommand>,
    events: mpsc::UnboundedSender<LinkEvent>,
    port: u16,
) {
    loop {
        // Closed: only a Connect moves the actor forward. Sends arriving
        // here were already refused at the session layer.
        let host = loop {
            match rx.recv().await {
                Some(LinkCommand::Connect(host)) => break host,
                Some(LinkCommand::Send(command)) => {
                    tracing::debug!(?command, "dropping send while closed");
                }
                Some(LinkCommand::Disconnect) => {}
                None => return,
            }
        };

        let url = control_url(host, port);
        let mut socket: Socket = match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((socket, _)) => {
                tracing::debug!(%url, "connected");
                let _ = events.send(LinkEvent::Connected);
                socket
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "connect failed");
                let _ = events.send(LinkEvent::ConnectFailed(e.to_string()));
                continue;
            }
        };

        let reason = loop {
            tokio::select! {
                cmd = rx.recv() => match cmd {
                    Some(LinkCommand::Send(command)) => {
                        if let Err(e) = send_command(&mut socket, command).await {
                            break DisconnectReason::Transport(e);
                        }
                    }
                    Some(LinkCommand::Disconnect) => {
                        let _ = socket.close(None).await;
                        break DisconnectReason::Local;
                    }
                    // The session disables connect while open.
                    Some(LinkCommand::Connect(_)) => {}
                    None => return,
                },
                incoming = socket.next() => match incoming {
                    // No inbound schema is consumed; frames only matter as
                    // liveness.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break DisconnectReason::Transport(e.to_string()),
                    None => break DisconnectReason::Remote,
                },
            }
        };

        tracing::debug!(?reason, "link closed");
        let _ = events.send(LinkEvent::Disconnected(reason));
    }
}

async fn send_command(socket: &mut Socket, command: Command) -> Result<(), String> {
    let payload =
        serde_json::to_string(&CommandEnvelope::from(command)).map_err(|e| e.to_string())?;
    socket
        .send(Message::Text(payload.into()))
        .await
        .map_err(|e| e.to_string())
}
