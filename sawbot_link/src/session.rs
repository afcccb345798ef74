use crate::address::{validate_address, AddressError};
use crate::link::{DisconnectReason, LinkCommand, LinkEvent};
use crate::surface::{CommandSurface, Gesture};
use sawbot_protocol::Command;
use std::fmt;
use thiserror::Error;
use tokio::sync::mpsc;

/// Which view the frontend should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AwaitingAddress,
    Controlling,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("connection attempt already in progress")]
    ConnectPending,
    #[error("already connected")]
    AlreadyConnected,
    #[error("link actor unavailable")]
    LinkUnavailable,
}

/// A command was dispatched while no connection was open. The command is
/// dropped, never buffered or retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("robot not connected")]
pub struct NotConnected;

/// The single user-facing alert produced by each lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Connected,
    ConnectFailed(String),
    Disconnected(DisconnectReason),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected => write!(f, "connected to robot"),
            Notice::ConnectFailed(reason) => write!(f, "connection failed: {reason}"),
            Notice::Disconnected(DisconnectReason::Local) => write!(f, "connection closed"),
            Notice::Disconnected(DisconnectReason::Remote) => {
                write!(f, "connection closed by robot")
            }
            Notice::Disconnected(DisconnectReason::Transport(e)) => {
                write!(f, "connection lost: {e}")
            }
        }
    }
}

/// Top-level session context: view mode, the entered address text, the
/// gesture surface and the sender half of the link channel. All mutation
/// happens on the frontend's event loop; nothing here blocks.
pub struct Session {
    link: mpsc::Sender<LinkCommand>,
    surface: CommandSurface,
    mode: Mode,
    address_text: String,
    connect_pending: bool,
}

impl Session {
    pub fn new(link: mpsc::Sender<LinkCommand>) -> Self {
        Self {
            link,
            surface: CommandSurface::new(),
            mode: Mode::AwaitingAddress,
            address_text: String::new(),
            connect_pending: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn set_address_text(&mut self, text: impl Into<String>) {
        self.address_text = text.into();
    }

    pub fn connect_pending(&self) -> bool {
        self.connect_pending
    }

    pub fn saw_on(&self) -> bool {
        self.surface.saw_on()
    }

    /// Validate the entered address and ask the link actor to open a
    /// connection. Rejected outright while an attempt is pending or a
    /// connection is already open.
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if self.connect_pending {
            return Err(SessionError::ConnectPending);
        }
        if self.mode == Mode::Controlling {
            return Err(SessionError::AlreadyConnected);
        }
        let host = validate_address(&self.address_text)?;
        self.link
            .try_send(LinkCommand::Connect(host))
            .map_err(|_| SessionError::LinkUnavailable)?;
        self.connect_pending = true;
        Ok(())
    }

    /// Resolve a gesture and dispatch the resulting command. The saw toggle
    /// flips inside the surface before the connected check, so a refused
    /// send still flips it (matching the robot is the caller's problem).
    pub fn gesture(&mut self, gesture: Gesture) -> Result<Command, NotConnected> {
        let command = self.surface.resolve(gesture);
        if self.mode != Mode::Controlling {
            return Err(NotConnected);
        }
        self.link
            .try_send(LinkCommand::Send(command))
            .map_err(|_| NotConnected)?;
        Ok(command)
    }

    pub fn disconnect(&mut self) {
        if self.mode == Mode::Controlling {
            let _ = self.link.try_send(LinkCommand::Disconnect);
        }
    }

    /// Apply a lifecycle event and produce the one alert the frontend shows.
    pub fn handle_link_event(&mut self, event: LinkEvent) -> Notice {
        match event {
            LinkEvent::Connected => {
                self.connect_pending = false;
                self.mode = Mode::Controlling;
                Notice::Connected
            }
            LinkEvent::ConnectFailed(reason) => {
                self.connect_pending = false;
                Notice::ConnectFailed(reason)
            }
            LinkEvent::Disconnected(reason) => {
                self.connect_pending = false;
                self.mode = Mode::AwaitingAddress;
                self.surface.reset();
                Notice::Disconnected(reason)
            }
        }
    }
}
