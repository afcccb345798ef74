mod address;
mod link;
mod session;
mod surface;

pub use address::{control_url, validate_address, AddressError, CONTROL_PORT};
pub use link::{DisconnectReason, LinkCommand, LinkEvent, RobotLink};
pub use session::{Mode, NotConnected, Notice, Session, SessionError};
pub use surface::{CommandSurface, Direction, Gesture};
