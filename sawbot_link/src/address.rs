use std::net::Ipv4Addr;
use thiserror::Error;

/// Port the robot's controller process listens on.
pub const CONTROL_PORT: u16 = 8000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("not a valid IPv4 address: {0:?}")]
    Invalid(String),
}

/// Strict dotted-decimal IPv4 validation: exactly four octets, each 0-255,
/// no leading zeros beyond a bare "0". `Ipv4Addr`'s parser enforces this,
/// including rejecting forms like "01.2.3.4" and "1.2.3".
pub fn validate_address(input: &str) -> Result<Ipv4Addr, AddressError> {
    input
        .parse::<Ipv4Addr>()
        .map_err(|_| AddressError::Invalid(input.to_string()))
}

pub fn control_url(host: Ipv4Addr, port: u16) -> String {
    format!("ws://{host}:{port}")
}
