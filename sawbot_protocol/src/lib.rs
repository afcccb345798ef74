use serde::{Deserialize, Serialize};

/// Fixed command vocabulary understood by the robot firmware.
///
/// The identifiers serialize to the exact tokens the firmware matches on,
/// so renaming a variant is a wire-protocol change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
    OnOff,
    TurnOnSaw,
    TurnOffSaw,
}

impl Command {
    pub fn identifier(self) -> &'static str {
        match self {
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::Left => "left",
            Command::Right => "right",
            Command::Stop => "stop",
            Command::OnOff => "onOff",
            Command::TurnOnSaw => "turnOnSaw",
            Command::TurnOffSaw => "turnOffSaw",
        }
    }
}

/// Every outbound frame is a one-field JSON object: `{"command": "<identifier>"}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEnvelope {
    pub command: Command,
}

impl From<Command> for CommandEnvelope {
    fn from(command: Command) -> Self {
        Self { command }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_match_wire_tokens() {
        let all = [
            Command::Forward,
            Command::Backward,
            Command::Left,
            Command::Right,
            Command::Stop,
            Command::OnOff,
            Command::TurnOnSaw,
            Command::TurnOffSaw,
        ];
        for command in all {
            let json = serde_json::to_string(&command).expect("serialize");
            assert_eq!(json, format!("\"{}\"", command.identifier()));
        }
    }

    #[test]
    fn envelope_wire_shape() {
        let json = serde_json::to_string(&CommandEnvelope::from(Command::Forward)).expect("serialize");
        assert_eq!(json, r#"{"command":"forward"}"#);

        let json = serde_json::to_string(&CommandEnvelope::from(Command::TurnOnSaw)).expect("serialize");
        assert_eq!(json, r#"{"command":"turnOnSaw"}"#);
    }

    #[test]
    fn unknown_identifier_rejected() {
        let parsed: Result<CommandEnvelope, _> = serde_json::from_str(r#"{"command":"selfDestruct"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn envelope_roundtrip() {
        let parsed: CommandEnvelope =
            serde_json::from_str(r#"{"command":"stop"}"#).expect("deserialize");
        assert_eq!(parsed.command, Command::Stop);
    }
}
