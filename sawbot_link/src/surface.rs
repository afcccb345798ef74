use sawbot_protocol::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    fn command(self) -> Command {
        match self {
            Direction::Forward => Command::Forward,
            Direction::Backward => Command::Backward,
            Direction::Left => Command::Left,
            Direction::Right => Command::Right,
        }
    }
}

/// Discrete input gestures the control view produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    DirectionalStart(Direction),
    DirectionalEnd,
    PowerPress,
    ToolPress,
}

/// Maps gestures to wire commands. The only state is the local saw toggle,
/// which flips on every `ToolPress` before any transmission is attempted
/// and can therefore drift from the robot if a send is refused.
#[derive(Debug, Default)]
pub struct CommandSurface {
    saw_on: bool,
}

impl CommandSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saw_on(&self) -> bool {
        self.saw_on
    }

    pub fn resolve(&mut self, gesture: Gesture) -> Command {
        match gesture {
            Gesture::DirectionalStart(direction) => direction.command(),
            // Release always halts, no matter which direction was active.
            Gesture::DirectionalEnd => Command::Stop,
            Gesture::PowerPress => Command::OnOff,
            Gesture::ToolPress => {
                self.saw_on = !self.saw_on;
                if self.saw_on {
                    Command::TurnOnSaw
                } else {
                    Command::TurnOffSaw
                }
            }
        }
    }

    /// Forget local tool state; called when the session leaves the control view.
    pub fn reset(&mut self) {
        self.saw_on = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_start_maps_to_matching_command() {
        let mut surface = CommandSurface::new();
        assert_eq!(
            surface.resolve(Gesture::DirectionalStart(Direction::Forward)),
            Command::Forward
        );
        assert_eq!(
            surface.resolve(Gesture::DirectionalStart(Direction::Backward)),
            Command::Backward
        );
        assert_eq!(
            surface.resolve(Gesture::DirectionalStart(Direction::Left)),
            Command::Left
        );
        assert_eq!(
            surface.resolve(Gesture::DirectionalStart(Direction::Right)),
            Command::Right
        );
    }

    #[test]
    fn release_always_stops_regardless_of_history() {
        let mut surface = CommandSurface::new();
        surface.resolve(Gesture::DirectionalStart(Direction::Forward));
        assert_eq!(surface.resolve(Gesture::DirectionalEnd), Command::Stop);

        // Overlapping presses are not composed; release still plain-stops.
        surface.resolve(Gesture::DirectionalStart(Direction::Left));
        surface.resolve(Gesture::DirectionalStart(Direction::Right));
        assert_eq!(surface.resolve(Gesture::DirectionalEnd), Command::Stop);

        // Even with no preceding press.
        assert_eq!(surface.resolve(Gesture::DirectionalEnd), Command::Stop);
    }

    #[test]
    fn power_press_is_stateless() {
        let mut surface = CommandSurface::new();
        assert_eq!(surface.resolve(Gesture::PowerPress), Command::OnOff);
        assert_eq!(surface.resolve(Gesture::PowerPress), Command::OnOff);
    }

    #[test]
    fn tool_press_alternates_starting_on() {
        let mut surface = CommandSurface::new();
        assert_eq!(surface.resolve(Gesture::ToolPress), Command::TurnOnSaw);
        assert_eq!(surface.resolve(Gesture::ToolPress), Command::TurnOffSaw);
        assert_eq!(surface.resolve(Gesture::ToolPress), Command::TurnOnSaw);
    }

    #[test]
    fn reset_restarts_the_toggle() {
        let mut surface = CommandSurface::new();
        surface.resolve(Gesture::ToolPress);
        assert!(surface.saw_on());
        surface.reset();
        assert!(!surface.saw_on());
        assert_eq!(surface.resolve(Gesture::ToolPress), Command::TurnOnSaw);
    }
}
