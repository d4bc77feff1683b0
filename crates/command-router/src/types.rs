use intent_classifier::RobotCommand;
use serde::{Deserialize, Serialize};

/// The unit handed to the execution boundary.
///
/// `parameter` is only meaningful for a subset of commands (step size,
/// position slot); for the rest it is ignored by convention, not enforced
/// by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: RobotCommand,
    pub parameter: Option<i64>,
}

impl CommandRequest {
    pub fn new(command: RobotCommand, parameter: Option<i64>) -> Self {
        Self { command, parameter }
    }
}
