use serde::{Deserialize, Serialize};

/// The closed set of robot command intents.
///
/// Discriminants are stable identifiers: contiguous, zero-based, never reused
/// or reordered within a running process. The classifier's reference-embedding
/// table is indexed by them, and the text command protocol carries them on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RobotCommand {
    StartRobot = 0,
    StopRobot = 1,
    SetModeStep = 2,
    SetModeContinuous = 3,
    SetModeModel = 4,
    MoveUp = 5,
    MoveDown = 6,
    MoveLeft = 7,
    MoveRight = 8,
    MoveBack = 9,
    MoveFront = 10,
    StopExecution = 11,
    StepSize = 12,
    OpenTool = 13,
    CloseTool = 14,
    RotateTool = 15,
    SavePosition = 16,
    LoadPosition = 17,
    Home = 18,
    Recover = 19,
    Repeat = 20,
    PutWhiteBoxInBrownBox = 21,
    PutWhiteTapeInBrownBox = 22,
    PutRedScrewdriverInBrownBox = 23,
    PutBlackLegoInBrownBox = 24,
    PutGreenLegoInBrownBox = 25,
    PickAWhiteBox = 26,
    PutBoltInBrownBox = 27,
    PutPushRodInBrownBox = 28,
    PutRockerArmInBrownBox = 29,
    PutPistonInBrownBox = 30,
    PutAllBoltsInBrownBox = 31,
    PutAllPushRodsInBrownBox = 32,
    GiveBolt = 33,
    GivePushRod = 34,
    GiveRockerArm = 35,
    PutBoltInRedBox = 36,
    PutPushRodInRedBox = 37,
    PutRockerArmInRedBox = 38,
}

impl RobotCommand {
    /// Every command, ordered by identifier.
    pub const ALL: [RobotCommand; 39] = [
        RobotCommand::StartRobot,
        RobotCommand::StopRobot,
        RobotCommand::SetModeStep,
        RobotCommand::SetModeContinuous,
        RobotCommand::SetModeModel,
        RobotCommand::MoveUp,
        RobotCommand::MoveDown,
        RobotCommand::MoveLeft,
        RobotCommand::MoveRight,
        RobotCommand::MoveBack,
        RobotCommand::MoveFront,
        RobotCommand::StopExecution,
        RobotCommand::StepSize,
        RobotCommand::OpenTool,
        RobotCommand::CloseTool,
        RobotCommand::RotateTool,
        RobotCommand::SavePosition,
        RobotCommand::LoadPosition,
        RobotCommand::Home,
        RobotCommand::Recover,
        RobotCommand::Repeat,
        RobotCommand::PutWhiteBoxInBrownBox,
        RobotCommand::PutWhiteTapeInBrownBox,
        RobotCommand::PutRedScrewdriverInBrownBox,
        RobotCommand::PutBlackLegoInBrownBox,
        RobotCommand::PutGreenLegoInBrownBox,
        RobotCommand::PickAWhiteBox,
        RobotCommand::PutBoltInBrownBox,
        RobotCommand::PutPushRodInBrownBox,
        RobotCommand::PutRockerArmInBrownBox,
        RobotCommand::PutPistonInBrownBox,
        RobotCommand::PutAllBoltsInBrownBox,
        RobotCommand::PutAllPushRodsInBrownBox,
        RobotCommand::GiveBolt,
        RobotCommand::GivePushRod,
        RobotCommand::GiveRockerArm,
        RobotCommand::PutBoltInRedBox,
        RobotCommand::PutPushRodInRedBox,
        RobotCommand::PutRockerArmInRedBox,
    ];

    /// Canonical phrase used to seed the classifier's reference embeddings.
    pub fn phrase(&self) -> &'static str {
        match self {
            RobotCommand::StartRobot => "start robot",
            RobotCommand::StopRobot => "stop robot",
            RobotCommand::SetModeStep => "set mode step",
            RobotCommand::SetModeContinuous => "set mode continuous",
            RobotCommand::SetModeModel => "set mode model",
            RobotCommand::MoveUp => "move up",
            RobotCommand::MoveDown => "move down",
            RobotCommand::MoveLeft => "move left",
            RobotCommand::MoveRight => "move right",
            RobotCommand::MoveBack => "move back",
            RobotCommand::MoveFront => "move front",
            RobotCommand::StopExecution => "stop execution",
            RobotCommand::StepSize => "step size",
            RobotCommand::OpenTool => "open tool",
            RobotCommand::CloseTool => "close tool",
            RobotCommand::RotateTool => "rotate tool",
            RobotCommand::SavePosition => "save position",
            RobotCommand::LoadPosition => "load position",
            RobotCommand::Home => "home",
            RobotCommand::Recover => "recover",
            RobotCommand::Repeat => "repeat",
            RobotCommand::PutWhiteBoxInBrownBox => "put white box in brown box",
            RobotCommand::PutWhiteTapeInBrownBox => "put white tape in brown box",
            RobotCommand::PutRedScrewdriverInBrownBox => "put red screwdriver in brown box",
            RobotCommand::PutBlackLegoInBrownBox => "put black lego in brown box",
            RobotCommand::PutGreenLegoInBrownBox => "put green lego in brown box",
            RobotCommand::PickAWhiteBox => "pick a white box",
            RobotCommand::PutBoltInBrownBox => "put bolt in brown box",
            RobotCommand::PutPushRodInBrownBox => "put push rod in brown box",
            RobotCommand::PutRockerArmInBrownBox => "put rocker arm in brown box",
            RobotCommand::PutPistonInBrownBox => "put piston in brown box",
            RobotCommand::PutAllBoltsInBrownBox => "put all bolts in brown box",
            RobotCommand::PutAllPushRodsInBrownBox => "put all push rods in brown box",
            RobotCommand::GiveBolt => "give bolt",
            RobotCommand::GivePushRod => "give push rod",
            RobotCommand::GiveRockerArm => "give rocker arm",
            RobotCommand::PutBoltInRedBox => "put bolt in red box",
            RobotCommand::PutPushRodInRedBox => "put push rod in red box",
            RobotCommand::PutRockerArmInRedBox => "put rocker arm in red box",
        }
    }

    /// Zero-based identifier.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a command by identifier.
    pub fn from_index(index: usize) -> Option<RobotCommand> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_contiguous_and_zero_based() {
        assert_eq!(RobotCommand::ALL.len(), 39);
        for (position, command) in RobotCommand::ALL.iter().enumerate() {
            assert_eq!(command.index(), position);
            assert_eq!(RobotCommand::from_index(position), Some(*command));
        }
        assert_eq!(RobotCommand::from_index(39), None);
    }

    #[test]
    fn phrases_are_unique_and_lowercase() {
        let phrases: HashSet<&str> = RobotCommand::ALL.iter().map(|c| c.phrase()).collect();
        assert_eq!(phrases.len(), RobotCommand::ALL.len());
        for phrase in phrases {
            assert_eq!(phrase, phrase.to_lowercase());
            assert!(!phrase.is_empty());
        }
    }
}
