use crate::error::ValidationError;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An action the ant can be told to perform.
///
/// The numeric codes are stable and are what [`Command::try_from`] accepts
/// from callers that deal in raw integers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell forward.
    Move,
    /// Turn 90 degrees counter-clockwise.
    RotateLeft,
    /// Turn 90 degrees clockwise.
    RotateRight,
    /// Do nothing for one command slot.
    Skip,
}

impl Command {
    pub const MOVE: i32 = 0;
    pub const ROTATE_LEFT: i32 = 1;
    pub const ROTATE_RIGHT: i32 = 2;
    pub const SKIP: i32 = 3;

    /// Parses the one letter form used by scenario scripts: `M`, `L`, `R` or `S`.
    pub fn from_letter(letter: char) -> Option<Command> {
        match letter.to_ascii_uppercase() {
            'M' => Some(Command::Move),
            'L' => Some(Command::RotateLeft),
            'R' => Some(Command::RotateRight),
            'S' => Some(Command::Skip),
            _ => None,
        }
    }

    /// Inverse of [`Command::from_letter`].
    pub fn letter(self) -> char {
        match self {
            Command::Move => 'M',
            Command::RotateLeft => 'L',
            Command::RotateRight => 'R',
            Command::Skip => 'S',
        }
    }
}

impl TryFrom<i32> for Command {
    type Error = ValidationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            Self::MOVE => Ok(Command::Move),
            Self::ROTATE_LEFT => Ok(Command::RotateLeft),
            Self::ROTATE_RIGHT => Ok(Command::RotateRight),
            Self::SKIP => Ok(Command::Skip),
            _ => Err(ValidationError::InvalidCommand(code)),
        }
    }
}

impl Distribution<Command> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Command {
        match rng.gen_range(0..4) {
            0 => Command::Move,
            1 => Command::RotateLeft,
            2 => Command::RotateRight,
            _ => Command::Skip,
        }
    }
}
