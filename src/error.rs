use thiserror::Error;

/// A single bad input. Always recovered where it occurs, either by substituting
/// a default or by rejecting that one input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid command code {0}")]
    InvalidCommand(i32),
    #[error("invalid orientation code {0}")]
    InvalidOrientation(i32),
    #[error("coordinate ({x},{y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("{width}x{height} are not valid grid dimensions")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("invalid cell size {0}")]
    InvalidCellSize(u32),
    #[error("invalid frame rate {0}")]
    InvalidFrameRate(u32),
}

/// Why a submission did not reach the queue.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("the animator has been stopped")]
    Stopped,
}

/// Why the playback thread woke up without a command or finished sleeping early.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Interrupted {
    #[error("playback was cancelled")]
    Cancelled,
    #[error("every producer is gone and the queue is empty")]
    Closed,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not draw frame: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("could not write transition log: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize transition log: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("line {line}: unrecognized instruction `{text}`")]
    UnknownInstruction { line: usize, text: String },
    #[error("line {line}: invalid value `{value}`")]
    InvalidValue { line: usize, value: String },
    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
