//! # ant_animator
//!
//! Animates an ant walking a toroidal grid.
//! Commands are queued from any thread without blocking and played back one
//! at a time on a dedicated thread, each as a smooth, frame-by-frame
//! transition that settles before the next command is taken.

pub mod animator;
pub use animator::AntAnimator;

pub mod channel;
pub use channel::{CancellationToken, CommandReceiver, CommandSender, Instruction};

pub mod command;
pub use command::Command;

pub mod config;
pub use config::{AnimatorConfig, CellSize, Setting, Speed};

pub mod controller;
pub use controller::AnimationController;

pub mod error;
pub use error::{
    Interrupted, RenderError, ReplayError, ScenarioError, SubmitError, ValidationError,
};

pub mod grid;
pub use grid::{GridState, Orientation, Transition};

pub mod render;
pub use render::{NoOpRenderer, Renderer, TerminalRenderer};

pub mod replay;
pub use replay::{create_transition_logger, Event, JsonTransitionLogger, TransitionLogger};

pub mod scenario;
pub use scenario::Scenario;

pub mod visual;
pub use visual::{Target, VisualState};
