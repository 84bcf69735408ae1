use crate::command::Command;
use crate::config::Setting;
use crate::error::ReplayError;
use crate::grid::{Orientation, Transition};
use serde::Serialize;
use std::{fs::File, io::BufWriter};

/// Picks the JSON logger when a file name is given, otherwise a logger that
/// records nothing.
pub fn create_transition_logger(filename: Option<String>) -> Box<dyn TransitionLogger> {
    match filename {
        None => Box::new(NoOpTransitionLogger {}),
        Some(filename) => Box::new(JsonTransitionLogger::new(filename)),
    }
}

/// Observes what the playback thread does, one event at a time.
pub trait TransitionLogger: Send {
    #[allow(unused_variables)]
    fn log_event(&mut self, event: Event) {}

    fn save(&self) -> Result<(), ReplayError> {
        Ok(())
    }

    fn log_setting(&mut self, setting: Setting) {
        self.log_event(Event::Configure { setting });
    }

    fn log_transition(&mut self, index: usize, transition: &Transition) {
        self.log_event(Event::Transition {
            index,
            command: transition.command,
            position: transition.position,
            orientation: transition.orientation,
            ate_food: transition.ate_food,
        });
    }

    fn log_converged(&mut self, index: usize, frames: usize) {
        self.log_event(Event::Converged { index, frames });
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Configure {
        setting: Setting,
    },
    Transition {
        index: usize,
        command: Command,
        position: (usize, usize),
        orientation: Orientation,
        ate_food: bool,
    },
    Converged {
        index: usize,
        frames: usize,
    },
}

pub struct NoOpTransitionLogger;
impl TransitionLogger for NoOpTransitionLogger {}

/// Keeps every event in memory and writes them out as pretty JSON on save.
pub struct JsonTransitionLogger {
    filename: String,
    events: Vec<Event>,
}

impl JsonTransitionLogger {
    pub fn new(filename: String) -> Self {
        JsonTransitionLogger {
            filename,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl TransitionLogger for JsonTransitionLogger {
    fn log_event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn save(&self) -> Result<(), ReplayError> {
        let file = File::create(&self.filename)?;
        let transitions = self
            .events
            .iter()
            .filter(|event| matches!(event, Event::Transition { .. }))
            .count();

        let data = serde_json::json!({
            "transitions": transitions,
            "events": self.events,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        Ok(())
    }
}
