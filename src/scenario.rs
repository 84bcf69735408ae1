use crate::animator::AntAnimator;
use crate::channel::Instruction;
use crate::command::Command;
use crate::config::{CellSize, Setting, Speed};
use crate::error::{ScenarioError, SubmitError};
use crate::grid::Orientation;
use regex::Regex;
use std::fs;
use std::path::Path;

/// A scripted run: settings and commands in the order they are written.
///
/// ```text
/// grid 32 32
/// cell small
/// speed medium
/// start 0 0
/// orientation south
/// food 3 4
/// actions MMRL MMSM
/// ```
///
/// `speed` also takes a frame rate, `cell` a pixel size. `food` and `actions`
/// may repeat. Blank lines and lines starting with `#` are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scenario {
    instructions: Vec<Instruction>,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
        Scenario::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(contents: &str) -> Result<Scenario, ScenarioError> {
        let line_pattern = Regex::new(r"^(\w+)\s*(.*)$")?;
        let pair_pattern = Regex::new(r"^(-?\d+)\s+(-?\d+)$")?;
        let mut instructions = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let unknown = || ScenarioError::UnknownInstruction {
                line: line_number,
                text: line.to_string(),
            };
            let captures = line_pattern.captures(line).ok_or_else(unknown)?;
            let keyword = captures.get(1).map_or("", |m| m.as_str());
            let value = captures.get(2).map_or("", |m| m.as_str()).trim();

            let invalid = || ScenarioError::InvalidValue {
                line: line_number,
                value: value.to_string(),
            };
            let pair = || -> Result<(i32, i32), ScenarioError> {
                let captures = pair_pattern.captures(value).ok_or_else(invalid)?;
                let first = captures[1].parse().map_err(|_| invalid())?;
                let second = captures[2].parse().map_err(|_| invalid())?;
                Ok((first, second))
            };

            match keyword.to_ascii_lowercase().as_str() {
                "grid" => {
                    let (width, height) = pair()?;
                    instructions.push(Instruction::Configure(Setting::Dimensions { width, height }));
                }
                "start" => {
                    let (x, y) = pair()?;
                    instructions.push(Instruction::Configure(Setting::Start { x, y }));
                }
                "food" => {
                    let (x, y) = pair()?;
                    instructions.push(Instruction::Configure(Setting::Food { x, y }));
                }
                "orientation" => {
                    let orientation = parse_orientation(value).ok_or_else(invalid)?;
                    instructions.push(Instruction::Configure(Setting::Orientation(orientation)));
                }
                "cell" => {
                    let cell_size = parse_cell_size(value).ok_or_else(invalid)?;
                    instructions.push(Instruction::Configure(Setting::CellSize(cell_size)));
                }
                "speed" => {
                    let speed = parse_speed(value).ok_or_else(invalid)?;
                    instructions.push(Instruction::Configure(Setting::Speed(speed)));
                }
                "actions" => {
                    for letter in value.chars().filter(|c| !c.is_whitespace()) {
                        let command = Command::from_letter(letter).ok_or_else(invalid)?;
                        instructions.push(Instruction::Command(command));
                    }
                }
                _ => return Err(unknown()),
            }
        }

        Ok(Scenario { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Command(command) => Some(*command),
            Instruction::Configure(_) => None,
        })
    }

    /// Queues the whole scenario on `animator`, in script order.
    pub fn play(&self, animator: &AntAnimator) -> Result<(), SubmitError> {
        for instruction in &self.instructions {
            match *instruction {
                Instruction::Command(command) => animator.submit(command)?,
                Instruction::Configure(setting) => animator.configure(setting)?,
            }
        }
        Ok(())
    }
}

fn parse_orientation(value: &str) -> Option<Orientation> {
    match value.to_ascii_lowercase().as_str() {
        "north" => Some(Orientation::North),
        "east" => Some(Orientation::East),
        "south" => Some(Orientation::South),
        "west" => Some(Orientation::West),
        _ => None,
    }
}

fn parse_cell_size(value: &str) -> Option<CellSize> {
    match value.to_ascii_lowercase().as_str() {
        "small" => Some(CellSize::Small),
        "medium" => Some(CellSize::Medium),
        "large" => Some(CellSize::Large),
        pixels => pixels.parse().ok().map(CellSize::from_pixels_or_default),
    }
}

fn parse_speed(value: &str) -> Option<Speed> {
    match value.to_ascii_lowercase().as_str() {
        "low" | "slow" => Some(Speed::Low),
        "medium" => Some(Speed::Medium),
        "high" | "fast" => Some(Speed::High),
        fps => fps.parse().ok().map(Speed::Custom),
    }
}
