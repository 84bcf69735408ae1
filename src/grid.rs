use crate::command::Command;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The compass direction the ant is facing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    East,
    #[default]
    South,
    West,
}

impl Orientation {
    pub fn from_code(code: i32) -> Result<Orientation, ValidationError> {
        match code {
            0 => Ok(Orientation::North),
            1 => Ok(Orientation::East),
            2 => Ok(Orientation::South),
            3 => Ok(Orientation::West),
            _ => Err(ValidationError::InvalidOrientation(code)),
        }
    }

    /// Like [`Orientation::from_code`] but unknown codes face north.
    pub fn from_code_or_north(code: i32) -> Orientation {
        Orientation::from_code(code).unwrap_or_else(|e| {
            log::warn!("{e}; facing north");
            Orientation::North
        })
    }

    pub fn rotated_left(self) -> Orientation {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    pub fn rotated_right(self) -> Orientation {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Rotation of the ant sprite in radians, in [0, 2π).
    /// The sprite points down the screen at angle zero.
    pub fn angle(self) -> f64 {
        match self {
            Orientation::North => PI,
            Orientation::East => 1.5 * PI,
            Orientation::South => 0.0,
            Orientation::West => 0.5 * PI,
        }
    }
}

/// The outcome of applying one command to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub command: Command,
    pub position: (usize, usize),
    pub orientation: Orientation,
    pub ate_food: bool,
}

/// Logical state of the world: a toroidal grid, the ant on it and the food.
///
/// `(0, 0)` is the bottom-left cell and `y` grows upwards.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    orientation: Orientation,
    food: Vec<bool>,
}

impl Default for GridState {
    fn default() -> Self {
        GridState::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
/// Largest accepted width or height. Keeps every pixel coordinate well inside
/// `i32` at the largest cell size.
pub const MAX_DIMENSION: usize = 4096;

impl GridState {
    fn new(width: usize, height: usize) -> GridState {
        GridState {
            width,
            height,
            x: 0,
            y: 0,
            orientation: Orientation::South,
            food: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Resizes the grid, moves the ant back to the origin and removes all food.
    ///
    /// Non-positive dimensions, or dimensions above [`MAX_DIMENSION`], are
    /// replaced with a 10x10 grid and reported as an error.
    pub fn set_dimensions(&mut self, width: i32, height: i32) -> Result<(), ValidationError> {
        let orientation = self.orientation;
        let accepted = |n: i32| {
            usize::try_from(n)
                .ok()
                .filter(|n| (1..=MAX_DIMENSION).contains(n))
        };
        let result = match (accepted(width), accepted(height)) {
            (Some(w), Some(h)) => {
                *self = GridState::new(w, h);
                Ok(())
            }
            _ => {
                let e = ValidationError::InvalidDimensions { width, height };
                log::warn!("{e}; using {DEFAULT_WIDTH}x{DEFAULT_HEIGHT}");
                *self = GridState::default();
                Err(e)
            }
        };
        self.orientation = orientation;
        result
    }

    /// Places the ant. Coordinates outside the grid put it on the origin instead.
    pub fn set_start(&mut self, x: i32, y: i32) -> Result<(), ValidationError> {
        match self.cell(x, y) {
            Ok((x, y)) => {
                self.x = x;
                self.y = y;
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}; starting at (0,0)");
                self.x = 0;
                self.y = 0;
                Err(e)
            }
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Puts food on a cell. Coordinates outside the grid are rejected.
    pub fn add_food(&mut self, x: i32, y: i32) -> Result<(), ValidationError> {
        let (x, y) = self.cell(x, y).inspect_err(|e| log::warn!("{e}; food ignored"))?;
        let index = self.index(x, y);
        self.food[index] = true;
        Ok(())
    }

    pub fn has_food(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.food[self.index(x, y)]
    }

    /// All cells that currently hold food, as `(x, y)`.
    pub fn food(&self) -> Vec<(usize, usize)> {
        self.food
            .iter()
            .enumerate()
            .filter(|(_, food)| **food)
            .map(|(index, _)| (index % self.width, index / self.width))
            .collect()
    }

    /// Applies a command instantly. Moving wraps around the edges and eats any
    /// food on the cell the ant arrives at.
    pub fn apply(&mut self, command: Command) -> Transition {
        let mut ate_food = false;

        match command {
            Command::Move => {
                let (x, y) = self.ahead();
                self.x = x;
                self.y = y;

                let index = self.index(x, y);
                ate_food = self.food[index];
                self.food[index] = false;
            }
            Command::RotateLeft => self.orientation = self.orientation.rotated_left(),
            Command::RotateRight => self.orientation = self.orientation.rotated_right(),
            Command::Skip => {}
        }

        Transition {
            command,
            position: (self.x, self.y),
            orientation: self.orientation,
            ate_food,
        }
    }

    fn ahead(&self) -> (usize, usize) {
        match self.orientation {
            Orientation::North => (self.x, (self.y + 1) % self.height),
            Orientation::South => (self.x, (self.y + self.height - 1) % self.height),
            Orientation::East => ((self.x + 1) % self.width, self.y),
            Orientation::West => ((self.x + self.width - 1) % self.width, self.y),
        }
    }

    fn cell(&self, x: i32, y: i32) -> Result<(usize, usize), ValidationError> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(col), Ok(row)) if col < self.width && row < self.height => Ok((col, row)),
            _ => Err(ValidationError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            }),
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}
