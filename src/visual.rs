use crate::grid::{GridState, Orientation};
use std::f64::consts::TAU;

/// Fraction of the remaining distance covered on every tick.
pub const EASING: f64 = 0.2;
/// A transition is finished once both pixel axes are closer than this.
pub const PIXEL_TOLERANCE: i32 = 5;
/// A transition is finished once the angle is closer than this, in radians.
pub const ANGLE_TOLERANCE: f64 = 0.3;

/// Where the ant is drawn: a pixel position and a sprite rotation.
///
/// This trails the grid; every tick moves it a fraction of the way towards
/// the target computed from the grid state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualState {
    pub px: i32,
    pub py: i32,
    /// Radians, always in [0, 2π).
    pub angle: f64,
}

/// The pixel position and angle the visual state converges towards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub px: i32,
    pub py: i32,
    pub angle: f64,
}

impl Target {
    /// The centre of the ant's cell, with the y axis flipped so that logical
    /// row zero is at the bottom of the surface.
    pub fn of(grid: &GridState, cell_size: i32) -> Target {
        let (x, y) = grid.position();
        let row_from_top = grid.height() - y - 1;

        Target {
            px: x as i32 * cell_size + cell_size / 2,
            py: row_from_top as i32 * cell_size + cell_size / 2,
            angle: grid.orientation().angle(),
        }
    }
}

impl VisualState {
    /// A visual state resting exactly on the target.
    pub fn at(target: Target) -> VisualState {
        VisualState {
            px: target.px,
            py: target.py,
            angle: normalize(target.angle),
        }
    }

    /// Advances one frame towards the target and reports whether the
    /// transition is close enough to count as finished.
    pub fn step(&mut self, target: Target) -> bool {
        self.px += ease(target.px - self.px);
        self.py += ease(target.py - self.py);

        let goal = nearest_equivalent(target.angle, self.angle);
        self.angle = normalize(self.angle + (goal - self.angle) * EASING);

        self.is_near(target)
    }

    /// The compass direction the sprite is currently closest to facing.
    pub fn facing(&self) -> Orientation {
        [
            Orientation::North,
            Orientation::East,
            Orientation::South,
            Orientation::West,
        ]
        .into_iter()
        .fold(Orientation::South, |best, candidate| {
            if angular_distance(self.angle, candidate.angle())
                < angular_distance(self.angle, best.angle())
            {
                candidate
            } else {
                best
            }
        })
    }

    pub fn is_near(&self, target: Target) -> bool {
        (target.px - self.px).abs() < PIXEL_TOLERANCE
            && (target.py - self.py).abs() < PIXEL_TOLERANCE
            && angular_distance(self.angle, target.angle) < ANGLE_TOLERANCE
    }
}

/// The part of `remaining` covered this frame, rounded away from zero so a
/// non-zero distance always shrinks.
fn ease(remaining: i32) -> i32 {
    let step = (f64::from(remaining) * EASING).abs().ceil() as i32;
    step * remaining.signum()
}

/// Of `target`, `target + 2π` and `target - 2π`, the one closest to `current`.
/// Chasing it turns the short way round across the 0/2π seam.
fn nearest_equivalent(target: f64, current: f64) -> f64 {
    [target, target + TAU, target - TAU]
        .into_iter()
        .fold(target, |best, candidate| {
            if (candidate - current).abs() < (best - current).abs() {
                candidate
            } else {
                best
            }
        })
}

fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}
