use crate::error::ValidationError;
use crate::grid::Orientation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Side length of one grid cell on the drawing surface.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CellSize {
    pub fn pixels(self) -> i32 {
        match self {
            CellSize::Small => 16,
            CellSize::Medium => 48,
            CellSize::Large => 96,
        }
    }

    pub fn from_pixels(pixels: u32) -> Result<CellSize, ValidationError> {
        match pixels {
            16 => Ok(CellSize::Small),
            48 => Ok(CellSize::Medium),
            96 => Ok(CellSize::Large),
            _ => Err(ValidationError::InvalidCellSize(pixels)),
        }
    }

    /// Like [`CellSize::from_pixels`] but falls back to `Medium`.
    pub fn from_pixels_or_default(pixels: u32) -> CellSize {
        CellSize::from_pixels(pixels).unwrap_or_else(|e| {
            log::warn!("{e}; using a medium cell size");
            CellSize::Medium
        })
    }
}

/// Playback frame rate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Low,
    #[default]
    Medium,
    High,
    /// Any other frame rate, in frames per second.
    Custom(u32),
}

impl Speed {
    pub fn fps(self) -> u32 {
        match self {
            Speed::Low => 10,
            Speed::Medium => 30,
            Speed::High => 50,
            Speed::Custom(fps) => fps,
        }
    }

    /// Time between two frames, 1000/fps milliseconds.
    pub fn frame_interval(self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps().max(1)))
    }

    pub fn validate(self) -> Result<Speed, ValidationError> {
        match self {
            Speed::Custom(0) => Err(ValidationError::InvalidFrameRate(0)),
            speed => Ok(speed),
        }
    }

    /// Replaces an unusable frame rate with `Medium`.
    pub fn or_default(self) -> Speed {
        self.validate().unwrap_or_else(|e| {
            log::warn!("{e}; using medium speed");
            Speed::Medium
        })
    }
}

/// One configuration change, queued in order with the commands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    /// Resets the grid: the ant returns to the origin and food is cleared.
    Dimensions { width: i32, height: i32 },
    Start { x: i32, y: i32 },
    Orientation(Orientation),
    CellSize(CellSize),
    Speed(Speed),
    Food { x: i32, y: i32 },
}

/// Everything an animator can be configured with before playback starts.
///
/// Values are validated when they are applied, so an out of range field here
/// ends up as the documented default rather than an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub width: i32,
    pub height: i32,
    pub start: (i32, i32),
    pub orientation: Orientation,
    pub cell_size: CellSize,
    pub speed: Speed,
    pub food: Vec<(i32, i32)>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            width: 10,
            height: 10,
            start: (0, 0),
            orientation: Orientation::South,
            cell_size: CellSize::Medium,
            speed: Speed::Medium,
            food: Vec::new(),
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(contents: &str) -> Result<AnimatorConfig, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// The settings that reproduce this configuration, dimensions first since
    /// they reset everything placed on the grid.
    pub fn settings(&self) -> Vec<Setting> {
        let mut settings = vec![
            Setting::Dimensions {
                width: self.width,
                height: self.height,
            },
            Setting::CellSize(self.cell_size),
            Setting::Speed(self.speed),
            Setting::Start {
                x: self.start.0,
                y: self.start.1,
            },
            Setting::Orientation(self.orientation),
        ];
        settings.extend(self.food.iter().map(|&(x, y)| Setting::Food { x, y }));
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_converting_pixels_only_the_three_presets_are_accepted() {
        assert_eq!(CellSize::from_pixels(16), Ok(CellSize::Small));
        assert_eq!(CellSize::from_pixels(48), Ok(CellSize::Medium));
        assert_eq!(CellSize::from_pixels(96), Ok(CellSize::Large));
        assert_eq!(
            CellSize::from_pixels(20),
            Err(ValidationError::InvalidCellSize(20))
        );
        assert_eq!(CellSize::from_pixels_or_default(20), CellSize::Medium);
    }

    #[test]
    fn when_computing_the_frame_interval_it_is_a_thousand_ms_divided_by_the_fps() {
        assert_eq!(Speed::Low.frame_interval(), Duration::from_millis(100));
        assert_eq!(Speed::Medium.frame_interval(), Duration::from_millis(33));
        assert_eq!(Speed::High.frame_interval(), Duration::from_millis(20));
        assert_eq!(Speed::Custom(250).frame_interval(), Duration::from_millis(4));
    }

    #[test]
    fn when_the_frame_rate_is_zero_medium_speed_is_used() {
        assert_eq!(
            Speed::Custom(0).validate(),
            Err(ValidationError::InvalidFrameRate(0))
        );
        assert_eq!(Speed::Custom(0).or_default(), Speed::Medium);
        assert_eq!(Speed::Custom(5).or_default(), Speed::Custom(5));
    }

    #[test]
    fn when_loading_a_partial_json_config_missing_fields_take_their_defaults() {
        let config = AnimatorConfig::from_json(
            r#"{ "width": 32, "height": 16, "cell_size": "small", "speed": { "custom": 60 }, "food": [[1, 2]] }"#,
        )
        .unwrap();

        assert_eq!(config.width, 32);
        assert_eq!(config.height, 16);
        assert_eq!(config.cell_size, CellSize::Small);
        assert_eq!(config.speed, Speed::Custom(60));
        assert_eq!(config.food, vec![(1, 2)]);
        assert_eq!(config.start, (0, 0));
        assert_eq!(config.orientation, Orientation::South);
    }

    #[test]
    fn when_listing_settings_dimensions_come_first_and_food_last() {
        let config = AnimatorConfig {
            food: vec![(1, 1), (2, 2)],
            ..AnimatorConfig::default()
        };

        let settings = config.settings();

        assert_eq!(
            settings.first(),
            Some(&Setting::Dimensions {
                width: 10,
                height: 10
            })
        );
        assert_eq!(settings.last(), Some(&Setting::Food { x: 2, y: 2 }));
        assert_eq!(settings.len(), 7);
    }
}
