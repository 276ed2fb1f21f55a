use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_WIDTH: i32 = 10;
pub const DEFAULT_HEIGHT: i32 = 20;
pub const DEFAULT_SPEED_MS: u64 = 200;
pub const DEFAULT_LEVEL: u32 = 1;

// Widest spawn footprint is the I piece, which reaches one cell left and two
// right of the anchor placed at width / 2.
const MIN_WIDTH: i32 = 5;
const MIN_HEIGHT: i32 = 4;
// Keeps the terminal layout arithmetic (two columns per cell plus borders) in u16.
pub const MAX_WIDTH: i32 = 255;
pub const MAX_HEIGHT: i32 = 255;
pub const MAX_SPEED_MS: u64 = 60_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid width {0} is too small, need at least 5")]
    WidthTooSmall(i32),
    #[error("grid height {0} is too small, need at least 4")]
    HeightTooSmall(i32),
    #[error("grid width {0} is too large, at most 255")]
    WidthTooLarge(i32),
    #[error("grid height {0} is too large, at most 255")]
    HeightTooLarge(i32),
    #[error("game speed must be at least 1ms")]
    ZeroSpeed,
    #[error("game speed {0}ms is too slow, at most 60000ms")]
    SpeedTooSlow(u64),
    #[error("level must be at least 1")]
    ZeroLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Base tick period in milliseconds at level 1.
    pub speed_ms: u64,
    pub level: u32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed_ms: DEFAULT_SPEED_MS,
            level: DEFAULT_LEVEL,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.width < MIN_WIDTH {
            return Err(ConfigError::WidthTooSmall(self.width));
        }
        if self.height < MIN_HEIGHT {
            return Err(ConfigError::HeightTooSmall(self.height));
        }
        if self.width > MAX_WIDTH {
            return Err(ConfigError::WidthTooLarge(self.width));
        }
        if self.height > MAX_HEIGHT {
            return Err(ConfigError::HeightTooLarge(self.height));
        }
        if self.speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.speed_ms > MAX_SPEED_MS {
            return Err(ConfigError::SpeedTooSlow(self.speed_ms));
        }
        if self.level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        Ok(self)
    }

    /// `round(speed / level)` milliseconds, never less than 1ms.
    pub fn tick_period(&self) -> Duration {
        let level = u64::from(self.level.max(1));
        let ms = self.speed_ms / level + u64::from(self.speed_ms % level >= level - level / 2);
        Duration::from_millis(ms.max(1))
    }
}
