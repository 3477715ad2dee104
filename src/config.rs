use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

pub const APP_DIR_NAME: &str = "arcade-snake";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 400px window split into 20px cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

pub const DEFAULT_START: Position = Position::new(5, 5);

/// Food generated while the score is a positive multiple of this is special.
pub const SPECIAL_FOOD_SCORE_MODULUS: u32 = 5;

/// Extra points granted by special food on top of the base point.
pub const SPECIAL_FOOD_BONUS: u32 = 10;

pub const DEFAULT_TICK_RATE_HZ: u32 = 10;

/// Terminal columns per grid cell; two keeps cells roughly square.
pub const DEFAULT_CELL_WIDTH: u16 = 2;

pub const DEFAULT_GAME_OVER_HOLD_MS: u64 = 3000;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position::new(x, y)))
    }
}

/// Parameters of the simulation core. Fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start: Position,
    pub special_food_modulus: u32,
    pub special_food_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            start: DEFAULT_START,
            special_food_modulus: SPECIAL_FOOD_SCORE_MODULUS,
            special_food_bonus: SPECIAL_FOOD_BONUS,
        }
    }
}

impl GameConfig {
    /// Checks the structural preconditions the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        // The start cell plus at least one free cell for the first food.
        if self.grid.total_cells() < 2 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if !self.start.is_within_bounds(self.grid) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
                width,
                height,
            });
        }
        if self.special_food_modulus == 0 {
            return Err(ConfigError::ZeroSpecialFoodModulus);
        }
        Ok(())
    }
}

/// Parameters of the terminal front end.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_width: u16,
    pub tick_rate_hz: u32,
    pub game_over_hold_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            game_over_hold_ms: DEFAULT_GAME_OVER_HOLD_MS,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }
        Ok(())
    }

    /// Time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    #[must_use]
    pub fn game_over_hold(&self) -> Duration {
        Duration::from_millis(self.game_over_hold_ms)
    }
}

/// Everything read from the optional JSON config file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Loads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the per-user config file, or defaults when there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };

        match Self::load(&path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.display.validate()
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid {width}x{height} needs at least two cells")]
    GridTooSmall { width: u16, height: u16 },
    #[error("start position ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
    #[error("special food score modulus must be positive")]
    ZeroSpecialFoodModulus,
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("cell width must be positive")]
    ZeroCellWidth,
}

/// Colors for every drawn element.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food_red: Color,
    pub food_blue: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub game_over_title: Color,
    pub menu_footer: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food_red: Color::Red,
    food_blue: Color::Blue,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    game_over_title: Color::Red,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Solid glyph repeated `cell_width` times per grid cell.
pub const GLYPH_CELL: &str = "█";
