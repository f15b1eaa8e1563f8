//! Config file and resolved settings.

use crate::render::{ColorMode, Palette};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default board side length.
pub const DEFAULT_SCALE: i64 = 128;
/// Default run-record file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "gol_runs.txt";

/// User configuration loaded from config file.
/// All fields are optional. CLI flags override config, config overrides defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board side length
    pub scale: Option<i64>,
    /// Pixels per cell side (omit to fit the terminal)
    pub cell_px: Option<usize>,
    /// Generations per second cap (0 = uncapped)
    pub fps: Option<u32>,
    /// Default color mode
    pub color: Option<ColorModeConfig>,
    /// Run-record file
    pub output: Option<PathBuf>,
    /// Seed for the first board
    pub seed: Option<u64>,
    /// Stop after this many finished runs (0 = never)
    pub runs: Option<u64>,
    /// Run without the terminal UI
    pub headless: Option<bool>,
    /// Cell colors as [r, g, b]
    pub palette: PaletteConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub alive: Option<[u8; 3]>,
    pub dead: Option<[u8; 3]>,
    pub outline: Option<[u8; 3]>,
}

impl PaletteConfig {
    pub fn resolve(&self) -> Palette {
        let base = Palette::default();
        let rgb = |c: Option<[u8; 3]>, fallback: (u8, u8, u8)| {
            c.map_or(fallback, |[r, g, b]| (r, g, b))
        };
        Palette {
            alive: rgb(self.alive, base.alive),
            dead: rgb(self.dead, base.dead),
            outline: rgb(self.outline, base.outline),
        }
    }
}

/// Color mode names for config file (kebab-case friendly)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorModeConfig {
    Mono,
    Ansi16,
    Ansi256,
    TrueColor,
}

impl From<ColorModeConfig> for ColorMode {
    fn from(c: ColorModeConfig) -> Self {
        match c {
            ColorModeConfig::Mono => ColorMode::Mono,
            ColorModeConfig::Ansi16 => ColorMode::Ansi16,
            ColorModeConfig::Ansi256 => ColorMode::Ansi256,
            ColorModeConfig::TrueColor => ColorMode::TrueColor,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the config file path: ~/.config/toruslife/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("toruslife").join("config.toml"))
}

/// Load config from file. A missing file is not an error.
pub fn load_config() -> Result<Config, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&contents).map_err(|source| ConfigError::Parse { path, source })
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Fully resolved driver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub scale: i64,
    pub cell_px: Option<usize>,
    pub fps: u32,
    pub color: ColorMode,
    pub output: PathBuf,
    pub seed: Option<u64>,
    pub runs: u64,
    pub headless: bool,
    pub palette: Palette,
}

impl Settings {
    /// Defaults overlaid with whatever the config file sets.
    pub fn from_config(config: &Config) -> Self {
        Settings {
            scale: config.scale.unwrap_or(DEFAULT_SCALE),
            cell_px: config.cell_px,
            fps: config.fps.unwrap_or(0),
            color: config.color.map_or(ColorMode::TrueColor, ColorMode::from),
            output: config
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            seed: config.seed,
            runs: config.runs.unwrap_or(0),
            headless: config.headless.unwrap_or(false),
            palette: config.palette.resolve(),
        }
    }
}

/// Generate a default config file with all options commented out
pub fn default_config_string() -> String {
    r#"# toruslife configuration
# Use --show-config to see the active config file path.
# CLI flags override these settings.

# Board side length (the board is scale x scale cells)
# scale = 128

# Pixels per cell side; omit to fit the board to the terminal.
# Cells of 3 pixels or more are drawn with an outline.
# cell_px = 1

# Generations per second cap (0 = uncapped)
# fps = 0

# Color mode: mono, ansi16, ansi256, true-color
# color = "true-color"

# File that finished runs are appended to
# output = "gol_runs.txt"

# Seed for the random boards (omit for a fresh seed each launch)
# seed = 42

# Stop after this many finished runs (0 = never)
# runs = 0

# Run without the terminal UI, logging progress instead
# headless = false

# [palette]
# alive = [0, 255, 0]
# dead = [0, 0, 0]
# outline = [0, 0, 0]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_gives_defaults() {
        let settings = Settings::from_config(&parse_config("").unwrap());
        assert_eq!(settings.scale, DEFAULT_SCALE);
        assert_eq!(settings.cell_px, None);
        assert_eq!(settings.fps, 0);
        assert_eq!(settings.color, ColorMode::TrueColor);
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.runs, 0);
        assert!(!settings.headless);
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_config_overrides() {
        let config = parse_config(
            r#"
scale = 64
cell_px = 3
fps = 30
color = "ansi256"
output = "/tmp/runs.txt"
seed = 9
runs = 5
headless = true

[palette]
alive = [255, 255, 255]
"#,
        )
        .unwrap();
        let settings = Settings::from_config(&config);
        assert_eq!(settings.scale, 64);
        assert_eq!(settings.cell_px, Some(3));
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.color, ColorMode::Ansi256);
        assert_eq!(settings.output, PathBuf::from("/tmp/runs.txt"));
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.runs, 5);
        assert!(settings.headless);
        assert_eq!(settings.palette.alive, (255, 255, 255));
        assert_eq!(settings.palette.dead, Palette::default().dead);
    }

    #[test]
    fn test_default_file_parses() {
        let config = parse_config(&default_config_string()).unwrap();
        assert!(config.scale.is_none());
    }

    #[test]
    fn test_bad_color_rejected() {
        assert!(parse_config("color = \"sepia\"").is_err());
    }
}
