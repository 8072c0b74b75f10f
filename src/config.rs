//! Configuration file support for termsketch.
//!
//! Settings are loaded from `~/.config/termsketch/config.toml` and cover
//! canvas defaults, drawing defaults, and terminal output preferences. If no
//! config file exists, sensible defaults are used automatically.

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// default_width = 80
/// default_height = 40
/// empty_char = "."
/// full_char = "#"
///
/// [drawing]
/// default_color = "black"
/// default_thickness = 1.0
/// fill = false
///
/// [ui]
/// ansi_colors = true
/// clear_before_plot = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// New-area defaults (dimensions and grid characters)
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Defaults applied to newly created shapes
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Terminal output preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// Canvas defaults used when creating areas.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width of newly created areas in cells (valid range: 1 - 500)
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Height of newly created areas in cells (valid range: 1 - 500)
    #[serde(default = "default_height")]
    pub default_height: u32,

    /// Character printed for untouched cells
    #[serde(default = "default_empty_char")]
    pub empty_char: char,

    /// Character printed for rasterized cells
    #[serde(default = "default_full_char")]
    pub full_char: char,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
            empty_char: default_empty_char(),
            full_char: default_full_char(),
        }
    }
}

/// Drawing defaults for newly created shapes.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default shape color (black, white, red, green)
    #[serde(default)]
    pub default_color: Color,

    /// Default stroke thickness (valid range: 0.1 - 10.0); informational
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Whether new shapes are filled by default
    #[serde(default)]
    pub fill: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: Color::default(),
            default_thickness: default_thickness(),
            fill: false,
        }
    }
}

/// Terminal output preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color filled cells with ANSI escapes when plotting
    #[serde(default)]
    pub ansi_colors: bool,

    /// Clear the terminal before each plot
    #[serde(default = "default_clear_before_plot")]
    pub clear_before_plot: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            ansi_colors: false,
            clear_before_plot: default_clear_before_plot(),
        }
    }
}

fn default_width() -> u32 {
    80
}

fn default_height() -> u32 {
    40
}

fn default_empty_char() -> char {
    '.'
}

fn default_full_char() -> char {
    '#'
}

fn default_thickness() -> f64 {
    1.0
}

fn default_clear_before_plot() -> bool {
    true
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning
    /// is logged.
    ///
    /// Validated ranges:
    /// - `default_width` / `default_height`: 1 - 500
    /// - `default_thickness`: 0.1 - 10.0
    fn validate_and_clamp(&mut self) {
        if !(1..=500).contains(&self.canvas.default_width) {
            log::warn!(
                "Invalid default_width {}, clamping to 1-500 range",
                self.canvas.default_width
            );
            self.canvas.default_width = self.canvas.default_width.clamp(1, 500);
        }

        if !(1..=500).contains(&self.canvas.default_height) {
            log::warn!(
                "Invalid default_height {}, clamping to 1-500 range",
                self.canvas.default_height
            );
            self.canvas.default_height = self.canvas.default_height.clamp(1, 500);
        }

        if !(0.1..=10.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 0.1-10.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(0.1, 10.0);
        }

        if self.canvas.empty_char == self.canvas.full_char {
            log::warn!(
                "empty_char and full_char are both '{}', falling back to '.'/'#'",
                self.canvas.empty_char
            );
            self.canvas.empty_char = default_empty_char();
            self.canvas.full_char = default_full_char();
        }
    }

    /// Returns the path to the configuration file
    /// (`~/.config/termsketch/config.toml`).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("termsketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file, creating the parent
    /// directory if needed. Kept for future use (runtime config editing).
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
