//! Configuration file support for appgrid.
//!
//! Configuration is loaded from `~/.config/appgrid/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/appgrid/config.toml
//! max_fling_velocity = 6000
//! fling_deceleration = 3500.0
//! cell_width_px = 8
//! cell_height_px = 16
//! frame_interval_ms = 16
//! application_dirs = ["/usr/share/applications", "~/.local/share/applications"]
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::scroll::DEFAULT_MAX_FLING_VELOCITY;

const DEFAULT_FLING_DECELERATION: f32 = 4000.0;
const DEFAULT_CELL_WIDTH_PX: u16 = 8;
const DEFAULT_CELL_HEIGHT_PX: u16 = 16;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Ceiling for released fling velocity, pixels per second
    pub max_fling_velocity: Option<u32>,

    /// Deceleration the renderer applies to flings, pixels per second squared
    pub fling_deceleration: Option<f32>,

    /// Pixels per terminal column
    pub cell_width_px: Option<u16>,

    /// Pixels per terminal row
    pub cell_height_px: Option<u16>,

    /// Renderer frame cadence
    pub frame_interval_ms: Option<u64>,

    /// Directories scanned for `.desktop` entries
    pub application_dirs: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("appgrid")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        max_fling_velocity: Option<u32>,
        application_dirs: Vec<PathBuf>,
    ) -> Self {
        if max_fling_velocity.is_some() {
            self.max_fling_velocity = max_fling_velocity;
        }
        if !application_dirs.is_empty() {
            self.application_dirs = application_dirs;
        }
        self
    }

    /// Get the fling ceiling, falling back to environment variable or default.
    pub fn max_fling_velocity(&self) -> u32 {
        self.max_fling_velocity
            .or_else(|| {
                std::env::var("APPGRID_MAX_FLING_VELOCITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(DEFAULT_MAX_FLING_VELOCITY)
    }

    pub fn fling_deceleration(&self) -> f32 {
        self.fling_deceleration
            .filter(|d| *d > 0.0)
            .unwrap_or(DEFAULT_FLING_DECELERATION)
    }

    pub fn cell_width_px(&self) -> u16 {
        self.cell_width_px
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_CELL_WIDTH_PX)
    }

    pub fn cell_height_px(&self) -> u16 {
        self.cell_height_px
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_CELL_HEIGHT_PX)
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_FRAME_INTERVAL_MS)
    }

    /// Directories to scan for applications, with `~` expanded.
    ///
    /// Defaults to the XDG data directories when none are configured.
    pub fn application_dirs(&self) -> Vec<PathBuf> {
        if !self.application_dirs.is_empty() {
            return self.application_dirs.iter().map(|p| expand_home(p)).collect();
        }

        let mut dirs = vec![PathBuf::from("/usr/share/applications")];
        if let Some(data) = dirs::data_dir() {
            dirs.push(data.join("applications"));
        }
        dirs
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.max_fling_velocity.is_none());
        assert!(config.application_dirs.is_empty());
        assert_eq!(config.fling_deceleration(), DEFAULT_FLING_DECELERATION);
        assert_eq!(config.cell_width_px(), 8);
        assert_eq!(config.frame_interval_ms(), 16);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            max_fling_velocity = 6000
            fling_deceleration = 3500.0
            cell_width_px = 10
            application_dirs = ["/opt/apps"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.max_fling_velocity(), 6000);
        assert_eq!(config.fling_deceleration(), 3500.0);
        assert_eq!(config.cell_width_px(), 10);
        assert_eq!(config.cell_height_px(), 16);
        assert_eq!(config.application_dirs(), vec![PathBuf::from("/opt/apps")]);
    }

    #[test]
    fn test_cli_overrides_file() {
        let config: Config = toml::from_str("max_fling_velocity = 6000").unwrap();
        let config = config.with_overrides(Some(1200), vec![PathBuf::from("/tmp/apps")]);
        assert_eq!(config.max_fling_velocity(), 1200);
        assert_eq!(config.application_dirs(), vec![PathBuf::from("/tmp/apps")]);
    }

    #[test]
    fn test_zero_values_fall_back() {
        let config: Config = toml::from_str("fling_deceleration = 0.0\ncell_width_px = 0").unwrap();
        assert_eq!(config.fling_deceleration(), DEFAULT_FLING_DECELERATION);
        assert_eq!(config.cell_width_px(), DEFAULT_CELL_WIDTH_PX);
    }

    #[test]
    fn test_home_expansion() {
        let config: Config = toml::from_str(r#"application_dirs = ["~/apps"]"#).unwrap();
        let dirs = config.application_dirs();
        assert!(dirs[0].ends_with("apps"));
        assert!(!dirs[0].starts_with("~"));
    }
}
