//! Configuration management for isotherm.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{self, DEFAULT_COLORWAY};
use crate::error::{IsothermError, Result};
use crate::grid::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::render::RenderOptions;

/// Command-line arguments for the isotherm server
#[derive(Parser, Debug)]
#[command(name = "isotherm")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the grid file to serve (JSON or raw little-endian f32)
    pub grid_file: PathBuf,

    /// Number of days in the grid file (inferred from its size when omitted)
    #[arg(short, long, env = "ISOTHERM_DAYS")]
    pub days: Option<usize>,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "ISOTHERM_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ISOTHERM_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "ISOTHERM_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "ISOTHERM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Default colorway (thermal, classic, earth, vivid)
    #[arg(long, env = "ISOTHERM_COLORWAY")]
    pub colorway: Option<String>,

    /// Default blur radius in pixels at 2048 px width
    #[arg(long, env = "ISOTHERM_BLUR_RADIUS")]
    pub blur_radius: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ISOTHERM_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Rendering defaults applied when a request leaves a field out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Default colorway
    #[serde(default = "default_colorway")]
    pub colorway: String,

    /// Default blur radius at 2048 px width
    #[serde(default)]
    pub blur_radius: f64,

    /// Default frame width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Default frame height
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rendering defaults
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Returns the configuration, the grid file path and the day count if
    /// one was given.
    pub fn load() -> Result<(Self, PathBuf, Option<usize>)> {
        let args = Args::parse();
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        config.apply_args(&args);
        Ok((config, args.grid_file, args.days))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.server.workers.is_some() {
            self.server.workers = other.server.workers;
        }
        self.render = other.render;
        self.log_level = other.log_level;
    }

    /// Override with command-line arguments and environment variables
    fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.workers.is_some() {
            self.server.workers = args.workers;
        }
        if let Some(colorway) = &args.colorway {
            self.render.colorway = colorway.clone();
        }
        if let Some(blur_radius) = args.blur_radius {
            self.render.blur_radius = blur_radius;
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(IsothermError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(IsothermError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(IsothermError::Config {
                message: "Worker thread count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(IsothermError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if let Err(e) = colormaps::get_colormap(&self.render.colorway) {
            return Err(IsothermError::Config {
                message: e.to_string(),
            });
        }

        if !self.render.blur_radius.is_finite() || self.render.blur_radius < 0.0 {
            return Err(IsothermError::Config {
                message: format!(
                    "Invalid blur radius: {}. Must be a non-negative number",
                    self.render.blur_radius
                ),
            });
        }

        if self.render.width == 0 || self.render.height == 0 {
            return Err(IsothermError::Config {
                message: format!(
                    "Invalid frame size: {}x{}",
                    self.render.width, self.render.height
                ),
            });
        }

        Ok(())
    }
}

impl RenderConfig {
    /// Fill the unset fields of request options from these defaults.
    pub fn fill(&self, options: &RenderOptions) -> RenderOptions {
        let mut filled = options.clone();
        if filled.colorway.is_none() && filled.custom_stops.is_none() {
            filled.colorway = Some(self.colorway.clone());
        }
        filled.blur_radius = filled.blur_radius.or(Some(self.blur_radius));
        filled.width = filled.width.or(Some(self.width));
        filled.height = filled.height.or(Some(self.height));
        filled
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colorway: default_colorway(),
            blur_radius: 0.0,
            width: default_width(),
            height: default_height(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_colorway() -> String {
    DEFAULT_COLORWAY.to_string()
}

fn default_width() -> u32 {
    DEFAULT_FRAME_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}
