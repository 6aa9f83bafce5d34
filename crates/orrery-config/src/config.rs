//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Scene content settings.
    pub scene: SceneConfig,
    /// Scroll sequencer settings.
    pub sequencer: SequencerConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Window title.
    pub title: String,
}

/// Scene content: textures, headings, and responsive layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Planet texture image paths, one per planet.
    pub planet_textures: Vec<PathBuf>,
    /// Solid fallback colors (RGB, 0..1) used when a planet texture fails to load.
    pub placeholder_colors: Vec<[f32; 3]>,
    /// Heading labels, one per planet, driven by the scroll sequencer.
    pub headings: Vec<String>,
    /// Star background texture path.
    pub star_texture: PathBuf,
    /// Seed for the procedural star background used when the texture is missing.
    pub star_seed: u64,
    /// Sphere mesh resolution (segments per ring).
    pub sphere_segments: u32,
    /// Logical viewport width below which the compact sphere layout is used.
    pub narrow_breakpoint: f64,
}

/// Scroll sequencer timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SequencerConfig {
    /// Minimum interval between processed wheel events, in milliseconds.
    pub throttle_ms: u64,
    /// Duration of a forward/backward step transition, in seconds.
    pub step_secs: f32,
    /// Duration of the wrap-around reset transition, in seconds.
    pub wrap_secs: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Orbit drag sensitivity multiplier.
    pub orbit_sensitivity: f32,
    /// Show the cursor-follow marker.
    pub cursor_marker: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            planet_textures: vec![
                PathBuf::from("assets/csilla.png"),
                PathBuf::from("assets/earth.png"),
                PathBuf::from("assets/venus.png"),
                PathBuf::from("assets/volcano.png"),
            ],
            placeholder_colors: vec![
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            headings: vec![
                "Csilla".to_string(),
                "Earth".to_string(),
                "Venus".to_string(),
                "Volcanic".to_string(),
            ],
            star_texture: PathBuf::from("assets/stars.png"),
            star_seed: 42,
            sphere_segments: 64,
            narrow_breakpoint: 500.0,
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 2000,
            step_secs: 1.0,
            wrap_secs: 2.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 1.0,
            cursor_marker: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default config directory: `<platform config dir>/orrery`, falling back to
/// the current directory when the platform dir cannot be resolved.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("orrery"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
