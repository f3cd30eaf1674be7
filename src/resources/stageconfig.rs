//! Stage configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are used for
//! anything the file does not set.
//!
//! # Configuration File Format
//!
//! ```ini
//! [stage]
//! starter_sprite = true
//!
//! [collision]
//! follow_sprites = false
//!
//! [runner]
//! tick_hz = 60
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

const DEFAULT_STARTER_SPRITE: bool = true;
const DEFAULT_FOLLOW_SPRITES: bool = false;
const DEFAULT_TICK_HZ: u32 = 60;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./motionstage.ini";

/// Stage configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Create a cat sprite with its first action tab when the stage is built.
    pub starter_sprite: bool,
    /// Derive every tab's tracked position from its sprite. When false,
    /// tracked positions are only set explicitly and start absent.
    pub follow_sprites: bool,
    /// Ticks per second of the headless runner.
    pub tick_hz: u32,
    /// Stage seconds per real second: 2.0 plays everything twice as fast.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StageConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            starter_sprite: DEFAULT_STARTER_SPRITE,
            follow_sprites: DEFAULT_FOLLOW_SPRITES,
            tick_hz: DEFAULT_TICK_HZ,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(starter) = config.getbool("stage", "starter_sprite").ok().flatten() {
            self.starter_sprite = starter;
        }
        if let Some(follow) = config.getbool("collision", "follow_sprites").ok().flatten() {
            self.follow_sprites = follow;
        }
        if let Some(hz) = config.getuint("runner", "tick_hz").ok().flatten() {
            // zero would stall the runner
            self.tick_hz = u32::try_from(hz).unwrap_or(u32::MAX).max(1);
        }
        if let Some(scale) = config.getfloat("runner", "time_scale").ok().flatten() {
            if scale.is_finite() && scale >= 0.0 {
                self.time_scale = scale as f32;
            } else {
                warn!("Ignoring time_scale {}: must be a non-negative number", scale);
            }
        }

        info!(
            "Loaded config: starter_sprite={}, follow_sprites={}, tick_hz={}, time_scale={}",
            self.starter_sprite, self.follow_sprites, self.tick_hz, self.time_scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("stage", "starter_sprite", Some(self.starter_sprite.to_string()));
        config.set("collision", "follow_sprites", Some(self.follow_sprites.to_string()));
        config.set("runner", "tick_hz", Some(self.tick_hz.to_string()));
        config.set("runner", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds per runner tick.
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}
