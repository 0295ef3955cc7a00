use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod key_bindings;
pub use key_bindings::{KeyBinding, KeyBindings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_frame_millis")]
    pub frame_millis: u64,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

fn default_frame_millis() -> u64 { 16 }

/// Tuning of the snake simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Length of one movement tick.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Ticks between two food spawns.
    #[serde(default = "default_food_spawn_cooldown")]
    pub food_spawn_cooldown: u32,
    /// Chance in percent that a spawned food is super food.
    #[serde(default = "default_super_food_percent")]
    pub super_food_percent: u32,
    #[serde(default = "default_food_reward")]
    pub food_reward: u32,
    #[serde(default = "default_food_growth")]
    pub food_growth: u32,
    #[serde(default = "default_super_food_reward")]
    pub super_food_reward: u32,
    #[serde(default = "default_super_food_growth")]
    pub super_food_growth: u32,
}

fn default_tick_millis() -> u64 { 250 }
fn default_food_spawn_cooldown() -> u32 { 5 }
fn default_super_food_percent() -> u32 { 5 }
fn default_food_reward() -> u32 { 1 }
fn default_food_growth() -> u32 { 1 }
fn default_super_food_reward() -> u32 { 5 }
fn default_super_food_growth() -> u32 { 5 }

impl SimulationConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Start volumes, 0 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_volume")]
    pub music_volume: u8,
    #[serde(default = "default_volume")]
    pub effects_volume: u8,
}

fn default_volume() -> u8 { 50 }

/// Largest growth a single food may grant.
const MAX_GROWTH: u32 = 1000;

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_millis: default_frame_millis(),
            simulation: SimulationConfig::default(),
            audio: AudioConfig::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            food_spawn_cooldown: default_food_spawn_cooldown(),
            super_food_percent: default_super_food_percent(),
            food_reward: default_food_reward(),
            food_growth: default_food_growth(),
            super_food_reward: default_super_food_reward(),
            super_food_growth: default_super_food_growth(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: default_volume(),
            effects_volume: default_volume(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the user config directory, writing the defaults
    /// there on first start.
    pub fn load() -> Result<Self> {
        let config_path = get_config_dir()?.join("config.toml");
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let config_str = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            let config: Config = toml::from_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", config_path))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        ensure!(sim.tick_millis > 0, "simulation.tick_millis must be positive");
        ensure!(
            sim.super_food_percent <= 100,
            "simulation.super_food_percent must be at most 100, got {}",
            sim.super_food_percent
        );
        ensure!(
            sim.food_growth <= MAX_GROWTH && sim.super_food_growth <= MAX_GROWTH,
            "food growth must be at most {}",
            MAX_GROWTH
        );
        ensure!(
            self.audio.music_volume <= 100 && self.audio.effects_volume <= 100,
            "audio volumes must be between 0 and 100"
        );
        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
        }

        let config_str = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .with_context(|| "Failed to determine config directory")?
        .join("tilesnake");

    Ok(config_dir)
}
