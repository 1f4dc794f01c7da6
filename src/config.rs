//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory (or CWD).
//! Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::sim::words::Language;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub rules: RulesConfig,
    pub shop: ShopConfig,
    pub seed: Option<u64>,
    pub language: Language,
    pub demo: DemoConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    pub input_tick_ms: u64,
    pub enemy_base_interval_ms: u64,
    pub enemy_min_interval_ms: u64,
    pub respawn_delay_ms: u64,
    pub level_complete_delay_ms: u64, // 0 = switch to the shop on the same tick
}

#[derive(Clone, Debug, PartialEq)]
pub struct RulesConfig {
    pub base_maze_size: usize,
    pub max_maze_size: usize,
    pub spare_positions: usize,    // sampled beyond the word length, hunter spawn pool
    pub respawn_candidates: usize, // pool size when the hunter comes back
    pub speed_increment: f64,      // added to the hunter's multiplier per kill
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopConfig {
    pub shield: u32,
    pub sword: u32,
    pub pistol: u32,
    pub drill: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub levels: u32,
    pub max_ms: u64,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    shop: TomlShop,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    demo: TomlDemo,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_input_tick")]
    input_tick_ms: u64,
    #[serde(default = "default_enemy_base")]
    enemy_base_interval_ms: u64,
    #[serde(default = "default_enemy_min")]
    enemy_min_interval_ms: u64,
    #[serde(default = "default_respawn_delay")]
    respawn_delay_ms: u64,
    #[serde(default = "default_complete_delay")]
    level_complete_delay_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_base_maze")]
    base_maze_size: usize,
    #[serde(default = "default_max_maze")]
    max_maze_size: usize,
    #[serde(default = "default_spare_positions")]
    spare_positions: usize,
    #[serde(default = "default_respawn_candidates")]
    respawn_candidates: usize,
    #[serde(default = "default_speed_increment")]
    speed_increment: f64,
}

#[derive(Deserialize, Debug)]
struct TomlShop {
    #[serde(default = "default_shield_price")]
    shield: u32,
    #[serde(default = "default_sword_price")]
    sword: u32,
    #[serde(default = "default_pistol_price")]
    pistol: u32,
    #[serde(default = "default_drill_price")]
    drill: u32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    language: Language,
}

#[derive(Deserialize, Debug)]
struct TomlDemo {
    #[serde(default = "default_demo_levels")]
    levels: u32,
    #[serde(default = "default_demo_max_ms")]
    max_ms: u64,
}

// ── Defaults ──

fn default_input_tick() -> u64 { 110 }
fn default_enemy_base() -> u64 { 600 }
fn default_enemy_min() -> u64 { 200 }
fn default_respawn_delay() -> u64 { 2000 }
fn default_complete_delay() -> u64 { 300 }  // lets the last pickup show before the shop

fn default_base_maze() -> usize { 21 }
fn default_max_maze() -> usize { 35 }
fn default_spare_positions() -> usize { 5 }
fn default_respawn_candidates() -> usize { 20 }
fn default_speed_increment() -> f64 { 0.1 }

fn default_shield_price() -> u32 { 3 }
fn default_sword_price() -> u32 { 4 }
fn default_pistol_price() -> u32 { 5 }
fn default_drill_price() -> u32 { 12 }

fn default_demo_levels() -> u32 { 3 }
fn default_demo_max_ms() -> u64 { 600_000 } // ten simulated minutes

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            input_tick_ms: default_input_tick(),
            enemy_base_interval_ms: default_enemy_base(),
            enemy_min_interval_ms: default_enemy_min(),
            respawn_delay_ms: default_respawn_delay(),
            level_complete_delay_ms: default_complete_delay(),
        }
    }
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            base_maze_size: default_base_maze(),
            max_maze_size: default_max_maze(),
            spare_positions: default_spare_positions(),
            respawn_candidates: default_respawn_candidates(),
            speed_increment: default_speed_increment(),
        }
    }
}

impl Default for TomlShop {
    fn default() -> Self {
        TomlShop {
            shield: default_shield_price(),
            sword: default_sword_price(),
            pistol: default_pistol_price(),
            drill: default_drill_price(),
        }
    }
}

impl Default for TomlDemo {
    fn default() -> Self {
        TomlDemo {
            levels: default_demo_levels(),
            max_ms: default_demo_max_ms(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            timing: TimingConfig {
                input_tick_ms: toml_cfg.timing.input_tick_ms.max(1),
                enemy_base_interval_ms: toml_cfg.timing.enemy_base_interval_ms,
                enemy_min_interval_ms: toml_cfg.timing.enemy_min_interval_ms.max(1),
                respawn_delay_ms: toml_cfg.timing.respawn_delay_ms,
                level_complete_delay_ms: toml_cfg.timing.level_complete_delay_ms,
            },
            rules: RulesConfig {
                base_maze_size: toml_cfg.rules.base_maze_size,
                max_maze_size: toml_cfg.rules.max_maze_size.max(toml_cfg.rules.base_maze_size),
                spare_positions: toml_cfg.rules.spare_positions,
                respawn_candidates: toml_cfg.rules.respawn_candidates.max(1),
                speed_increment: toml_cfg.rules.speed_increment.max(0.0),
            },
            shop: ShopConfig {
                shield: toml_cfg.shop.shield,
                sword: toml_cfg.shop.sword,
                pistol: toml_cfg.shop.pistol,
                drill: toml_cfg.shop.drill,
            },
            seed: toml_cfg.general.seed,
            language: toml_cfg.general.language,
            demo: DemoConfig {
                levels: toml_cfg.demo.levels,
                max_ms: toml_cfg.demo.max_ms,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() { continue; }
            match load_file(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    return cfg;
                }
                Err(e) => {
                    tracing::warn!("{e}; using default settings");
                    return GameConfig::default();
                }
            }
        }
        GameConfig::default()
    }

    /// Parse a config document. Missing sections and keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg: TomlConfig = toml::from_str(text)?;
        Ok(toml_cfg.into())
    }
}

fn load_file(path: &PathBuf) -> Result<GameConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    GameConfig::from_toml_str(&text)
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
