pub mod range_types;

use crate::errors::{TrailheadError, TrailheadResult};
use crate::features::hydrology::HydrologyConfig;
use crate::features::names::NameTheme;
use crate::features::orography::OrographyConfig;
use crate::features::settlements::SettlementConfig;
use crate::pathfinding::PathfindingConfig;
use crate::terrain_generation::TerrainConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Every tunable of a world generation pass and of later path queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
// NOTE: When adding new fields, keep `Default` in sync so partial config files still load
pub struct WorldConfig {
    pub theme: NameTheme,
    pub terrain: TerrainConfig,
    pub hydrology: HydrologyConfig,
    pub orography: OrographyConfig,
    pub settlements: SettlementConfig,
    pub pathfinding: PathfindingConfig,
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("trailhead");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load the user config, falling back to defaults when it is missing or unreadable.
pub fn load_config() -> WorldConfig {
    let Some(config_path) = get_config_path() else {
        return WorldConfig::default();
    };
    if !config_path.exists() {
        return WorldConfig::default();
    }
    match load_config_from(&config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring config at {}: {err}", config_path.display());
            WorldConfig::default()
        }
    }
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> TrailheadResult<WorldConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str::<WorldConfig>(&contents)?)
}

pub fn save_config(config: &WorldConfig) -> TrailheadResult<()> {
    let config_path = get_config_path().ok_or(TrailheadError::ConfigDirNotFound)?;
    save_config_to(config, config_path)
}

pub fn save_config_to<P: AsRef<Path>>(config: &WorldConfig, path: P) -> TrailheadResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
