//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the config inside its directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Largest accepted `world.rows` or `world.columns`.
pub const MAX_GRID_DIMENSION: usize = 65_535;

/// Largest accepted `world.rows * world.columns`.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Demo planet settings.
    pub world: WorldConfig,
    /// Rule catalog settings.
    pub classifier: ClassifierConfig,
    /// Report outputs.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Shape and seed of the synthesized planet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed; drives terrain synthesis and classification.
    pub seed: u64,
    /// Latitude bands.
    pub rows: usize,
    /// Cells per latitude band.
    pub columns: usize,
    /// Planet radius. Rule noise is sampled at cell centers on this sphere.
    pub radius: f64,
    /// Elevation in meters below which cells are ocean.
    pub sea_level: f32,
}

/// Rule catalog selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// RON rule catalog to load. `None` uses the built-in catalog.
    pub rules_path: Option<PathBuf>,
}

/// Optional report files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Write a JSON summary of the pass here.
    pub summary_path: Option<PathBuf>,
    /// Write a label map PNG here.
    pub map_path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rows: 90,
            columns: 180,
            radius: 100.0,
            sea_level: 0.0,
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

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
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

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-reads the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Checks values serde cannot: a planet needs at least one cell, at most
    /// [`MAX_GRID_CELLS`] cells with each side within [`MAX_GRID_DIMENSION`],
    /// and a positive radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, columns) = (self.world.rows, self.world.columns);
        if rows == 0 || columns == 0 {
            return Err(ConfigError::InvalidValue {
                field: "world.rows/world.columns",
                reason: format!("{rows}x{columns} grid has no cells"),
            });
        }
        if rows > MAX_GRID_DIMENSION || columns > MAX_GRID_DIMENSION {
            return Err(ConfigError::InvalidValue {
                field: "world.rows/world.columns",
                reason: format!("{rows}x{columns} exceeds {MAX_GRID_DIMENSION} per side"),
            });
        }
        if rows * columns > MAX_GRID_CELLS {
            return Err(ConfigError::InvalidValue {
                field: "world.rows/world.columns",
                reason: format!("{rows}x{columns} grid exceeds {MAX_GRID_CELLS} cells"),
            });
        }
        if !(self.world.radius.is_finite() && self.world.radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "world.radius",
                reason: format!("{} is not a positive radius", self.world.radius),
            });
        }
        Ok(())
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("seed: 42"));
        assert!(ron_str.contains("columns: 180"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.classifier.rules_path = Some(PathBuf::from("rules/biomes.ron"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(world: (seed: 7))").unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.rows, WorldConfig::default().rows);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 9001;
        config.output.map_path = Some(PathBuf::from("map.png"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        let config = Config::load_or_create(&sub).unwrap();
        assert_eq!(config, Config::default());
        assert!(sub.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.world.rows = 30;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().world.rows, 30);
        assert!(modified.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_file_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.world.columns = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        config.world.columns = 10;
        config.world.radius = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_grid_size() {
        let mut config = Config::default();
        config.world.rows = MAX_GRID_DIMENSION;
        config.world.columns = MAX_GRID_CELLS / MAX_GRID_DIMENSION;
        assert!(config.validate().is_ok());

        config.world.rows = MAX_GRID_DIMENSION + 1;
        config.world.columns = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        config.world.rows = 1 << 13;
        config.world.columns = 1 << 13;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        config.world.rows = usize::MAX;
        config.world.columns = usize::MAX;
        assert!(config.validate().is_err());
    }
}
