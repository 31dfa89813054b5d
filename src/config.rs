use std::path::Path;

use crate::engine::{DEFAULT_COLS, DEFAULT_ROWS};

/// Rules of a game session. Every key is optional in TOML.
///
/// ```toml
/// rows = 4
/// cols = 4
/// four_probability = 0.2
/// initial_tiles = 2
/// spawn_on_unchanged = true
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,
    /// Tiles placed on a fresh board (start and restart).
    pub initial_tiles: usize,
    /// Spawn a tile even when a move left the board unchanged.
    pub spawn_on_unchanged: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            four_probability: defaults::four_probability(),
            initial_tiles: defaults::initial_tiles(),
            spawn_on_unchanged: true,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::Invalid(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        let cells = self.rows.checked_mul(self.cols).ok_or_else(|| {
            ConfigError::Invalid(format!("grid {}x{} has too many cells", self.rows, self.cols))
        })?;
        if self.initial_tiles > cells {
            return Err(ConfigError::Invalid(format!(
                "initial_tiles ({}) exceeds the {} cells of the grid",
                self.initial_tiles, cells
            )));
        }
        Ok(())
    }
}

mod defaults {
    pub fn four_probability() -> f64 { 0.2 }
    pub fn initial_tiles() -> usize { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!((cfg.rows, cfg.cols), (4, 4));
        assert_eq!(cfg.four_probability, 0.2);
        assert_eq!(cfg.initial_tiles, 2);
        assert!(cfg.spawn_on_unchanged);
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = GameConfig::from_toml_str("rows = 3\ncols = 5\nspawn_on_unchanged = false\n").unwrap();
        assert_eq!((cfg.rows, cfg.cols), (3, 5));
        assert!(!cfg.spawn_on_unchanged);
        assert_eq!(cfg.initial_tiles, 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(GameConfig::from_toml_str("rows = 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            GameConfig::from_toml_str("four_probability = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("rows = 1\ncols = 1\ninitial_tiles = 2"),
            Err(ConfigError::Invalid(_))
        ));
        let oversized = GameConfig { rows: usize::MAX, cols: 2, ..GameConfig::default() };
        assert!(matches!(oversized.validate(), Err(ConfigError::Invalid(_))));
        assert!(GameConfig::from_toml_str("rows = 4294967296\ncols = 4294967296\n").is_err());
        assert!(matches!(GameConfig::from_toml_str("rows = \"four\""), Err(ConfigError::Parse(_))));
        assert!(matches!(GameConfig::from_toml_str("colour = 3"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn bundled_standard_config_matches_defaults() {
        let cfg = GameConfig::from_toml_str(include_str!("../configs/standard.toml")).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
