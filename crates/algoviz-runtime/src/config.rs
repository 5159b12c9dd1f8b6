#![forbid(unsafe_code)]

//! Session configuration loaded from TOML or JSON.
//!
//! ```toml
//! [playback]
//! speed = "fast"
//! mode = "precomputed"
//! algorithm = "quick"
//!
//! [speed]
//! fast_ms = 50
//!
//! [history]
//! max_depth = 200
//!
//! [generator]
//! len = 32
//! min = 1
//! max = 99
//! shape = "nearly-sorted"
//! seed = 7
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::Path;

use algoviz_core::{AlgorithmKind, ArrayShape, Value};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::HistoryConfig;
use crate::run::RunMode;
use crate::speed::{Speed, SpeedTable};

/// Largest array a session will generate.
///
/// Every step stores a full snapshot and the quadratic sorts take O(n^2)
/// steps, so a full run of this size stays within tens of megabytes.
pub const MAX_GENERATED_LEN: usize = 100;

/// Everything a [`PlaybackSession`](crate::PlaybackSession) can be tuned with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub playback: PlaybackConfig,
    pub speed: SpeedTable,
    pub history: HistoryConfig,
    pub generator: GeneratorConfig,
}

/// Initial playback settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub speed: Speed,
    pub mode: RunMode,
    pub algorithm: AlgorithmKind,
}

/// Input generation for `randomize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub len: usize,
    pub min: Value,
    pub max: Value,
    pub shape: ArrayShape,
    /// Fixed seed for reproducible arrays; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            len: 20,
            min: 5,
            max: 100,
            shape: ArrayShape::Random,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension: `.json` is JSON, anything else TOML. The result
    /// is validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        tracing::debug!(path = %path.display(), "config loaded");
        config.validated()
    }

    /// Out-of-range values, one message each. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, ms) in [
            ("speed.slow_ms", self.speed.slow_ms),
            ("speed.normal_ms", self.speed.normal_ms),
            ("speed.fast_ms", self.speed.fast_ms),
        ] {
            if ms == 0 {
                errors.push(format!("{name} must be > 0 (use speed = \"instant\" for no delay)"));
            }
        }

        if self.history.max_depth == 0 {
            errors.push("history.max_depth must be > 0".into());
        }

        if self.generator.min > self.generator.max {
            errors.push(format!(
                "generator.min ({}) must not exceed generator.max ({})",
                self.generator.min, self.generator.max
            ));
        }

        if self.generator.len > MAX_GENERATED_LEN {
            errors.push(format!(
                "generator.len must be <= {MAX_GENERATED_LEN}, got {}",
                self.generator.len
            ));
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_validates_clean() {
        assert!(SessionConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            [playback]
            speed = "fast"

            [speed]
            fast_ms = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.playback.speed, Speed::Fast);
        assert_eq!(config.playback.mode, RunMode::Live);
        assert_eq!(config.speed.fast_ms, 40);
        assert_eq!(config.speed.normal_ms, 500);
        assert_eq!(config.history.max_depth, 100);
        assert_eq!(config.generator.len, 20);
    }

    #[test]
    fn json_round_trips_through_serde() {
        let mut config = SessionConfig::default();
        config.playback.algorithm = AlgorithmKind::Heap;
        config.generator.shape = ArrayShape::NearlySorted;
        config.generator.seed = Some(3);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"nearly-sorted\""));
        assert_eq!(SessionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = SessionConfig::from_toml_str("[playback]\nspeed = \"warp\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = SessionConfig::default();
        config.speed.fast_ms = 0;
        config.history.max_depth = 0;
        config.generator.min = 50;
        config.generator.max = 10;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(matches!(
            config.validated(),
            Err(ConfigError::Validation(list)) if list.len() == 3
        ));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("algoviz.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "[history]\nmax_depth = 7").unwrap();
        assert_eq!(SessionConfig::load(&toml_path).unwrap().history.max_depth, 7);

        let json_path = dir.path().join("algoviz.json");
        std::fs::write(&json_path, r#"{"playback": {"mode": "precomputed"}}"#).unwrap();
        assert_eq!(
            SessionConfig::load(&json_path).unwrap().playback.mode,
            RunMode::Precomputed
        );
    }

    #[test]
    fn load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[generator]\nlen = 20000").unwrap();
        assert!(matches!(
            SessionConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn generator_len_bound_is_inclusive() {
        let mut config = SessionConfig::default();
        config.generator.len = MAX_GENERATED_LEN;
        assert!(config.validate().is_empty());
        config.generator.len = MAX_GENERATED_LEN + 1;
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SessionConfig::from_toml_file("/nonexistent/algoviz.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
