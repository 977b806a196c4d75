//! TOML configuration for simulator runs.
//!
//! Every key is optional. Emotions are named the way the engine logs them.
//!
//! ```toml
//! seed = 42
//!
//! [durations]
//! cry = 8000
//! fireworks = 20000
//!
//! [weights]
//! sad = 0
//! fortune_teller = 50
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use emotion_engine::{EmotionId, EngineConfig};
use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown emotion name: {0}")]
    UnknownEmotion(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

// =============================================================================
// TOML Structures
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SimToml {
    seed: Option<u64>,
    durations: BTreeMap<String, u32>,
    weights: BTreeMap<String, u32>,
}

/// Resolved simulator configuration.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    /// Seed from the file, if any. The CLI flag wins over it.
    pub seed: Option<u64>,
    pub engine: EngineConfig,
    /// File the values came from.
    pub path: Option<PathBuf>,
}

// =============================================================================
// Loading
// =============================================================================

/// Load configuration from `path`, or defaults when there is none.
pub fn load_config_from_path(path: Option<&Path>) -> Result<SimConfig, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("No config file, using default tables");
        return Ok(SimConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text)?;
    config.path = Some(path.to_path_buf());

    tracing::info!(path = %path.display(), "Loaded configuration from file");
    Ok(config)
}

/// Parse and validate a TOML document.
pub fn parse_config(text: &str) -> Result<SimConfig, ConfigError> {
    let toml: SimToml = toml::from_str(text)?;
    let mut engine = EngineConfig::default();

    for (name, &ms) in &toml.durations {
        let id = lookup(name)?;
        if ms == 0 {
            return Err(ConfigError::Validation(format!("duration of {name} must be positive")));
        }
        engine.set_duration(id, ms);
    }

    for (name, &weight) in &toml.weights {
        let id = lookup(name)?;
        if !id.is_selectable() {
            return Err(ConfigError::Validation(format!("{name} is never picked and takes no weight")));
        }
        let weight = u8::try_from(weight).map_err(|_| ConfigError::Validation(format!("weight of {name} is above 255")))?;
        engine.set_weight(id, weight);
    }

    if engine.total_weight() == 0 {
        tracing::warn!("All weights are zero, every pick falls back to sad");
    }

    Ok(SimConfig {
        seed: toml.seed,
        engine,
        path: None,
    })
}

fn lookup(name: &str) -> Result<EmotionId, ConfigError> { EmotionId::from_name(name).ok_or_else(|| ConfigError::UnknownEmotion(name.to_owned())) }

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_empty_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse_config(
            r#"
seed = 7

[durations]
cry = 9000

[weights]
sad = 0
fireworks = 100
"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.engine.duration(EmotionId::Cry), 9000);
        assert_eq!(config.engine.weight(EmotionId::Sad), 0);
        assert_eq!(config.engine.weight(EmotionId::Fireworks), 100);
        assert_eq!(config.engine.duration(EmotionId::Sad), EngineConfig::default().duration(EmotionId::Sad));
    }

    #[test]
    fn test_unknown_emotion() {
        let err = parse_config("[weights]\nhappy = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEmotion(ref name) if name == "happy"));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(parse_config("[durations]\nsad = 0\n"), Err(ConfigError::Validation(_))));
        assert!(matches!(parse_config("[weights]\nnormal = 5\n"), Err(ConfigError::Validation(_))));
        assert!(matches!(parse_config("[weights]\nlove = 300\n"), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml_error() {
        assert!(matches!(parse_config("[weights\nsad = 1"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_config("colour = 1"), Err(ConfigError::Parse(_))), "unknown keys are rejected");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[durations]\nshock = 3000\n").unwrap();
        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.engine.duration(EmotionId::Shock), 3000);
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/emotions.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        let config = load_config_from_path(None).unwrap();
        assert!(config.path.is_none());
        assert_eq!(config.engine.total_weight(), EngineConfig::default().total_weight());
    }
}
