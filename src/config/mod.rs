mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::store::MAX_LOOKUP_KEYS;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store: default_store(),
            state_dir: default_state_dir(),
            report_dir: default_report_dir(),
            concurrency: default_concurrency(),
            lookup_batch_size: default_lookup_batch_size(),
            scheduling: SchedulingConfig::default(),
            retry: RetryConfig::default(),
            submitter: Submitter::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup_batch_size == 0 || self.lookup_batch_size > MAX_LOOKUP_KEYS {
            return Err(ConfigError::LookupBatchSize {
                got: self.lookup_batch_size,
                max: MAX_LOOKUP_KEYS,
            });
        }
        if self.scheduling.max_batches == 0 {
            return Err(ConfigError::Zero("scheduling.max_batches"));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Zero("concurrency"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Zero("retry.max_attempts"));
        }
        Ok(())
    }

    pub fn board_path(&self) -> std::path::PathBuf {
        self.state_dir.join("board.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = serde_yaml::from_str("store: data/hub.json\n").unwrap();
        assert_eq!(config.store, Path::new("data/hub.json"));
        assert_eq!(config.lookup_batch_size, 10);
        assert_eq!(config.scheduling.max_batches, 3);
        assert_eq!(config.scheduling.grouped_day, SessionDay::Tuesday);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_nested_sections() {
        let yaml = r#"
concurrency: 2
scheduling:
  grouped_day: thursday
  keyword_weight: 3
submitter:
  id: ops-7
  name: Thandi
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.scheduling.grouped_day, SessionDay::Thursday);
        assert_eq!(config.scheduling.keyword_weight, 3.0);
        assert_eq!(config.scheduling.max_batches, 3);
        assert_eq!(config.submitter.id, "ops-7");
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_validate_rejects_oversized_lookup() {
        let config = Config {
            lookup_batch_size: 25,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LookupBatchSize { got: 25, max: 10 })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            concurrency: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Zero("concurrency"))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_submitter_from_str() {
        let s: Submitter = "u-1:Lerato M".parse().unwrap();
        assert_eq!(s.id, "u-1");
        assert_eq!(s.name, "Lerato M");

        let bare: Submitter = "u-2".parse().unwrap();
        assert_eq!(bare.name, "u-2");

        assert!(":nobody".parse::<Submitter>().is_err());
    }
}
