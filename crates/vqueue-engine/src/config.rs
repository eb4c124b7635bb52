//! Engine configuration
//!
//! Read from a TOML file; every field is optional.
//!
//! ```toml
//! strategy = "disk"
//! snapshot_dir = "/var/tmp/vqueue"
//! log_profile = "production"
//! output = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use vqueue_core::logging_facility::Profile;
use vqueue_core::{DiskSnapshot, MemorySnapshot, Replay, Result, Strategy, StrategyKind, VqError};
use vqueue_store::FsTableStore;

use crate::sink::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    /// Directory for the disk strategy's table; a fresh temporary
    /// directory is used when unset
    pub snapshot_dir: Option<PathBuf>,
    pub log_profile: Profile,
    pub output: OutputFormat,
}

fn config_error(message: impl Into<String>) -> VqError {
    VqError::Config {
        message: message.into(),
    }
}

impl EngineConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `Config` if the document is not valid TOML or names an unknown
    /// strategy, profile, output format or field.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(e.to_string()))
    }

    /// Load a TOML file
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Build the configured reconstruction strategy
    ///
    /// # Errors
    ///
    /// `StorageIo` if the disk strategy cannot prepare its table file.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>> {
        let strategy: Box<dyn Strategy> = match self.strategy {
            StrategyKind::Replay => Box::new(Replay::new()),
            StrategyKind::Memory => Box::new(MemorySnapshot::new()),
            StrategyKind::Disk => {
                let store = match &self.snapshot_dir {
                    Some(dir) => FsTableStore::new(dir.clone())?,
                    None => FsTableStore::temporary()?,
                };
                tracing::debug!(store = %store.root().display(), "Disk snapshot store ready");
                Box::new(DiskSnapshot::new(Box::new(store))?)
            }
        };
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.strategy, StrategyKind::Replay);
        assert_eq!(config.output, OutputFormat::List);
    }

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            strategy = "disk"
            snapshot_dir = "/tmp/vq"
            log_profile = "production"
            output = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.strategy, StrategyKind::Disk);
        assert_eq!(config.snapshot_dir, Some(PathBuf::from("/tmp/vq")));
        assert_eq!(config.log_profile, Profile::Production);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_strategy_is_config_error() {
        let err = EngineConfig::from_toml_str(r#"strategy = "cloud""#).unwrap_err();
        assert!(matches!(err, VqError::Config { .. }));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let err = EngineConfig::from_toml_str("threads = 4").unwrap_err();
        assert!(matches!(err, VqError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, VqError::Config { .. }));
    }

    #[test]
    fn test_build_each_strategy() {
        let dir = tempfile::tempdir().unwrap();
        for kind in [StrategyKind::Replay, StrategyKind::Memory, StrategyKind::Disk] {
            let config = EngineConfig {
                strategy: kind,
                snapshot_dir: Some(dir.path().to_path_buf()),
                ..EngineConfig::default()
            };
            assert_eq!(config.build_strategy().unwrap().kind(), kind);
        }
    }
}
