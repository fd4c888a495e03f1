use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "opslens.toml";

const MAX_UPLOAD_MB_RANGE: core::ops::RangeInclusive<u64> = 1..=1024;
const ROLLING_DAYS_RANGE: core::ops::RangeInclusive<u32> = 1..=365;
const LIST_LIMIT_RANGE: core::ops::RangeInclusive<usize> = 1..=200;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Largest archive accepted for ingestion, in MiB
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,

    /// Days covered by a rolling series when none is requested
    #[serde(default = "default_rolling_days")]
    pub default_rolling_days: u32,

    /// Runs listed when no limit is requested
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

const fn default_max_upload_mb() -> u64 {
    20
}

const fn default_rolling_days() -> u32 {
    30
}

const fn default_list_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit path must exist. Without one, `opslens.toml` in `base_dir`
    /// is used when present, and the embedded defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading opslens configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading opslens configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Largest accepted archive size in bytes.
    #[must_use]
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    pub fn validate(&self) -> Result<()> {
        if !MAX_UPLOAD_MB_RANGE.contains(&self.max_upload_mb) {
            return Err(app_err!("max_upload_mb must be between 1 and 1024, got {}", self.max_upload_mb));
        }

        if !ROLLING_DAYS_RANGE.contains(&self.default_rolling_days) {
            return Err(app_err!(
                "default_rolling_days must be between 1 and 365, got {}",
                self.default_rolling_days
            ));
        }

        if !LIST_LIMIT_RANGE.contains(&self.list_limit) {
            return Err(app_err!("list_limit must be between 1 and 200, got {}", self.list_limit));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.max_upload_mb, 20);
        assert_eq!(config.default_rolling_days, 30);
        assert_eq!(config.list_limit, 50);
    }

    #[test]
    fn test_max_upload_bytes() {
        assert_eq!(Config::default().max_upload_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    fn test_validate_max_upload_out_of_range() {
        let config = Config { max_upload_mb: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { max_upload_mb: 1025, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_rolling_days_out_of_range() {
        let config = Config { default_rolling_days: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { default_rolling_days: 366, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_list_limit_out_of_range() {
        let config = Config { list_limit: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { list_limit: 201, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_boundary_values() {
        let config = Config {
            max_upload_mb: 1024,
            default_rolling_days: 365,
            list_limit: 200,
        };
        config.validate().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = utf8_dir(&tmp).join("custom.toml");
        Config::save_default(&output_path).unwrap();
        let loaded = Config::load(&utf8_dir(&tmp), Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(&utf8_dir(&tmp), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "list_limit = 7\n").unwrap();
        let config = Config::load(&utf8_dir(&tmp), None).unwrap();
        assert_eq!(config.list_limit, 7);
        assert_eq!(config.max_upload_mb, 20);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("bad.toml");
        fs::write(&path, "db_path = \"opslens.db\"\n").unwrap();
        let _ = Config::load(&utf8_dir(&tmp), Some(&path)).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("bad.toml");
        fs::write(&path, "max_upload_mb = 0\n").unwrap();
        let _ = Config::load(&utf8_dir(&tmp), Some(&path)).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_explicit_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = utf8_dir(&tmp).join("absent.toml");
        let _ = Config::load(&utf8_dir(&tmp), Some(&path)).unwrap_err();
    }
}
