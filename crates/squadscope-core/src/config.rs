// Configuration loading and parsing (config/squadscope.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::AnalysisSettings;
use crate::prospects::ProspectQuery;

pub const CONFIG_FILE_NAME: &str = "squadscope.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// squadscope.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub prospects: ProspectsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the players CSV, relative to the working directory.
    pub players_csv: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub reference_league: String,
    pub veteran_age_threshold: f64,
    pub expiring_contract_year: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let defaults = AnalysisSettings::default();
        AnalysisConfig {
            reference_league: defaults.reference_league,
            veteran_age_threshold: defaults.veteran_age_threshold,
            expiring_contract_year: defaults.expiring_contract_year,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProspectsConfig {
    pub max_age: f64,
    pub limit: usize,
}

impl Default for ProspectsConfig {
    fn default() -> Self {
        let q = ProspectQuery::default();
        ProspectsConfig {
            max_age: q.max_age,
            limit: q.limit,
        }
    }
}

impl Config {
    /// The pipeline settings described by this config.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            reference_league: self.analysis.reference_league.clone(),
            veteran_age_threshold: self.analysis.veteran_age_threshold,
            expiring_contract_year: self.analysis.expiring_contract_year.clone(),
            prospects: ProspectQuery {
                max_age: self.prospects.max_age,
                limit: self.prospects.limit,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/squadscope.toml` under `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;
    Ok(config)
}

/// Copy `defaults/squadscope.toml` to `config/` if the latter is missing.
///
/// Returns the path written, or `None` when nothing needed copying. An
/// existing config file is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE_NAME);

    if target.exists() {
        return Ok(None);
    }
    if !default_path.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                default_path.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default_path.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory,
/// copying the default file first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.players_csv.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.players_csv".into(),
            message: "must not be empty".into(),
        });
    }

    if config.analysis.reference_league.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "analysis.reference_league".into(),
            message: "must not be empty".into(),
        });
    }

    let threshold = config.analysis.veteran_age_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "analysis.veteran_age_threshold".into(),
            message: format!("must be a non-negative number, got {threshold}"),
        });
    }

    let year = &config.analysis.expiring_contract_year;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::ValidationError {
            field: "analysis.expiring_contract_year".into(),
            message: format!("must be a four-digit year, got `{year}`"),
        });
    }

    let max_age = config.prospects.max_age;
    if !max_age.is_finite() || max_age < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "prospects.max_age".into(),
            message: format!("must be a non-negative number, got {max_age}"),
        });
    }

    if config.prospects.limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "prospects.limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh temp dir with `config/squadscope.toml` holding `contents`.
    fn write_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config").join(CONFIG_FILE_NAME), contents).unwrap();
        tmp
    }

    fn default_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE_NAME)).unwrap()
    }

    #[test]
    fn load_default_config_file() {
        let tmp = write_config("squadscope_config_defaults", &default_text());
        let config = load_config_from(&tmp).expect("default config should load");

        assert_eq!(config.data.players_csv, "data/players.csv");
        assert_eq!(config.analysis.reference_league, "PKO BP Ekstraklasa");
        assert!((config.analysis.veteran_age_threshold - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.analysis.expiring_contract_year, "2025");
        assert!((config.prospects.max_age - 21.0).abs() < f64::EPSILON);
        assert_eq!(config.prospects.limit, 10);
        assert_eq!(config.analysis_settings(), AnalysisSettings::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_sections_use_defaults() {
        let tmp = write_config(
            "squadscope_config_minimal",
            "[data]\nplayers_csv = \"players.csv\"\n",
        );
        let config = load_config_from(&tmp).expect("minimal config should load");
        assert_eq!(config.analysis.reference_league, "PKO BP Ekstraklasa");
        assert_eq!(config.prospects.limit, 10);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tmp = write_config(
            "squadscope_config_partial",
            "[data]\nplayers_csv = \"players.csv\"\n\n[prospects]\nlimit = 5\n",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.prospects.limit, 5);
        assert!((config.prospects.max_age - 21.0).abs() < f64::EPSILON);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_limit() {
        let text = default_text().replace("limit = 10", "limit = 0");
        let tmp = write_config("squadscope_config_zero_limit", &text);
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "prospects.limit"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_bad_contract_year() {
        let text = default_text().replace(
            "expiring_contract_year = \"2025\"",
            "expiring_contract_year = \"25\"",
        );
        let tmp = write_config("squadscope_config_bad_year", &text);
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "analysis.expiring_contract_year")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_reference_league() {
        let text = default_text().replace(
            "reference_league = \"PKO BP Ekstraklasa\"",
            "reference_league = \"\"",
        );
        let tmp = write_config("squadscope_config_empty_league", &text);
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "analysis.reference_league")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_data_section_is_parse_error() {
        let tmp = write_config("squadscope_config_no_data", "[prospects]\nlimit = 3\n");
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with(CONFIG_FILE_NAME)),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let tmp = write_config("squadscope_config_invalid", "this is not valid [[[ toml");
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found() {
        let tmp = std::env::temp_dir().join("squadscope_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with(CONFIG_FILE_NAME)),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_then_skips() {
        let tmp = std::env::temp_dir().join("squadscope_config_ensure");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE_NAME), default_text()).unwrap();

        let copied = ensure_config_file(&tmp).expect("should copy");
        assert!(copied.is_some_and(|p| p.ends_with(CONFIG_FILE_NAME)));
        assert!(tmp.join("config").join(CONFIG_FILE_NAME).exists());

        // Custom content must survive a second call.
        fs::write(tmp.join("config").join(CONFIG_FILE_NAME), "# custom\n").unwrap();
        assert!(ensure_config_file(&tmp).unwrap().is_none());
        let content = fs::read_to_string(tmp.join("config").join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_errors_without_defaults() {
        let tmp = std::env::temp_dir().join("squadscope_config_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        assert!(matches!(
            ensure_config_file(&tmp).unwrap_err(),
            ConfigError::DefaultsCopyError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }
}
