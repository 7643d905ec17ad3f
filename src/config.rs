use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContactError, ContactResult};
use crate::vcard::DecodeOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub codec: DecodeOptions,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".data").join("contacts.db"),
        }
    }
}

/// What an import does with cards that fail to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Nothing is imported if any card is malformed.
    #[default]
    RejectAll,
    /// Good cards are imported, bad ones are reported back.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub on_malformed: MalformedPolicy,
    /// Attempts at committing an import before giving up on concurrent writers.
    pub max_attempts: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::RejectAll,
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the TOML file at `path`, or returns defaults when there is none.
    pub fn load(path: Option<&Path>) -> ContactResult<Self> {
        match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> ContactResult<Self> {
        let config: Self = toml::from_str(text)?;
        if config.import.max_attempts == 0 {
            return Err(ContactError::Other(
                "import.max_attempts must be at least 1".into(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcard::UnmappedTagPolicy;
    use std::io::Write;

    #[test]
    fn defaults_are_strict_imports_and_lenient_tags() {
        let config = AppConfig::default();
        assert_eq!(config.codec.unmapped_tag, UnmappedTagPolicy::Drop);
        assert_eq!(config.import.on_malformed, MalformedPolicy::RejectAll);
        assert_eq!(config.import.max_attempts, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = AppConfig::from_toml(
            r#"
            [codec]
            unmapped_tag = "reject"

            [import]
            on_malformed = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(config.codec.unmapped_tag, UnmappedTagPolicy::Reject);
        assert_eq!(config.import.on_malformed, MalformedPolicy::Skip);
        assert_eq!(config.import.max_attempts, 3);
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = AppConfig::from_toml("[codec]\nunmapped_tag = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ContactError::Config(_)));
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(AppConfig::from_toml("[import]\nmax_attempts = 0\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"/tmp/x.db\"\n[logging]\nlevel = \"debug\"").unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
