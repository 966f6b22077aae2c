//! Lookup field configuration.
//!
//! [`LookupConfig`] is the flat set of options a [`LookupField`] renders
//! with. Hosts build it from their declared parameters on every render pass
//! ([`LookupConfig::from_parameters`]); standalone embedders can load it from
//! a TOML or JSON file instead. Every field has a default, so partial files
//! are fine:
//!
//! ```toml
//! filter_column = "name"
//! identifier_column = "accountid"
//! entity_set = "accounts"
//! filter_type = "and"
//! ```
//!
//! [`LookupField`]: crate::widget::LookupField

use std::path::{Path, PathBuf};

use account_lookup_core::Color;
use account_lookup_core::logging::targets;
use account_lookup_net::odata::JoinOperator;
use serde::{Deserialize, Serialize};

use crate::host::{Parameters, param};
use crate::widget::floating_panel::{DEFAULT_MAX_HEIGHT, DEFAULT_PANEL_WIDTH};

pub const DEFAULT_PLACEHOLDER: &str = "Column Value";
pub const DEFAULT_HEADER: &str = "Similar Items Already Exists!";
pub const DEFAULT_HEADER_FONT_COLOR: &str = "#de5246";
pub const DEFAULT_FILTER_TYPE: &str = "or";
pub const DEFAULT_DUPLICATE_MESSAGE: &str = "Similar Item Found!";
pub const DEFAULT_NO_MATCHES_MESSAGE: &str = "No Similar Items Found!";
pub const DEFAULT_PARTIAL_MATCH_MESSAGE: &str = "Some Similar Items Found!";

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or type error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format '{0}', expected .toml or .json")]
    UnsupportedFormat(String),
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Options for one render pass of the lookup field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Placeholder text shown in the empty input.
    pub placeholder: String,
    /// Header shown above the candidate list; hidden when empty.
    pub header: String,
    /// CSS color of the header text.
    pub header_font_color: String,
    /// Maximum panel height before it scrolls.
    pub max_height: f32,
    /// Panel width.
    pub width: f32,
    /// Logical name of the column searched and displayed.
    pub filter_column: String,
    /// Logical name of the column holding the record identifier.
    pub identifier_column: String,
    /// Text the input starts with when the field is created.
    pub user_input: String,
    /// Plural logical name of the table searched (the entity set).
    pub entity_set: String,
    /// `or` or `and`: how the per-term predicates are joined.
    pub filter_type: String,
    /// Status shown when the typed text matches an existing record.
    pub duplicate_message: String,
    /// Status shown when the search found nothing.
    pub no_matches_message: String,
    /// Status shown when the search found similar records.
    pub partial_match_message: String,
    /// Environment root for building a Web API client; empty when the host
    /// supplies the search client itself.
    pub environment_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            header: DEFAULT_HEADER.to_string(),
            header_font_color: DEFAULT_HEADER_FONT_COLOR.to_string(),
            max_height: DEFAULT_MAX_HEIGHT,
            width: DEFAULT_PANEL_WIDTH,
            filter_column: String::new(),
            identifier_column: String::new(),
            user_input: String::new(),
            entity_set: String::new(),
            filter_type: DEFAULT_FILTER_TYPE.to_string(),
            duplicate_message: DEFAULT_DUPLICATE_MESSAGE.to_string(),
            no_matches_message: DEFAULT_NO_MATCHES_MESSAGE.to_string(),
            partial_match_message: DEFAULT_PARTIAL_MATCH_MESSAGE.to_string(),
            environment_url: String::new(),
        }
    }
}

impl LookupConfig {
    /// Read every option from host parameters, falling back to the literal
    /// defaults for absent or blank values.
    ///
    /// `user_input` is taken verbatim from the host's `userInput`; the host
    /// adapter decides whether that seed is used. The panel height is not
    /// configurable and stays at [`DEFAULT_MAX_HEIGHT`].
    pub fn from_parameters(params: &Parameters) -> Self {
        if params.raw(param::MAX_DROPDOWN_HEIGHT).is_some() {
            tracing::trace!(
                target: targets::CONFIG,
                "ignoring maxDropdownHeight; panel height is fixed"
            );
        }

        Self {
            placeholder: params.text_or(param::PLACEHOLDER, DEFAULT_PLACEHOLDER),
            header: params.text_or(param::HEADER, DEFAULT_HEADER),
            header_font_color: params.text_or(param::HEADER_FONT_COLOR, DEFAULT_HEADER_FONT_COLOR),
            max_height: DEFAULT_MAX_HEIGHT,
            width: DEFAULT_PANEL_WIDTH,
            filter_column: params.text_or(param::FILTER_COLUMN, ""),
            identifier_column: params.text_or(param::IDENTIFIER_COLUMN, ""),
            user_input: params.text_or(param::USER_INPUT, ""),
            entity_set: params.text_or(param::ENTITY_SET, ""),
            filter_type: params.text_or(param::FILTER_TYPE, DEFAULT_FILTER_TYPE),
            duplicate_message: params.text_or(param::DUPLICATE_MESSAGE, DEFAULT_DUPLICATE_MESSAGE),
            no_matches_message: params
                .text_or(param::NO_MATCHES_MESSAGE, DEFAULT_NO_MATCHES_MESSAGE),
            partial_match_message: params
                .text_or(param::PARTIAL_MATCH_MESSAGE, DEFAULT_PARTIAL_MATCH_MESSAGE),
            environment_url: params.text_or(param::ENVIRONMENT_URL, ""),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&contents)?,
            "json" => Self::from_json_str(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded lookup config");
        Ok(config)
    }

    /// The configured join operator.
    ///
    /// Anything other than `and`/`or` falls back to `or`.
    pub fn join_operator(&self) -> JoinOperator {
        match self.filter_type.parse() {
            Ok(operator) => operator,
            Err(err) => {
                tracing::warn!(target: targets::CONFIG, %err, "falling back to 'or'");
                JoinOperator::Or
            }
        }
    }

    /// The header color, or the default header color when unparseable.
    pub fn header_color(&self) -> Color {
        Color::from_css(&self.header_font_color)
            .or_else(|| Color::from_hex(DEFAULT_HEADER_FONT_COLOR))
            .unwrap_or(Color::RED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_parameters() {
        let config = LookupConfig::from_parameters(&Parameters::new());
        assert_eq!(config, LookupConfig::default());
        assert_eq!(config.placeholder, "Column Value");
        assert_eq!(config.header, "Similar Items Already Exists!");
        assert_eq!(config.max_height, 300.0);
        assert_eq!(config.join_operator(), JoinOperator::Or);
    }

    #[test]
    fn test_from_parameters() {
        let params = Parameters::new()
            .with(param::FILTER_COLUMN, "name")
            .with(param::IDENTIFIER_COLUMN, "accountid")
            .with(param::ENTITY_SET, "accounts")
            .with(param::FILTER_TYPE, "and")
            .with(param::DUPLICATE_MESSAGE, "")
            .with(param::MAX_DROPDOWN_HEIGHT, "900px");

        let config = LookupConfig::from_parameters(&params);
        assert_eq!(config.filter_column, "name");
        assert_eq!(config.identifier_column, "accountid");
        assert_eq!(config.entity_set, "accounts");
        assert_eq!(config.join_operator(), JoinOperator::And);
        assert_eq!(config.duplicate_message, DEFAULT_DUPLICATE_MESSAGE);
        assert_eq!(config.max_height, DEFAULT_MAX_HEIGHT);
    }

    #[test]
    fn test_unknown_join_operator_falls_back() {
        let config = LookupConfig {
            filter_type: "nand".to_string(),
            ..Default::default()
        };
        assert_eq!(config.join_operator(), JoinOperator::Or);
    }

    #[test]
    fn test_header_color_fallback() {
        let config = LookupConfig {
            header_font_color: "not-a-color".to_string(),
            ..Default::default()
        };
        assert_eq!(config.header_color().to_hex(), "#de5246");

        let config = LookupConfig {
            header_font_color: "orange".to_string(),
            ..Default::default()
        };
        assert_eq!(config.header_color(), Color::ORANGE);
    }

    #[test]
    fn test_header_color_accepts_css_values() {
        for (css, expected) in [
            ("blue", "#0000ff"),
            ("gray", "#808080"),
            ("#f00", "#ff0000"),
            ("rgb(0, 0, 255)", "#0000ff"),
            ("rgba(222, 82, 70, 0.5)", "#de524680"),
        ] {
            let config = LookupConfig {
                header_font_color: css.to_string(),
                ..Default::default()
            };
            assert_eq!(config.header_color().to_hex(), expected, "{css}");
        }
    }

    #[test]
    fn test_partial_toml() {
        let config = LookupConfig::from_toml_str(
            r#"
            filter_column = "fullname"
            entity_set = "contacts"
            "#,
        )
        .unwrap();
        assert_eq!(config.filter_column, "fullname");
        assert_eq!(config.entity_set, "contacts");
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_invalid_json() {
        let err = LookupConfig::from_json_str("{\"max_height\": \"tall\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("lookup.toml");
        std::fs::write(&toml_path, "filter_type = \"and\"\n").unwrap();
        let config = LookupConfig::load(&toml_path).unwrap();
        assert_eq!(config.join_operator(), JoinOperator::And);

        let json_path = dir.path().join("lookup.json");
        std::fs::write(&json_path, r#"{"identifier_column": "contactid"}"#).unwrap();
        let config = LookupConfig::load(&json_path).unwrap();
        assert_eq!(config.identifier_column, "contactid");

        let yaml_path = dir.path().join("lookup.yaml");
        std::fs::write(&yaml_path, "x: 1").unwrap();
        assert!(matches!(
            LookupConfig::load(&yaml_path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));

        assert!(matches!(
            LookupConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
