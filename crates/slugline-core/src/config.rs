use std::collections::HashMap;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{SlugError, SlugResult};
use crate::options::SlugConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: Option<DatabaseConfig>,
    pub logging: LoggingConfig,
    /// Slug configuration per model, keyed by model name.
    #[serde(default)]
    pub models: HashMap<String, SlugConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u8,
}

const fn default_max_connections() -> u8 {
    4
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads `config.toml` and `SLUGLINE_*` environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values; nested keys
    /// are separated by `__`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults(Config::builder())?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// `SLUGLINE_` variables with `__` between nesting levels, so
    /// `SLUGLINE_DATABASE__MAX_CONNECTIONS` sets `database.max_connections`.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("SLUGLINE")
            .prefix_separator("_")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }

    /// ## Summary
    /// Builds a `Settings` from TOML text, applying the same defaults as [`Settings::load`].
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or does not match `Settings`.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::defaults(Config::builder())?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(builder.set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Returns the validated slug configuration for `model`.
    ///
    /// ## Errors
    /// Returns [`SlugError::Configuration`] if the
    /// model is not configured or its configuration is invalid.
    pub fn model(&self, model: &str) -> SlugResult<SlugConfig> {
        let config = self.models.get(model).cloned().ok_or_else(|| {
            SlugError::Configuration(format!(
                "no slug configuration for model '{model}'"
            ))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[logging]
level = "debug"

[models.category]
source = ["name"]

[models.author]
source_fields = ["first_name", "last_name"]
suffix_fields = ["city"]
overwrite = false
column = "handle"
max_attempts = 50

[models.author.transform]
lower = false
replacement = "_"
remove = "[.]"
charmap = { "ø" = "oe" }
"#;

    #[test]
    fn parses_model_configuration() {
        let settings = Settings::from_toml_str(SAMPLE).expect("settings parse");

        assert_eq!(settings.logging.level, "debug");
        assert!(settings.database.is_none());

        let category = settings.model("category").expect("category configured");
        assert_eq!(category.source_fields, vec!["name".to_owned()]);
        assert!(category.overwrite);
        assert_eq!(category.column, "slug");
        assert!(category.transform.lower);

        let author = settings.model("author").expect("author configured");
        assert_eq!(author.suffix_fields, vec!["city".to_owned()]);
        assert!(!author.overwrite);
        assert_eq!(author.column, "handle");
        assert_eq!(author.max_attempts, 50);
        assert!(!author.transform.lower);
        assert_eq!(author.transform.replacement, "_");
        assert_eq!(author.transform.remove.as_deref(), Some("[.]"));
        assert_eq!(
            author.transform.charmap.get("ø").map(String::as_str),
            Some("oe")
        );
    }

    #[test]
    fn applies_defaults() {
        let settings = Settings::from_toml_str(
            r#"
[database]
url = "postgres://localhost/slugline"
"#,
        )
        .expect("settings parse");

        assert_eq!(settings.logging.level, "info");
        let database = settings.database.expect("database configured");
        assert_eq!(database.max_connections, 4);
        assert!(settings.models.is_empty());
    }

    #[test]
    fn environment_sets_multi_word_keys() {
        let vars: HashMap<String, String> = [
            ("SLUGLINE_DATABASE__URL", "postgres://localhost/slugline"),
            ("SLUGLINE_DATABASE__MAX_CONNECTIONS", "12"),
            ("SLUGLINE_LOGGING__LEVEL", "trace"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect();

        let settings = Settings::defaults(Config::builder())
            .expect("defaults")
            .add_source(Settings::environment().source(Some(vars)))
            .build()
            .expect("config builds")
            .try_deserialize::<Settings>()
            .expect("settings deserialize");

        let database = settings.database.expect("database configured");
        assert_eq!(database.url, "postgres://localhost/slugline");
        assert_eq!(database.max_connections, 12);
        assert_eq!(settings.logging.level, "trace");
    }

    #[test]
    fn unknown_model_is_configuration_error() {
        let settings = Settings::from_toml_str(SAMPLE).expect("settings parse");
        let err = settings.model("tag").expect_err("tag not configured");
        assert!(matches!(err, SlugError::Configuration(_)));
    }

    #[test]
    fn blank_source_is_configuration_error() {
        let settings = Settings::from_toml_str(
            r#"
[models.tag]
source = ["name", " "]
"#,
        )
        .expect("settings parse");
        let err = settings.model("tag").expect_err("blank source field");
        assert!(matches!(err, SlugError::Configuration(_)));
    }
}
