//! Configuration management for mdnorm.
//!
//! Parses `mdnorm.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [format]
//! line_width = 80
//! list_indent = "  "
//! bullet = "*"
//! hr_char = "_"
//! hr_length = 10
//! heading_style = "setext"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mdnorm_fmt::{Bullet, DEFAULT_LINE_WIDTH, FormatOptions, HeadingStyle, RuleChar};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override wrap column.
    pub line_width: Option<i32>,
    /// Override nested list indent.
    pub list_indent: Option<String>,
    /// Override unordered list bullet.
    pub bullet: Option<String>,
    /// Override horizontal rule character.
    pub hr_char: Option<String>,
    /// Override horizontal rule length.
    pub hr_length: Option<usize>,
    /// Override heading style.
    pub heading_style: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdnorm.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Formatter configuration.
    pub format: FormatConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Formatter configuration, as written in the `[format]` section.
///
/// Values are kept as written and checked by [`Config::validate`].
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Wrap column. Values `<= 1` disable wrapping.
    pub line_width: i32,
    /// Extra indent of a nested list, in spaces.
    pub list_indent: String,
    /// Unordered list bullet: `-`, `+` or `*`.
    pub bullet: String,
    /// Horizontal rule character: `-`, `*` or `_`.
    pub hr_char: String,
    /// Horizontal rule length, at least 3.
    pub hr_length: usize,
    /// `atx` or `setext`.
    pub heading_style: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        let defaults = FormatOptions::default();
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            list_indent: defaults.list_indent().to_owned(),
            bullet: defaults.bullet.as_char().to_string(),
            hr_char: defaults.hr_char.as_char().to_string(),
            hr_length: defaults.hr_length(),
            heading_style: defaults.heading_style.to_string(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Attach the config field name to an option error.
fn field_error(field: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Validation(format!("{field}: {err}"))
}

/// Parse a string field into its option type.
fn parse_field<T>(value: &str, field: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| field_error(field, err))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdnorm.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let format = &mut self.format;
        if let Some(line_width) = settings.line_width {
            format.line_width = line_width;
        }
        if let Some(list_indent) = &settings.list_indent {
            format.list_indent.clone_from(list_indent);
        }
        if let Some(bullet) = &settings.bullet {
            format.bullet.clone_from(bullet);
        }
        if let Some(hr_char) = &settings.hr_char {
            format.hr_char.clone_from(hr_char);
        }
        if let Some(hr_length) = settings.hr_length {
            format.hr_length = hr_length;
        }
        if let Some(heading_style) = &settings.heading_style {
            format.heading_style.clone_from(heading_style);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_format()
    }

    /// Validate formatter configuration.
    fn validate_format(&self) -> Result<(), ConfigError> {
        self.format_options().map(drop)
    }

    /// Formatter options described by the `[format]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any `format.*` value is invalid.
    pub fn format_options(&self) -> Result<FormatOptions, ConfigError> {
        let format = &self.format;
        let mut options = FormatOptions::default();
        options.line_width = format.line_width;
        options
            .set_list_indent(&format.list_indent)
            .map_err(|err| field_error("format.list_indent", err))?;
        options.bullet = parse_field::<Bullet>(&format.bullet, "format.bullet")?;
        options.hr_char = parse_field::<RuleChar>(&format.hr_char, "format.hr_char")?;
        options
            .set_hr_length(format.hr_length)
            .map_err(|err| field_error("format.hr_length", err))?;
        options.heading_style =
            parse_field::<HeadingStyle>(&format.heading_style, "format.heading_style")?;
        Ok(options)
    }
}
