//! Configuration primitives and loader for doc-outline.
//!
//! Settings resolve through a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Each layer is parsed from TOML into a partial view, merged field by field,
//! and validated once into typed settings.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".doc-outline.toml";

const DEFAULT_PAGE_TITLE: &str = "Documentation";
const DEFAULT_CODE_LABEL: &str = "Code Snippet";
const DEFAULT_INDENT: u8 = 2;
const MAX_INDENT: u8 = 8;

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub page: PageSettings,
    pub render: RenderSettings,
    pub sources: ConfigSources,
}

/// Page metadata shown alongside the rendered sections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSettings {
    pub title: String,
    pub author: Option<String>,
    pub updated_at: Option<String>,
}

/// Settings that control how sections and outlines are rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub format: OutputFormat,
    /// Spaces per outline depth in plain and markdown output.
    pub indent: u8,
    pub code_label: String,
    /// Add a `generated_at` timestamp to JSON page output.
    pub timestamp: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            format: OutputFormat::Plain,
            indent: DEFAULT_INDENT,
            code_label: DEFAULT_CODE_LABEL.to_string(),
            timestamp: false,
        }
    }
}

/// Supported output encodings.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    Plain,
    Markdown,
    Json,
    Html,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] = &[
        OutputFormat::Plain,
        OutputFormat::Markdown,
        OutputFormat::Json,
        OutputFormat::Html,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }

    /// File extension used when rendering to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Plain => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "plain" => Ok(OutputFormat::Plain),
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            _ => Err(()),
        }
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut merged = PartialConfig::default();
        let mut source_layers = vec![ConfigSource::builtin()];

        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        tracing::debug!(
            layers = source_layers.len(),
            format = %resolved.render.format,
            "configuration resolved"
        );

        Ok(Config {
            page: resolved.page,
            render: resolved.render,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Built-in settings without touching the filesystem.
    pub fn defaults() -> Self {
        let resolved = ResolvedConfig::defaults();
        Config {
            page: resolved.page,
            render: resolved.render,
            sources: ConfigSources {
                working_directory: PathBuf::from("."),
                layers: vec![ConfigSource::builtin()],
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::defaults()
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    tracing::debug!(path = %path.display(), kind = %source.kind, "loading config layer");
    parse_layer(&contents, source).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<PartialConfig, toml::de::Error> {
    let raw: RawConfig = toml::from_str(contents)?;
    Ok(raw.into_partial(source))
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    page: PagePartial,
    render: RenderPartial,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        self.page.merge(other.page);
        self.render.merge(other.render);
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();
        let defaults = ResolvedConfig::defaults();

        let page = PageSettings {
            title: self
                .page
                .title
                .map(|title| title.value)
                .unwrap_or(defaults.page.title),
            author: self.page.author.map(|author| author.value),
            updated_at: self.page.updated_at.map(|updated| updated.value),
        };

        let format = match self.render.format {
            Some(located) => match located.value.parse::<OutputFormat>() {
                Ok(format) => format,
                Err(()) => {
                    let expected: Vec<&str> =
                        OutputFormat::ALL.iter().map(|format| format.as_str()).collect();
                    errors.push(
                        ConfigValidationError::new(
                            Some(located.source),
                            format!(
                                "unknown format '{}' (expected one of: {})",
                                located.value,
                                expected.join(", ")
                            ),
                        )
                        .with_context("render.format"),
                    );
                    defaults.render.format
                }
            },
            None => defaults.render.format,
        };

        let indent = match self.render.indent {
            Some(located) if !(1..=i64::from(MAX_INDENT)).contains(&located.value) => {
                errors.push(
                    ConfigValidationError::new(
                        Some(located.source),
                        format!(
                            "must be between 1 and {MAX_INDENT} (received {})",
                            located.value
                        ),
                    )
                    .with_context("render.indent"),
                );
                defaults.render.indent
            }
            Some(located) => located.value as u8,
            None => defaults.render.indent,
        };

        let code_label = self
            .render
            .code_label
            .map(|label| label.value)
            .unwrap_or(defaults.render.code_label);
        let timestamp = self
            .render
            .timestamp
            .map(|timestamp| timestamp.value)
            .unwrap_or(defaults.render.timestamp);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            page,
            render: RenderSettings {
                format,
                indent,
                code_label,
                timestamp,
            },
        })
    }
}

#[derive(Clone, Debug, Default)]
struct PagePartial {
    title: Option<Located<String>>,
    author: Option<Located<String>>,
    updated_at: Option<Located<String>>,
}

impl PagePartial {
    fn merge(&mut self, other: PagePartial) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.updated_at.is_some() {
            self.updated_at = other.updated_at;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct RenderPartial {
    format: Option<Located<String>>,
    indent: Option<Located<i64>>,
    code_label: Option<Located<String>>,
    timestamp: Option<Located<bool>>,
}

impl RenderPartial {
    fn merge(&mut self, other: RenderPartial) {
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.indent.is_some() {
            self.indent = other.indent;
        }
        if other.code_label.is_some() {
            self.code_label = other.code_label;
        }
        if other.timestamp.is_some() {
            self.timestamp = other.timestamp;
        }
    }
}

struct ResolvedConfig {
    page: PageSettings,
    render: RenderSettings,
}

impl ResolvedConfig {
    fn defaults() -> Self {
        ResolvedConfig {
            page: PageSettings {
                title: DEFAULT_PAGE_TITLE.to_string(),
                author: None,
                updated_at: None,
            },
            render: RenderSettings::default(),
        }
    }
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    page: Option<RawPage>,
    #[serde(default)]
    render: Option<RawRender>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            page: self
                .page
                .map(|page| page.into_partial(source.clone()))
                .unwrap_or_default(),
            render: self
                .render
                .map(|render| render.into_partial(source))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPage {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl RawPage {
    fn into_partial(self, source: ConfigSource) -> PagePartial {
        PagePartial {
            title: self.title.map(|value| Located::new(value, source.clone())),
            author: self.author.map(|value| Located::new(value, source.clone())),
            updated_at: self.updated_at.map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRender {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    indent: Option<i64>,
    #[serde(default)]
    code_label: Option<String>,
    #[serde(default)]
    timestamp: Option<bool>,
}

impl RawRender {
    fn into_partial(self, source: ConfigSource) -> RenderPartial {
        RenderPartial {
            format: self.format.map(|value| Located::new(value, source.clone())),
            indent: self.indent.map(|value| Located::new(value, source.clone())),
            code_label: self
                .code_label
                .map(|value| Located::new(value, source.clone())),
            timestamp: self.timestamp.map(|value| Located::new(value, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local() -> ConfigSource {
        ConfigSource::for_file(ConfigSourceKind::Local, PathBuf::from("/tmp/.doc-outline.toml"))
    }

    #[test]
    fn later_layers_override_earlier_fields() {
        let mut merged = parse_layer("[render]\nformat = \"json\"\nindent = 4\n", local()).unwrap();
        merged.merge(parse_layer("[render]\nindent = 3\n", local()).unwrap());
        let resolved = merged.finalize().unwrap();
        assert_eq!(resolved.render.format, OutputFormat::Json);
        assert_eq!(resolved.render.indent, 3);
    }

    #[test]
    fn collects_every_validation_failure() {
        let partial = parse_layer("[render]\nformat = \"pdf\"\nindent = 0\n", local()).unwrap();
        let errors = partial.finalize().err().unwrap();
        assert_eq!(errors.0.len(), 2);
        let rendered = errors.to_string();
        assert!(rendered.contains("render.format: unknown format 'pdf'"));
        assert!(rendered.contains("render.indent: must be between 1 and 8"));
        assert!(rendered.contains("local config at /tmp/.doc-outline.toml"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_layer("[render]\ncolour = true\n", local()).is_err());
        assert!(parse_layer("[sidebar]\nopen = true\n", local()).is_err());
    }

    #[test]
    fn output_format_round_trips_through_str() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>(), Ok(*format));
        }
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
