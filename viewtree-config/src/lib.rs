//! Shared configuration loader for the viewtree tools.
//!
//! `defaults/viewtree.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ViewtreeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use viewtree_scanner::viewtree::scanning::ScannerConfig;

const DEFAULT_TOML: &str = include_str!("../defaults/viewtree.default.toml");

/// Top-level configuration consumed by viewtree applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewtreeConfig {
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
}

/// Controls how token streams are printed.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub skip_trivia: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One token per line with its byte range
    TokenSimple,
    TokenJson,
    TokenYaml,
    /// Scanner-produced kinds only, on one line
    Structure,
    /// The checkpoints and their snapshot bytes
    Snapshots,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::TokenSimple,
        OutputFormat::TokenJson,
        OutputFormat::TokenYaml,
        OutputFormat::Structure,
        OutputFormat::Snapshots,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::TokenSimple => "token-simple",
            OutputFormat::TokenJson => "token-json",
            OutputFormat::TokenYaml => "token-yaml",
            OutputFormat::Structure => "structure",
            OutputFormat::Snapshots => "snapshots",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == name)
            .ok_or_else(|| format!("unknown output format '{}'", name))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name of the per-project config looked up next to the documents being tokenized.
pub const LOCAL_CONFIG_FILE: &str = "viewtree.toml";

/// Layers project files, user files and command-line settings over the built-in defaults.
///
/// Later layers win: defaults, then [with_local_file](Loader::with_local_file), then explicit
/// files, then assignments and the output format.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer `viewtree.toml` from `dir` when it exists.
    pub fn with_local_file(self, dir: impl AsRef<Path>) -> Self {
        self.add_toml(dir.as_ref().join(LOCAL_CONFIG_FILE), false)
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_toml(path.as_ref(), true)
    }

    /// Layer a TOML file, skipped if absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_toml(path.as_ref(), false)
    }

    fn add_toml(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply a `key=value` assignment such as `scanner.same_level=true`.
    ///
    /// Whitespace around the key and the value is ignored; the value is typed when the
    /// configuration is deserialized.
    pub fn with_assignment(self, assignment: &str) -> Result<Self, ConfigError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            ConfigError::Message(format!("expected KEY=VALUE, got '{}'", assignment))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Message(format!(
                "missing key in '{}'",
                assignment
            )));
        }
        self.set_override(key, value.trim())
    }

    pub fn with_format(self, format: OutputFormat) -> Result<Self, ConfigError> {
        self.set_override("output.format", format.as_str())
    }

    pub fn build(self) -> Result<ViewtreeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in configuration with nothing layered on top.
pub fn load_defaults() -> Result<ViewtreeConfig, ConfigError> {
    Loader::new().build()
}
