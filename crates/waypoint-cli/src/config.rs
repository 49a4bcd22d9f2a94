//! Configuration file management for waypoint.
//!
//! Provides a TOML-based config file at `~/.config/waypoint/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use waypoint_core::Taxonomy;

pub const ENV_FORMAT: &str = "WAYPOINT_FORMAT";
pub const ENV_OUTPUT_DIR: &str = "WAYPOINT_OUTPUT_DIR";
pub const ENV_PACING_MS: &str = "WAYPOINT_PACING_MS";
pub const ENV_TAXONOMY: &str = "WAYPOINT_TAXONOMY";

// -----------------------------------------------------------------------
// Output format
// -----------------------------------------------------------------------

/// How a generated protocol is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The assembled markdown document only.
    #[default]
    Markdown,
    /// The whole structured protocol as pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(OutputFormatParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OutputFormat`] string.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid output format: {:?} (expected markdown or json)", self.0)
    }
}

impl std::error::Error for OutputFormatParseError {}

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub generation: GenerationSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// `markdown` or `json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Directory that `generate` writes into when `--output` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationSection {
    /// Delay before generating, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pacing_ms: Option<u64>,
    /// Path to a custom taxonomy TOML file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the waypoint config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/waypoint` or `~/.config/waypoint`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("waypoint");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("waypoint")
}

/// Return the path to the waypoint config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns `Ok(None)` if it does not exist.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub format: Option<OutputFormat>,
    pub output_dir: Option<&'a str>,
    pub pacing_ms: Option<u64>,
    pub taxonomy: Option<&'a str>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct WaypointConfig {
    pub format: OutputFormat,
    pub output_dir: Option<PathBuf>,
    pub pacing: Duration,
    pub taxonomy_path: Option<PathBuf>,
}

impl WaypointConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Format: `--format` > `WAYPOINT_FORMAT` > `output.format` > markdown
    /// - Output dir: `--output-dir` > `WAYPOINT_OUTPUT_DIR` > `output.directory` > none (stdout)
    /// - Pacing: `--pace-ms` > `WAYPOINT_PACING_MS` > `generation.pacing_ms` > 0
    /// - Taxonomy: `--taxonomy` > `WAYPOINT_TAXONOMY` > `generation.taxonomy` > built-in
    pub fn resolve(cli: &CliOverrides<'_>) -> Result<Self> {
        let file_config = load_config()?.unwrap_or_default();

        let format = match cli.format {
            Some(f) => f,
            None => match env_var(ENV_FORMAT).or(file_config.output.format) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid output format {raw:?}"))?,
                None => OutputFormat::default(),
            },
        };

        let output_dir = cli
            .output_dir
            .map(str::to_string)
            .or_else(|| env_var(ENV_OUTPUT_DIR))
            .or(file_config.output.directory)
            .map(PathBuf::from);

        let pacing_ms = match cli.pacing_ms {
            Some(ms) => ms,
            None => match env_var(ENV_PACING_MS) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("{ENV_PACING_MS} is not a whole number: {raw:?}"))?,
                None => file_config.generation.pacing_ms.unwrap_or(0),
            },
        };

        let taxonomy_path = cli
            .taxonomy
            .map(str::to_string)
            .or_else(|| env_var(ENV_TAXONOMY))
            .or(file_config.generation.taxonomy)
            .map(PathBuf::from);

        Ok(Self {
            format,
            output_dir,
            pacing: Duration::from_millis(pacing_ms),
            taxonomy_path,
        })
    }

    /// Load the configured taxonomy, or the built-in one.
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        match &self.taxonomy_path {
            Some(path) => load_taxonomy_file(path),
            None => Ok(Taxonomy::builtin().clone()),
        }
    }
}

fn load_taxonomy_file(path: &Path) -> Result<Taxonomy> {
    let taxonomy = Taxonomy::load(path)
        .with_context(|| format!("failed to load taxonomy from {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded custom taxonomy");
    Ok(taxonomy)
}

/// Read an env var, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
