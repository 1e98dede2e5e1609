use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::report::options::{DEFAULT_SLOW_STEP_SECS, RenderOptions};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "gherkin-report",
    version,
    about = "Render BDD test run results as console, HTML or JUnit reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: gherkin-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a whole run
    Render {
        /// Path to the run document (JSON)
        #[arg(short, long)]
        input: String,

        /// Output format: console, html, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Feature to select (drill-down in console, opened in html)
        #[arg(long)]
        feature: Option<String>,

        /// Steps whose logs start expanded: none, failed, all
        #[arg(long)]
        expand: Option<String>,
    },

    /// Print one feature's scenarios and steps to the terminal
    Show {
        /// Path to the run document (JSON)
        #[arg(short, long)]
        input: String,

        /// Name of the feature to show
        #[arg(long)]
        feature: String,

        /// Steps whose logs start expanded: none, failed, all
        #[arg(long)]
        expand: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `gherkin-report.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,

    #[serde(default = "default_expand")]
    pub expand: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            output: None,
            expand: "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Steps slower than this are highlighted
    #[serde(default = "default_slow_step_secs")]
    pub slow_step_secs: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            slow_step_secs: DEFAULT_SLOW_STEP_SECS,
        }
    }
}

// Serde default helpers
fn default_console() -> String { "console".to_string() }
fn default_expand() -> String { "none".to_string() }
fn default_slow_step_secs() -> f64 { DEFAULT_SLOW_STEP_SECS }

pub const DEFAULT_CONFIG_PATH: &str = "gherkin-report.yaml";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "Ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Which steps start with their log panel open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    None,
    Failed,
    All,
}

impl ExpandMode {
    /// Unknown values fall back to `None`.
    pub fn parse(value: &str) -> Self {
        match value {
            "failed" => ExpandMode::Failed,
            "all" => ExpandMode::All,
            _ => ExpandMode::None,
        }
    }
}

/// Resolved settings for one invocation: CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub format: String,
    pub output: Option<String>,
    pub expand: ExpandMode,
    pub options: RenderOptions,
}

pub fn resolve_settings(
    config: &AppConfig,
    format: Option<&str>,
    output: Option<&str>,
    expand: Option<&str>,
) -> ResolvedSettings {
    ResolvedSettings {
        format: format.unwrap_or(&config.render.format).to_string(),
        output: output
            .map(str::to_string)
            .or_else(|| config.render.output.clone()),
        expand: ExpandMode::parse(expand.unwrap_or(&config.render.expand)),
        options: RenderOptions {
            slow_step_secs: config.display.slow_step_secs,
        },
    }
}
