//! Command-line definitions, merge config assembly, and tracing setup.

use std::path::PathBuf;

use cable_merge::MergeConfig;
use clap::{Parser, Subcommand, ValueEnum};

use crate::error::HelperError;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Convert raw cable traces into cable documents and merge their segments.
#[derive(Parser, Debug)]
#[command(name = "cable-helper", version, long_about = None)]
pub struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wrap a JSON array of coordinate lists into a cable document.
    Convert {
        /// Input JSON file: an array of `[[lat, lng], ...]` lists.
        input: PathBuf,

        /// Output cable document.
        output: PathBuf,

        /// Id for the new cable (e.g. `apg`).
        #[arg(long)]
        cable_id: String,

        /// Display name for the new cable (e.g. "Asia Pacific Gateway").
        #[arg(long)]
        cable_name: String,

        /// Also write an SVG preview of the converted cable.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Join segments whose endpoints coincide into continuous segments.
    Merge {
        /// Input cable document.
        input: PathBuf,

        /// Output cable document.
        output: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Print merge diagnostics to stdout.
        #[arg(long)]
        stats: bool,

        /// Print diagnostics as JSON instead of a human-readable report
        /// (implies `--stats`).
        #[arg(long)]
        json: bool,

        /// Also write an SVG preview of the merged cable.
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

/// Merge parameters.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Per-axis endpoint matching tolerance.
    #[arg(long, default_value_t = MergeConfig::DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Color for merged segments whose seed segment has none.
    #[arg(long, default_value = MergeConfig::DEFAULT_FALLBACK_COLOR)]
    pub fallback_color: String,

    /// Full merge config as a JSON string.
    ///
    /// When provided, the other merge parameter flags are ignored.
    /// Missing fields take their defaults.
    #[arg(long)]
    pub config_json: Option<String>,
}

impl ConfigArgs {
    /// Build a [`MergeConfig`] from the flags.
    ///
    /// If `--config-json` is provided, the JSON is parsed directly and
    /// the individual flags are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HelperError::Config`] if `--config-json` does not parse,
    /// and [`HelperError::Merge`] if the resulting config is invalid.
    pub fn to_config(&self) -> Result<MergeConfig, HelperError> {
        let config = match self.config_json {
            Some(ref json) => serde_json::from_str(json).map_err(HelperError::Config)?,
            None => MergeConfig {
                tolerance: self.tolerance,
                fallback_color: self.fallback_color.clone(),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. `RUST_LOG` takes precedence.
pub fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "cable_helper=info,cable_merge=info",
        1 => "cable_helper=debug,cable_merge=debug",
        _ => "cable_helper=trace,cable_merge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn merge_args(args: &[&str]) -> ConfigArgs {
        let mut argv = vec!["cable-helper", "merge", "in.json", "out.json"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Merge { config, .. } => config,
            Command::Convert { .. } => panic!("expected merge"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_requires_id_and_name() {
        assert!(Cli::try_parse_from(["cable-helper", "convert", "in.json", "out.json"]).is_err());
        assert!(
            Cli::try_parse_from([
                "cable-helper",
                "convert",
                "in.json",
                "out.json",
                "--cable-id",
                "apg",
                "--cable-name",
                "Asia Pacific Gateway",
            ])
            .is_ok()
        );
    }

    #[test]
    fn merge_defaults_match_config_defaults() {
        let config = merge_args(&[]).to_config().unwrap();
        assert_eq!(config, MergeConfig::default());
    }

    #[test]
    fn merge_flags_override_defaults() {
        let config = merge_args(&["--tolerance", "0.001", "--fallback-color", "#000000"])
            .to_config()
            .unwrap();
        assert!((config.tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(config.fallback_color, "#000000");
    }

    #[test]
    fn config_json_wins_over_flags() {
        let config = merge_args(&["--tolerance", "0.5", "--config-json", r#"{"tolerance": 0.25}"#])
            .to_config()
            .unwrap();
        assert!((config.tolerance - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.fallback_color, MergeConfig::DEFAULT_FALLBACK_COLOR);
    }

    #[test]
    fn malformed_config_json_is_reported() {
        let result = merge_args(&["--config-json", "{not json"]).to_config();
        assert!(matches!(result, Err(HelperError::Config(_))));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let result = merge_args(&["--tolerance=-1"]).to_config();
        assert!(matches!(result, Err(HelperError::Merge(_))));
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["cable-helper", "merge", "a", "b", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Text);
    }
}
