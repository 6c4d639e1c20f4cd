//! Command-line argument parsing for the `tilekit` tool.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// `tilekit` command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tilekit", about = "Rule-based tile classification")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Latitude bands of the demo planet.
    #[arg(long)]
    pub rows: Option<usize>,

    /// Cells per latitude band.
    #[arg(long)]
    pub columns: Option<usize>,

    /// RON rule catalog to classify with.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Write a JSON summary of the pass to this file.
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write a label map PNG to this file.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(rows) = args.rows {
            self.world.rows = rows;
        }
        if let Some(columns) = args.columns {
            self.world.columns = columns;
        }
        if let Some(ref rules) = args.rules {
            self.classifier.rules_path = Some(rules.clone());
        }
        if let Some(ref summary) = args.summary {
            self.output.summary_path = Some(summary.clone());
        }
        if let Some(ref map) = args.map {
            self.output.map_path = Some(map.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            rules: Some(PathBuf::from("custom.ron")),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 7);
        assert_eq!(
            config.classifier.rules_path,
            Some(PathBuf::from("custom.ron"))
        );
        // Non-overridden fields retain defaults
        assert_eq!(config.world.rows, 90);
        assert_eq!(config.output.map_path, None);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "tilekit",
            "--seed",
            "99",
            "--columns",
            "64",
            "--map",
            "out.png",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.columns, Some(64));
        assert_eq!(args.map, Some(PathBuf::from("out.png")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.rows, None);
    }
}
