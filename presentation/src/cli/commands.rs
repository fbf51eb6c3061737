//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for workflow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Mapping table, drafts and submission summary
    Summary,
    /// JSON report
    Json,
}

impl From<OutputFormat> for assessgen_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => assessgen_domain::OutputFormat::Summary,
            OutputFormat::Json => assessgen_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for assessgen
#[derive(Parser, Debug)]
#[command(name = "assessgen")]
#[command(author, version, about = "Generate, store and submit taxonomy-mapped assessments")]
#[command(long_about = r#"
assessgen walks an assessment plan through three steps:

1. Review Mapping: resolve taxonomy buckets and generate draft questions
2. Configure Settings: title, description, timing and display flags
3. Summary: store every draft, allocate ids to buckets and submit once

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./assessgen.toml    Project-level config
3. ~/.config/assessgen/config.toml   Global config
4. ASSESSGEN_* environment variables (ASSESSGEN_API__BASE_URL, ...)

Example:
  assessgen plan.toml
  assessgen plan.toml --review-only -o json
  assessgen --show-config
"#)]
pub struct Cli {
    /// Assessment plan file (TOML)
    #[arg(value_name = "PLAN", required_unless_present = "show_config")]
    pub plan: Option<PathBuf>,

    /// Generate and review without storing or submitting anything
    #[arg(long)]
    pub review_only: bool,

    /// Output format (defaults to [output] format, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::parse_from([
            "assessgen",
            "plan.toml",
            "--review-only",
            "-o",
            "json",
            "-vv",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.plan, Some(PathBuf::from("plan.toml")));
        assert!(cli.review_only);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_plan_required_unless_show_config() {
        assert!(Cli::try_parse_from(["assessgen"]).is_err());
        let cli = Cli::try_parse_from(["assessgen", "--show-config"]).unwrap();
        assert!(cli.plan.is_none());
    }
}
