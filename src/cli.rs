use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::rules::Severity;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "audit-guard")]
#[command(author, version, about = "Project tree auditor - policy scanning and simulated test runs")]
#[command(long_about = "Scans a project tree for security policy violations and discovers\n\
    test suites by naming convention, simulating their execution.\n\n\
    Exit codes:\n  \
    0 - Nothing at or above the failure threshold\n  \
    1 - Policy violations or test failures found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a project tree for policy violations
    Scan(ScanArgs),

    /// Discover test suites and simulate running them
    Test(TestArgs),

    /// Show the policy registry with violation counts and compliance posture
    Policies(PoliciesArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Root directory (or single file) to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Scan a JSON tree snapshot instead of walking the filesystem
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum severity that sets the failure exit code (overrides config)
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Print the scan log before the report (text format only)
    #[arg(long)]
    pub log: bool,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// File extensions to load (comma-separated; bare names match in full)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Do not honor .gitignore rules while walking
    #[arg(long)]
    pub no_gitignore: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Root directory to discover tests in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Discover tests in a JSON tree snapshot instead
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List the discovered tree without running anything
    #[arg(long)]
    pub list: bool,

    /// Only keep suites/tests whose name contains this substring
    #[arg(long)]
    pub filter: Option<String>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Do not honor .gitignore rules while walking
    #[arg(long)]
    pub no_gitignore: bool,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct PoliciesArgs {
    /// Root directory to scan before counting violations
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Scan a JSON tree snapshot instead of walking the filesystem
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file
    #[arg(short, long, default_value = ".audit-guard.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Check that a configuration file parses and is semantically valid
    Validate {
        /// Path to the configuration file
        config: PathBuf,
    },
    /// Print the effective configuration
    Show {
        /// Path to the configuration file (defaults to the search locations)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
