//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `images`: Move the images a module uses into its own resource directory
//! - `locales`: Move the locale entries a module uses into its own property files
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::config::SharedDetection;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Images(args)) => args.common.verbose,
            Some(Command::Locales(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Common arguments shared by all migration commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Target modules, comma separated or repeated (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub modules: Vec<String>,

    /// Directory for reports and log.txt (overrides config file)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Top-level directories that are not modules (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Actually modify files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Level of the events written to log.txt
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "FSTRANSFER_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ImagesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Prefix of the images the target modules carry (overrides config file)
    #[arg(long)]
    pub target_base: Option<String>,

    /// Reference prefixes left out of the migration, repeatable
    #[arg(long)]
    pub target_excludes: Vec<String>,

    /// Directory images are copied into (overrides config file)
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Whether excluded references count when detecting shared images
    #[arg(long, value_enum)]
    pub shared_detection: Option<SharedDetection>,
}

#[derive(Debug, Args)]
pub struct LocalesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory of the target property files (overrides config file)
    #[arg(long)]
    pub target_path: Option<PathBuf>,

    /// Base name of the target property files (overrides config file)
    #[arg(long)]
    pub target_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Migrate images referenced by the target modules
    Images(ImagesArgs),
    /// Migrate locale entries referenced by the target modules
    Locales(LocalesArgs),
    /// Initialize a new .transferrc.json configuration file
    Init,
}
