//! CLI argument parsing and dispatch

use crate::commands::install::{execute_install, InstallArgs};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use esactl_core::feature_set::WhenFileExists;
use std::path::PathBuf;

/// Log format options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Log level options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Policy for files that already exist on the install target
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WhenFileExistsOption {
    /// Abort when a conflicting file exists
    Fail,
    /// Overwrite the existing file
    Replace,
    /// Keep the existing file and continue
    Ignore,
}

impl From<WhenFileExistsOption> for WhenFileExists {
    fn from(policy: WhenFileExistsOption) -> Self {
        match policy {
            WhenFileExistsOption::Fail => WhenFileExists::Fail,
            WhenFileExistsOption::Replace => WhenFileExists::Replace,
            WhenFileExistsOption::Ignore => WhenFileExists::Ignore,
        }
    }
}

/// Server feature installer
///
/// Resolves a feature set from declared features, a single feature
/// reference, a server configuration document, and dependency metadata, then
/// installs it onto a runtime installation directory.
#[derive(Debug, Parser)]
#[command(name = "esactl", version, about = "Server feature installer")]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Log level (overridden by ESACTL_LOG / RUST_LOG)
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// esactl subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and install a feature set onto a runtime installation
    Install {
        /// Runtime installation root directory
        #[arg(long)]
        install_dir: PathBuf,

        /// Skip feature installation entirely
        #[arg(long)]
        skip: bool,

        /// Single feature reference: name, group:artifact,
        /// group:artifact:version, or group:artifact:esa:version
        #[arg(long)]
        feature: Option<String>,

        /// Server configuration document listing required features
        #[arg(long)]
        server_xml: Option<PathBuf>,

        /// Accept the feature license terms (true/false)
        #[arg(long)]
        accept_license: Option<bool>,

        /// Declared feature name or .esa archive (can be repeated)
        #[arg(long = "features", value_name = "FEATURE")]
        features: Vec<String>,

        /// Dependency descriptor artifactId:type (can be repeated)
        #[arg(long = "dependency", value_name = "ARTIFACT:TYPE")]
        dependencies: Vec<String>,

        /// Source location hint for the installer
        #[arg(long)]
        from: Option<String>,

        /// Target location hint for the installer
        #[arg(long)]
        to: Option<String>,

        /// Policy when an installed file already exists
        #[arg(long, value_enum, default_value = "fail")]
        when_file_exists: WhenFileExistsOption,

        /// Server identity for the legacy installer
        #[arg(long, default_value = "defaultServer")]
        server_name: String,

        /// Server directory scanned for already-installed features
        #[arg(long)]
        server_dir: Option<PathBuf>,

        /// User directory for the legacy installer
        #[arg(long)]
        user_dir: Option<PathBuf>,

        /// Output directory for the legacy installer
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Initialize logging and run the selected subcommand
    pub fn dispatch(self) -> Result<()> {
        esactl_core::logging::init_with_level(
            Some(self.log_format.as_str()),
            Some(self.log_level.as_str()),
        )?;

        match self.command {
            None => {
                println!("Server feature installer");
                println!("Run 'esactl --help' to see available commands.");
                Ok(())
            }
            Some(Commands::Install {
                install_dir,
                skip,
                feature,
                server_xml,
                accept_license,
                features,
                dependencies,
                from,
                to,
                when_file_exists,
                server_name,
                server_dir,
                user_dir,
                output_dir,
            }) => execute_install(InstallArgs {
                install_dir,
                skip,
                feature,
                server_xml,
                accept_license,
                features,
                dependencies,
                from,
                to,
                when_file_exists: when_file_exists.into(),
                server_name,
                server_dir,
                user_dir,
                output_dir,
            }),
        }
    }
}
