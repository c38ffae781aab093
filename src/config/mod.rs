//! Configuration management

mod host;

pub use host::{
    current_hostname, current_user, default_media_root, find_config_file, HostConfigs,
    MARKER_FILE_NAME, MEDIA_DIR,
};

use crate::types::{PatternSet, SyncError};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Back up this host's files to the mounted volume carrying a `.backup` marker
#[derive(Debug, Clone, Parser)]
#[command(name = "homesync", version, about)]
pub struct Cli {
    /// Don't print files to copy
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this configuration file instead of probing mounted volumes;
    /// files are copied next to it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding mounted volumes [default: /media/<user>]
    #[arg(long, value_name = "DIR", conflicts_with = "config")]
    pub media_root: Option<PathBuf>,

    /// Hostname used to select the configuration entry [default: this machine]
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Root that include patterns are relative to [default: home directory]
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,
}

/// Everything one backup run needs
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the files to back up (include patterns are relative to it)
    pub home: PathBuf,

    /// Destination root: the directory holding the marker file
    pub destination: PathBuf,

    /// Include/exclude patterns for this host
    pub patterns: PatternSet,

    /// Suppress the per-file progress lines and summary
    pub quiet: bool,
}

impl Config {
    /// Assemble a configuration from its parts
    pub fn new(home: PathBuf, destination: PathBuf, patterns: PatternSet) -> Self {
        Self {
            home,
            destination,
            patterns,
            quiet: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if !self.home.is_dir() {
            return Err(SyncError::Config(format!(
                "Home directory does not exist: {}",
                self.home.display()
            )));
        }

        if self.home == self.destination {
            return Err(SyncError::Config(
                "Home and destination cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let home = match cli.home {
            Some(home) => home,
            None => resolve_home()?,
        };

        let config_file = match cli.config {
            Some(file) => file,
            None => {
                let media_root = match cli.media_root {
                    Some(root) => root,
                    None => default_media_root()?,
                };
                find_config_file(&media_root)?
            }
        };

        let host = match cli.host {
            Some(host) => host,
            None => current_hostname()?,
        };

        let hosts = HostConfigs::load(&config_file)?;
        let patterns = hosts.for_host(&host)?.clone();
        tracing::info!(
            "Using {} for host '{}' ({} include, {} exclude patterns)",
            config_file.display(),
            host,
            patterns.includes.len(),
            patterns.excludes.len()
        );

        let config = Config {
            home,
            destination: destination_for(&config_file),
            patterns,
            quiet: cli.quiet,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Home directory of the current user
pub fn resolve_home() -> Result<PathBuf, SyncError> {
    dirs::home_dir()
        .ok_or_else(|| SyncError::Config("getting user home: no home directory".to_string()))
}

/// Directory containing the configuration file
pub fn destination_for(config_file: &Path) -> PathBuf {
    match config_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
