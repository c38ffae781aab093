//! Per-host configuration file and marker discovery

use crate::types::{PatternSet, SyncError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker file identifying a backup volume
///
/// Its presence marks a mounted volume as a backup target, and its content is
/// the host configuration.
pub const MARKER_FILE_NAME: &str = ".backup";

/// Directory under which removable volumes are mounted, per user
pub const MEDIA_DIR: &str = "/media";

/// Host configuration: hostname → include/exclude patterns
///
/// ```toml
/// [laptop]
/// includes = ["notes.txt", "docs/**"]
/// excludes = ["docs/private/**"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct HostConfigs {
    hosts: BTreeMap<String, PatternSet>,
}

impl HostConfigs {
    /// Parse configuration text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: &Path) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| {
            SyncError::Config(format!(
                "parsing configuration file '{}': {}",
                origin.display(),
                e
            ))
        })
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!(
                "reading configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text, path)
    }

    /// Patterns for `host`
    ///
    /// An unknown host is an error rather than an empty pattern set, so a
    /// misnamed machine never silently backs up nothing.
    pub fn for_host(&self, host: &str) -> Result<&PatternSet, SyncError> {
        self.hosts.get(host).ok_or_else(|| {
            let known: Vec<&str> = self.hosts().collect();
            SyncError::Config(format!(
                "hostname '{}' not found in configuration (configured: {})",
                host,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            ))
        })
    }

    /// Configured hostnames, sorted
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }
}

/// Find the first `<media_root>/<volume>/.backup` marker file
///
/// Volumes are probed in sorted name order. A marker that is a directory does
/// not count.
pub fn find_config_file(media_root: &Path) -> Result<PathBuf, SyncError> {
    let entries = fs::read_dir(media_root).map_err(|e| {
        SyncError::Config(format!(
            "reading directory '{}': {}",
            media_root.display(),
            e
        ))
    })?;

    let mut volumes: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    volumes.sort();

    for volume in volumes {
        let marker = volume.join(MARKER_FILE_NAME);
        match fs::metadata(&marker) {
            Ok(meta) if !meta.is_dir() => {
                tracing::debug!("found marker file {}", marker.display());
                return Ok(marker);
            }
            _ => continue,
        }
    }

    Err(SyncError::Config(format!(
        "no {} file found in {} subdirectory",
        MARKER_FILE_NAME,
        media_root.display()
    )))
}

/// `/media/<user>` for the current user
pub fn default_media_root() -> Result<PathBuf, SyncError> {
    let user = current_user()
        .ok_or_else(|| SyncError::Config("Cannot determine current user name".to_string()))?;
    Ok(Path::new(MEDIA_DIR).join(user))
}

/// Login name from `$USER`/`$LOGNAME`, else the home directory's last component
pub fn current_user() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
        .or_else(|| {
            dirs::home_dir()
                .and_then(|home| home.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
}

/// Hostname of this machine
pub fn current_hostname() -> Result<String, SyncError> {
    let name = gethostname::gethostname().into_string().map_err(|raw| {
        SyncError::Config(format!("hostname {:?} is not valid UTF-8", raw))
    })?;

    if name.is_empty() {
        return Err(SyncError::Config("getting hostname: empty name".to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[laptop]
includes = ["notes.txt", "docs/**"]
excludes = ["docs/private/**"]

["desk.local"]
includes = [".bashrc"]
"#;

    #[test]
    fn test_parse_hosts() {
        let configs = HostConfigs::parse(SAMPLE, Path::new(".backup")).unwrap();

        assert_eq!(configs.hosts().collect::<Vec<_>>(), vec!["desk.local", "laptop"]);

        let laptop = configs.for_host("laptop").unwrap();
        assert_eq!(laptop.includes, vec!["notes.txt", "docs/**"]);
        assert_eq!(laptop.excludes, vec!["docs/private/**"]);

        let desk = configs.for_host("desk.local").unwrap();
        assert!(desk.excludes.is_empty());
    }

    #[test]
    fn test_unknown_host_is_config_error() {
        let configs = HostConfigs::parse(SAMPLE, Path::new(".backup")).unwrap();

        let err = configs.for_host("server").unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("hostname 'server' not found"));
        assert!(err.to_string().contains("configured: desk.local, laptop"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = HostConfigs::parse("[laptop\nincludes = 3", Path::new("/media/me/usb/.backup"))
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("/media/me/usb/.backup"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = HostConfigs::load(&dir.path().join(".backup")).unwrap_err();
        assert!(err.to_string().contains("reading configuration file"));
    }

    #[test]
    fn test_find_config_file_picks_first_volume_with_marker() {
        let media = TempDir::new().unwrap();
        fs::create_dir_all(media.path().join("a-empty")).unwrap();
        fs::create_dir_all(media.path().join("b-dir-marker/.backup")).unwrap();
        fs::create_dir_all(media.path().join("c-usb")).unwrap();
        fs::write(media.path().join("c-usb/.backup"), SAMPLE).unwrap();
        fs::create_dir_all(media.path().join("d-usb")).unwrap();
        fs::write(media.path().join("d-usb/.backup"), SAMPLE).unwrap();

        let found = find_config_file(media.path()).unwrap();
        assert_eq!(found, media.path().join("c-usb/.backup"));
    }

    #[test]
    fn test_find_config_file_without_marker() {
        let media = TempDir::new().unwrap();
        fs::create_dir_all(media.path().join("usb")).unwrap();

        let err = find_config_file(media.path()).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("no .backup file found"));
    }

    #[test]
    fn test_find_config_file_missing_media_root() {
        let media = TempDir::new().unwrap();
        let err = find_config_file(&media.path().join("nobody")).unwrap_err();
        assert!(err.to_string().contains("reading directory"));
    }
}
