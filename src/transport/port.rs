//! Port discovery for the editor's HTTP tool server.
//!
//! Precedence: explicit `--port` > nearest `.cocos-mcp-config.json` found by
//! walking up from the working directory > `DEFAULT_PORT`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::log_warn;

/// File the editor extension writes into the project root.
pub const CONFIG_FILE_NAME: &str = ".cocos-mcp-config.json";

/// Port used when nothing else names one.
pub const DEFAULT_PORT: u16 = 3000;

/// Directories examined during discovery, the start directory included.
pub const MAX_SEARCH_LEVELS: usize = 10;

/// The part of the project config this client reads. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub port: Option<u16>,
}

/// Where a resolved port came from (logged with `-v`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSource {
    Explicit,
    Config(PathBuf),
    Default,
}

impl fmt::Display for PortSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSource::Explicit => f.write_str("--port"),
            PortSource::Config(path) => write!(f, "{}", path.display()),
            PortSource::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPort {
    pub port: u16,
    pub source: PortSource,
}

/// Resolve the target port.
///
/// An explicit port of 0 counts as unset. A config file found without a
/// `port` field resolves to `DEFAULT_PORT` and stops the search.
pub fn resolve_port(explicit: Option<u16>, start_dir: &Path) -> ResolvedPort {
    if let Some(port) = explicit.filter(|p| *p != 0) {
        return ResolvedPort {
            port,
            source: PortSource::Explicit,
        };
    }

    match discover_config(start_dir) {
        Some((path, config)) => ResolvedPort {
            port: config.port.unwrap_or(DEFAULT_PORT),
            source: PortSource::Config(path),
        },
        None => ResolvedPort {
            port: DEFAULT_PORT,
            source: PortSource::Default,
        },
    }
}

/// Walk from `start_dir` toward the filesystem root looking for the project
/// config. Unreadable or malformed files are skipped with a warning.
pub fn discover_config(start_dir: &Path) -> Option<(PathBuf, ProjectConfig)> {
    for dir in start_dir.ancestors().take(MAX_SEARCH_LEVELS) {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            continue;
        }
        match load_config(&candidate) {
            Ok(config) => return Some((candidate, config)),
            Err(e) => log_warn!("skipping {}: {e:#}", candidate.display()),
        }
    }
    None
}

fn load_config(path: &Path) -> Result<ProjectConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("failed to parse project config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(CONFIG_FILE_NAME), contents).unwrap();
    }

    #[test]
    fn explicit_port_wins_over_config() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), r#"{"port": 4100}"#);

        let resolved = resolve_port(Some(5123), tmp.path());
        assert_eq!(resolved.port, 5123);
        assert_eq!(resolved.source, PortSource::Explicit);
    }

    #[test]
    fn explicit_zero_falls_through_to_config() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), r#"{"port": 4100}"#);

        assert_eq!(resolve_port(Some(0), tmp.path()).port, 4100);
    }

    #[test]
    fn nearest_ancestor_config_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        let nested = project.join("assets").join("scripts");
        fs::create_dir_all(&nested).unwrap();
        write_config(tmp.path(), r#"{"port": 4200}"#);
        write_config(&project, r#"{"port": 4100, "version": "1.0.0"}"#);

        let resolved = resolve_port(None, &nested);
        assert_eq!(resolved.port, 4100);
        assert_eq!(
            resolved.source,
            PortSource::Config(project.join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn malformed_config_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("project");
        write_config(tmp.path(), r#"{"port": 4200}"#);
        write_config(&project, "{ not json");

        assert_eq!(resolve_port(None, &project).port, 4200);
    }

    #[test]
    fn config_without_port_uses_default() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), r#"{"enabled": true}"#);

        let resolved = resolve_port(None, tmp.path());
        assert_eq!(resolved.port, DEFAULT_PORT);
        assert!(matches!(resolved.source, PortSource::Config(_)));
    }

    #[test]
    fn search_depth_is_bounded() {
        let tmp = tempfile::tempdir().unwrap();
        write_config(tmp.path(), r#"{"port": 4300}"#);

        // Ten levels below the config: start dir plus nine parents never reach it.
        let mut deep = tmp.path().to_path_buf();
        for i in 0..MAX_SEARCH_LEVELS {
            deep.push(format!("d{i}"));
        }
        fs::create_dir_all(&deep).unwrap();
        assert!(discover_config(&deep).is_none_or(|(path, _)| !path.starts_with(tmp.path())));

        // Nine levels below: the tenth directory examined is the one holding it.
        let shallow = deep.parent().unwrap();
        assert_eq!(resolve_port(None, shallow).port, 4300);
    }

    #[test]
    fn source_display() {
        assert_eq!(PortSource::Explicit.to_string(), "--port");
        assert_eq!(PortSource::Default.to_string(), "default");
    }
}
