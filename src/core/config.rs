//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tickets/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TicketsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub mount_id: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ViewConfig {
    pub comments: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MOUNT_ID: &str = "root";
pub const DEFAULT_LOG_FILE: &str = "tickets.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub mount_id: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub comments: bool,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub mount_id: Option<&'a str>,
    pub comments: Option<bool>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tickets/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tickets").join("config.toml"))
}

/// Load config from `explicit` if given, else from `~/.tickets/config.toml`.
///
/// A missing default file is generated (commented out) and treated as empty.
/// A missing explicit file is an error. A malformed file returns
/// `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<TicketsConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(TicketsConfig::default());
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TicketsConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<TicketsConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tickets Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# mount_id = "root"                  # Or set TICKETS_MOUNT_ID env var
# log_file = "tickets.log"
# log_level = "debug"                # Or set TICKETS_LOG_LEVEL env var

# [view]
# comments = true                    # false renders tickets without comment threads
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TicketsConfig, overrides: &Overrides<'_>) -> ResolvedConfig {
    resolve_with(config, overrides, |key| std::env::var(key).ok())
}

/// [`resolve`] with the environment supplied by `env`.
pub fn resolve_with(
    config: &TicketsConfig,
    overrides: &Overrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Mount point: CLI → env → config → default
    let mount_id = overrides
        .mount_id
        .map(|s| s.to_string())
        .or_else(|| env("TICKETS_MOUNT_ID"))
        .or_else(|| config.general.mount_id.clone())
        .unwrap_or_else(|| DEFAULT_MOUNT_ID.to_string());

    // Log level: env → config → default. A layer that doesn't parse is skipped.
    let log_level = env("TICKETS_LOG_LEVEL")
        .and_then(|level| parse_level(&level))
        .or_else(|| config.general.log_level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Comments: CLI → config → default (on)
    let comments = overrides
        .comments
        .or(config.view.comments)
        .unwrap_or(true);

    ResolvedConfig {
        mount_id,
        log_file: PathBuf::from(log_file),
        log_level,
        comments,
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match LevelFilter::from_str(level) {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level {:?}", level);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_parses() {
        let config = TicketsConfig::default();
        assert!(config.general.mount_id.is_none());
        assert!(config.view.comments.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&TicketsConfig::default(), &Overrides::default(), no_env);
        assert_eq!(resolved.mount_id, DEFAULT_MOUNT_ID);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(resolved.comments);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TicketsConfig {
            general: GeneralConfig {
                mount_id: Some("app".to_string()),
                log_file: Some("/tmp/t.log".to_string()),
                log_level: Some("warn".to_string()),
            },
            view: ViewConfig {
                comments: Some(false),
            },
        };
        let resolved = resolve_with(&config, &Overrides::default(), no_env);
        assert_eq!(resolved.mount_id, "app");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/t.log"));
        assert!(!resolved.comments);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TicketsConfig {
            general: GeneralConfig {
                mount_id: Some("app".to_string()),
                ..Default::default()
            },
            view: ViewConfig {
                comments: Some(false),
            },
        };
        let overrides = Overrides {
            mount_id: Some("cli-root"),
            comments: Some(true),
        };
        let env = env_from(&[("TICKETS_MOUNT_ID", "env-root")]);
        let resolved = resolve_with(&config, &overrides, env);
        assert_eq!(resolved.mount_id, "cli-root");
        assert!(resolved.comments);
    }

    #[test]
    fn test_resolve_env_beats_config() {
        let config = TicketsConfig {
            general: GeneralConfig {
                mount_id: Some("app".to_string()),
                log_level: Some("warn".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_from(&[("TICKETS_MOUNT_ID", "env-root"), ("TICKETS_LOG_LEVEL", "error")]);
        let resolved = resolve_with(&config, &Overrides::default(), env);
        assert_eq!(resolved.mount_id, "env-root");
        assert_eq!(resolved.log_level, LevelFilter::Error);
    }

    #[test]
    fn test_resolve_bad_env_level_falls_through_to_config() {
        let config = TicketsConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_from(&[("TICKETS_LOG_LEVEL", "loud")]);
        let resolved = resolve_with(&config, &Overrides::default(), env);
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_bad_levels_everywhere_use_default() {
        let config = TicketsConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_from(&[("TICKETS_LOG_LEVEL", "loud")]);
        let resolved = resolve_with(&config, &Overrides::default(), env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
mount_id = "tracker"
log_level = "info"

[view]
comments = false
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.mount_id.as_deref(), Some("tracker"));
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert!(config.general.log_file.is_none());
        assert_eq!(config.view.comments, Some(false));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let config = parse_config("[view]\ncomments = true\n").unwrap();
        assert_eq!(config.view.comments, Some(true));
        assert!(config.general.mount_id.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[general\nmount_id = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here/config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
