use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use leadflow_core::dashboard::{GroupOrder, DEFAULT_ACTIVITY_LIMIT};
use leadflow_core::{CoreError, StatusSet, TeamMemberId, DEFAULT_SOURCE};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadflow";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_STALE_DAYS: u32 = 30;
pub const MAX_STALE_DAYS: i64 = 3650;
pub const MAX_ACTIVITY_LIMIT: i64 = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub statuses: StatusSet,
    pub default_source: String,
    /// Team member recorded as the author of interactions logged from
    /// this machine. `None` attributes them to the system.
    pub actor_id: Option<TeamMemberId>,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub recent_activity_limit: usize,
    pub group_order: GroupOrder,
    pub stale_after_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: DEFAULT_ACTIVITY_LIMIT,
            group_order: GroupOrder::FirstSeen,
            stale_after_days: DEFAULT_STALE_DAYS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            statuses: StatusSet::standard(),
            default_source: DEFAULT_SOURCE.to_string(),
            actor_id: None,
            dashboard: DashboardConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid statuses: {0}")]
    InvalidStatuses(String),
    #[error("invalid recent_activity_limit value: {0}")]
    InvalidActivityLimit(i64),
    #[error("invalid stale_after_days value: {0}")]
    InvalidStaleDays(i64),
    #[error("invalid actor_id value: {0}")]
    InvalidActorId(i64),
    #[error("default_source cannot be empty")]
    EmptyDefaultSource,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPreset {
    Standard,
    Pipeline,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_source: Option<String>,
    actor_id: Option<i64>,
    statuses: Option<StatusesFile>,
    dashboard: Option<DashboardFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatusesFile {
    preset: Option<StatusPreset>,
    values: Option<Vec<String>>,
    initial: Option<String>,
    converted: Option<String>,
    lost: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DashboardFile {
    recent_activity_limit: Option<i64>,
    group_order: Option<GroupOrder>,
    stale_after_days: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(source) = parsed.default_source {
        let source = source.trim();
        if source.is_empty() {
            return Err(ConfigError::EmptyDefaultSource);
        }
        config.default_source = source.to_string();
    }

    if let Some(actor) = parsed.actor_id {
        if actor <= 0 {
            return Err(ConfigError::InvalidActorId(actor));
        }
        config.actor_id = Some(TeamMemberId(actor));
    }

    if let Some(statuses) = parsed.statuses {
        config.statuses = build_statuses(statuses)?;
    }

    if let Some(dashboard) = parsed.dashboard {
        if let Some(limit) = dashboard.recent_activity_limit {
            if !(1..=MAX_ACTIVITY_LIMIT).contains(&limit) {
                return Err(ConfigError::InvalidActivityLimit(limit));
            }
            config.dashboard.recent_activity_limit = limit as usize;
        }
        if let Some(order) = dashboard.group_order {
            config.dashboard.group_order = order;
        }
        if let Some(days) = dashboard.stale_after_days {
            if !(1..=MAX_STALE_DAYS).contains(&days) {
                return Err(ConfigError::InvalidStaleDays(days));
            }
            config.dashboard.stale_after_days = days as u32;
        }
    }

    Ok(config)
}

fn build_statuses(file: StatusesFile) -> Result<StatusSet> {
    let invalid = |err: CoreError| ConfigError::InvalidStatuses(err.to_string());

    match (file.preset, file.values) {
        (Some(_), Some(_)) => Err(ConfigError::InvalidStatuses(
            "use either preset or values, not both".to_string(),
        )),
        (preset, None) => {
            if file.initial.is_some() || file.converted.is_some() || file.lost.is_some() {
                return Err(ConfigError::InvalidStatuses(
                    "initial/converted/lost require values".to_string(),
                ));
            }
            Ok(match preset.unwrap_or(StatusPreset::Standard) {
                StatusPreset::Standard => StatusSet::standard(),
                StatusPreset::Pipeline => StatusSet::pipeline(),
            })
        }
        (None, Some(values)) => {
            let initial = match file.initial {
                Some(initial) => initial,
                None => values.first().cloned().unwrap_or_default(),
            };
            let converted = file.converted.ok_or_else(|| {
                ConfigError::InvalidStatuses("custom values need a converted status".to_string())
            })?;
            StatusSet::new(
                values.as_slice(),
                &initial,
                &converted,
                file.lost.as_deref(),
            )
            .map_err(invalid)
        }
    }
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
