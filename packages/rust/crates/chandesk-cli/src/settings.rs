//! Settings loader for chandesk.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/chandesk/settings.yaml`
//!
//! Merge precedence is user over system; `CHANDESK_API_BASE_URL` and
//! `CHANDESK_API_KEY` override both.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use chandesk_client::{
    ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use chandesk_compose::{DEFAULT_PER_PAGE, PostKind};
use chandesk_html::NormalizeOptions;
use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "chandesk/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
const DEFAULT_STATE_RELATIVE_PATH: &str = "chandesk/desk.json";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable overriding `api.base_url`.
pub const API_BASE_URL_ENV: &str = "CHANDESK_API_BASE_URL";
/// Environment variable overriding `api.api_key`.
pub const API_KEY_ENV: &str = "CHANDESK_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeskSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// Desk state file; relative paths resolve against the config home.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorSettings {
    pub collapse_duplicate_lines: Option<bool>,
    pub posts_per_page: Option<usize>,
    pub default_kind: Option<String>,
}

impl DeskSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            api: self.api.merge(overlay.api),
            store: self.store.merge(overlay.store),
            editor: self.editor.merge(overlay.editor),
        }
    }

    /// Applies `CHANDESK_API_*` values from `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(base_url) = non_empty(API_BASE_URL_ENV) {
            self.api.base_url = Some(base_url);
        }
        if let Some(api_key) = non_empty(API_KEY_ENV) {
            self.api.api_key = Some(api_key);
        }
        self
    }

    /// Client configuration with defaults filled in.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let base_url = self
            .api
            .base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        ApiConfig {
            base_url,
            api_key: None,
            connect_timeout: Duration::from_secs(
                self.api
                    .connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            request_timeout: Duration::from_secs(
                self.api
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
        .with_api_key(self.api.api_key.clone())
    }

    /// Normalizer options from the editor section.
    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            collapse_duplicate_lines: self.editor.collapse_duplicate_lines.unwrap_or(true),
            ..NormalizeOptions::default()
        }
    }

    /// Posts per list page; zero falls back to the default.
    #[must_use]
    pub fn posts_per_page(&self) -> usize {
        self.editor
            .posts_per_page
            .filter(|per_page| *per_page > 0)
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    /// Post kind used when `posts create` gets no `--kind`.
    #[must_use]
    pub fn default_kind(&self) -> PostKind {
        self.editor
            .default_kind
            .as_deref()
            .map_or(PostKind::Info, PostKind::from_name)
    }

    /// Desk state file, resolved against `config_home`.
    #[must_use]
    pub fn state_path(&self, config_home: &Path) -> PathBuf {
        match &self.store.path {
            Some(path) => absolutize(config_home, path.clone()),
            None => config_home.join(DEFAULT_STATE_RELATIVE_PATH),
        }
    }
}

impl ApiSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            base_url: overlay.base_url.or(self.base_url),
            api_key: overlay.api_key.or(self.api_key),
            connect_timeout_secs: overlay.connect_timeout_secs.or(self.connect_timeout_secs),
            request_timeout_secs: overlay.request_timeout_secs.or(self.request_timeout_secs),
        }
    }
}

impl StoreSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            path: overlay.path.or(self.path),
        }
    }
}

impl EditorSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            collapse_duplicate_lines: overlay
                .collapse_duplicate_lines
                .or(self.collapse_duplicate_lines),
            posts_per_page: overlay.posts_per_page.or(self.posts_per_page),
            default_kind: overlay.default_kind.or(self.default_kind),
        }
    }
}

/// Load merged settings (user over system, environment over both).
pub fn load_settings() -> DeskSettings {
    let (system_path, user_path) = settings_paths();
    load_settings_from_paths(&system_path, &user_path)
        .with_env_overrides(|name| std::env::var(name).ok())
}

#[doc(hidden)]
pub fn settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = config_home().join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_settings_from_paths(system: &Path, user: &Path) -> DeskSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> DeskSettings {
    if !path.exists() {
        return DeskSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return DeskSettings::default();
        }
    };
    if raw.trim().is_empty() {
        return DeskSettings::default();
    }
    match serde_yaml::from_str::<DeskSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            DeskSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

/// Resolved config home: `--conf`, else `PRJ_CONFIG_HOME`, else `.config`.
pub fn config_home() -> PathBuf {
    let root = project_root();
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(&root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(&root, PathBuf::from(configured))
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
