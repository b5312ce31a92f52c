use crate::errors::{AppError, AppResult};
use crate::store::StoreKind;
use crate::utils::date::parse_tz;
use crate::utils::path::expand_tilde;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the configuration directory (mainly for tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "PUNCHCLOCK_CONFIG_DIR";

/// Every key a complete configuration file carries.
pub const CONFIG_KEYS: [&str; 7] = [
    "database",
    "store",
    "timezone",
    "people",
    "roles",
    "default_role",
    "separator_char",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub store: StoreKind,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Names offered by `people` before anyone has clocked in.
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    #[serde(default = "default_role")]
    pub default_role: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file(StoreKind::Sqlite)
        .to_string_lossy()
        .to_string()
}
fn default_timezone() -> String {
    "UTC".to_string()
}
fn default_roles() -> Vec<String> {
    vec!["Intern".to_string(), "Store Worker".to_string()]
}
fn default_role() -> String {
    "Intern".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            store: StoreKind::default(),
            timezone: default_timezone(),
            people: Vec::new(),
            roles: default_roles(),
            default_role: default_role(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("punchclock")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".punchclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchclock.conf")
    }

    /// Default event store file for the given backend
    pub fn database_file(kind: StoreKind) -> PathBuf {
        match kind {
            StoreKind::Sqlite => Self::config_dir().join("punchclock.sqlite"),
            StoreKind::Csv => Self::config_dir().join("punchclock_log.csv"),
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;

        // Fail early on a bad timezone instead of at the first report.
        cfg.tz()?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        Ok(())
    }

    /// Initialize configuration and return the resolved config.
    ///
    /// - `custom_db`: resolved with [`Config::resolve_db_path`]
    /// - `template`: every other field is taken from here
    /// - `is_test`: do not touch the config file
    pub fn init_all(custom_db: Option<&str>, template: &Config, is_test: bool) -> AppResult<Self> {
        fs::create_dir_all(Self::config_dir())?;

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(name),
            None => Self::database_file(template.store),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..template.clone()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }

    /// `--db` value → absolute path. `~` is expanded and relative paths are
    /// taken from the working directory, for `init` and every other command.
    pub fn resolve_db_path(raw: &str) -> PathBuf {
        let p = expand_tilde(raw);
        std::path::absolute(&p).unwrap_or(p)
    }

    pub fn tz(&self) -> AppResult<Tz> {
        parse_tz(&self.timezone)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// `--role` if given, otherwise the configured default.
    pub fn role_or_default(&self, role: Option<&str>) -> String {
        role.map(str::to_string)
            .unwrap_or_else(|| self.default_role.clone())
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Keys absent from the YAML file at `path` (they run on defaults).
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::ConfigLoad(e.to_string()))?;

        let missing = CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| value.get(*k).is_none())
            .collect();

        Ok(missing)
    }
}
