use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory used when `export`/`backup --file` get a bare file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            log_level: default_log_level(),
            export_dir: None,
        }
    }
}

impl Config {
    /// `~/.bishop`, or `./.bishop` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bishop")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("bishop.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("bishop.sqlite")
    }

    /// Load the configuration file. A missing file gives the defaults; an
    /// unreadable or malformed one gives the defaults plus a warning.
    pub fn load() -> Self {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warning(format!("Ignoring configuration {}: {e}", path.display()));
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve `file` against `export_dir` when it is a bare relative name.
    pub fn output_path(&self, file: &str) -> PathBuf {
        let p = Path::new(file);
        match &self.export_dir {
            Some(dir) if p.is_relative() && p.parent() == Some(Path::new("")) => {
                Path::new(dir).join(p)
            }
            _ => p.to_path_buf(),
        }
    }

    /// Absolute paths are kept; bare names live in the configuration directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Create the configuration directory, the configuration file (unless
    /// `is_test`) and return the database path to use.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = custom_db.map_or_else(Self::database_file, Self::resolve_database);

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            fs::write(Self::config_file(), yaml)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
