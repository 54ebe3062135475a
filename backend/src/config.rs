use crate::error::ConfigError;
use crate::survey::eligibility::EligibilityPolicy;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Csv,
    Sqlite,
    Memory,
}

impl FromStr for StorageKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(StorageKind::Csv),
            "sqlite" => Ok(StorageKind::Sqlite),
            "memory" => Ok(StorageKind::Memory),
            _ => Err(()),
        }
    }
}

/// Runtime configuration, pulled from `SURVEY_*` environment variables.
///
/// Every field has a default so the server starts with no environment at
/// all, storing CSV files in the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the CSV tables or the SQLite database.
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    /// Base URL customers open; survey links append `?link_id=<token>`.
    pub public_url: String,
    /// Sheet an uploaded workbook must contain.
    pub sheet_name: String,
    pub eligibility: EligibilityPolicy,
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        let host = "127.0.0.1".to_string();
        let port = 8080;
        Config {
            public_url: format!("http://{}:{}", host, port),
            host,
            port,
            data_dir: PathBuf::from("."),
            storage: StorageKind::Csv,
            sheet_name: "Clientes".to_string(),
            eligibility: EligibilityPolicy::default(),
            max_upload_bytes: 10 * 1024 * 1024,
            open_browser: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("SURVEY_HOST").unwrap_or(defaults.host);
        let port = match lookup("SURVEY_PORT") {
            Some(value) => parse_var("SURVEY_PORT", value)?,
            None => defaults.port,
        };
        let data_dir = lookup("SURVEY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage = match lookup("SURVEY_STORAGE") {
            Some(value) => parse_var("SURVEY_STORAGE", value)?,
            None => defaults.storage,
        };
        let public_url = lookup("SURVEY_PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://{}:{}", host, port));
        let sheet_name = lookup("SURVEY_SHEET_NAME").unwrap_or(defaults.sheet_name);
        let eligibility = match lookup("SURVEY_ELIGIBILITY") {
            Some(value) => parse_var("SURVEY_ELIGIBILITY", value)?,
            None => defaults.eligibility,
        };
        let max_upload_bytes = match lookup("SURVEY_MAX_UPLOAD_MB") {
            Some(value) => parse_var::<usize>("SURVEY_MAX_UPLOAD_MB", value)? * 1024 * 1024,
            None => defaults.max_upload_bytes,
        };
        let open_browser = match lookup("SURVEY_OPEN_BROWSER") {
            Some(value) => parse_var("SURVEY_OPEN_BROWSER", value)?,
            None => defaults.open_browser,
        };

        Ok(Config {
            host,
            port,
            data_dir,
            storage,
            public_url,
            sheet_name,
            eligibility,
            max_upload_bytes,
            open_browser,
        })
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
