use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://customers.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` in any letter case selects JSON; anything else is compact.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Create the `customer` table on startup when it is missing.
    #[serde(default)]
    pub auto_create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_create_schema: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), then normalize and validate.
    ///
    /// Only a missing file falls back to the environment; unreadable or
    /// malformed files are errors.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("failed to load {}", path))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from `DATABASE_URL` and `LOG_FORMAT`.
    pub fn from_env() -> Self {
        let format = LogFormat::from_name(std::env::var("LOG_FORMAT").ok().as_deref());
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig { format },
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fills_defaults() {
        let cfg = parse("[database]\nurl = \"postgres://localhost/customers\"\n").unwrap();
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 1);
        assert!(!cfg.database.auto_create_schema);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        cfg.database.validate().unwrap();
    }

    #[test]
    fn parse_reads_json_logging() {
        let cfg = parse("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn validate_rejects_unknown_scheme() {
        let cfg = DatabaseConfig { url: "mysql://localhost/db".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_pool_bounds() {
        let cfg = DatabaseConfig {
            url: "sqlite::memory:".into(),
            min_connections: 5,
            max_connections: 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeouts() {
        let cfg = DatabaseConfig { url: "sqlite::memory:".into(), acquire_timeout_secs: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn explicit_url_survives_normalize() {
        let mut cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
        cfg.normalize_from_env();
        assert_eq!(cfg.url, "sqlite::memory:");
    }

    fn temp_config(name: &str, content: Option<&str>) -> String {
        let path = std::env::temp_dir().join(format!("customers_{}_{}.toml", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        if let Some(c) = content {
            std::fs::write(&path, c).unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = temp_config("missing", None);
        let cfg = AppConfig::load_and_validate_from(&path).unwrap();
        assert!(!cfg.database.url.is_empty());
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_config(
            "malformed",
            Some("[database]\nurl = \"postgres://prod/customers\"\nmax_connections = \"ten\"\n"),
        );
        assert!(AppConfig::load_and_validate_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn valid_file_is_used_over_env() {
        let path = temp_config("valid", Some("[database]\nurl = \"postgres://prod/customers\"\n[logging]\nformat = \"json\"\n"));
        let cfg = AppConfig::load_and_validate_from(&path).unwrap();
        assert_eq!(cfg.database.url, "postgres://prod/customers");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn log_format_name_ignores_case() {
        assert_eq!(LogFormat::from_name(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_name(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_name(Some(" Json ")), LogFormat::Json);
        assert_eq!(LogFormat::from_name(Some("compact")), LogFormat::Compact);
        assert_eq!(LogFormat::from_name(None), LogFormat::Compact);
    }
}
