use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub retention: RetentionConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Where item records are persisted between restarts
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON data file
    pub data_file: PathBuf,
    /// Write the sample records when the data file does not exist yet
    pub seed_sample_data: bool,
}

/// Found-item retention settings
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    /// Found items older than this are evicted
    pub max_age: Duration,
    /// How often the background worker runs
    pub interval: Duration,
    pub run_on_startup: bool,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            retention: RetentionConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    const DEFAULT_DATA_FILE: &'static str = "database.json";

    pub fn from_env() -> Result<Self, String> {
        let data_file = env::var("DATA_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATA_FILE.to_string());

        let seed_sample_data = parse_bool("SEED_SAMPLE_DATA", true)?;

        Ok(Self {
            data_file: PathBuf::from(data_file),
            seed_sample_data,
        })
    }
}

impl RetentionConfig {
    const DEFAULT_MAX_AGE_SECS: u64 = 24 * 60 * 60; // 1 day
    const DEFAULT_INTERVAL_SECS: u64 = 60 * 60; // 1 hour

    pub fn from_env() -> Result<Self, String> {
        let max_age_secs = env::var("RETENTION_MAX_AGE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_AGE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RETENTION_MAX_AGE_SECS must be a valid number".to_string())?;

        let interval_secs = env::var("RETENTION_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RETENTION_INTERVAL_SECS must be a valid number".to_string())?;

        if interval_secs == 0 {
            return Err("RETENTION_INTERVAL_SECS must be greater than zero".to_string());
        }

        let run_on_startup = parse_bool("RETENTION_RUN_ON_STARTUP", true)?;

        Ok(Self {
            max_age: Duration::from_secs(max_age_secs),
            interval: Duration::from_secs(interval_secs),
            run_on_startup,
        })
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(Self::DEFAULT_MAX_AGE_SECS),
            interval: Duration::from_secs(Self::DEFAULT_INTERVAL_SECS),
            run_on_startup: true,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Campus Lost & Found API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the campus lost & found portal".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

fn parse_bool(key: &str, default: bool) -> Result<bool, String> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be a boolean (true/false)", key)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_defaults() {
        let config = RetentionConfig::default();
        assert_eq!(config.max_age, Duration::from_secs(86_400));
        assert_eq!(config.interval, Duration::from_secs(3_600));
        assert!(config.run_on_startup);
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert!(swagger.credentials().is_none());

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials().as_deref(), Some("admin:secret"));
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024,
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }
}
