//! Process configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `DATABASE_URL` | built from `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASS`/`DB_NAME` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `SONG_DATA_API_ADDR` | required |
//! | `SONG_DATA_TIMEOUT_MS` | `1000` |
//! | `MIGRATE_ON_START` | `false` |
//! | `ENV` | `DEV` |

use std::collections::HashMap;
use std::time::Duration;

use songbook_core::{defaults, Error, Result};
use songbook_enrichment::SongDataConfig;

/// Deployment environment, selects logging defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_uppercase).as_deref() {
            Some("PROD") | Some("PRODUCTION") => Environment::Prod,
            _ => Environment::Dev,
        }
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub song_data: SongDataConfig,
    pub migrate_on_start: bool,
    pub env: Environment,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url.to_string(),
            None => database_url_from_parts(
                get("DB_HOST").unwrap_or(defaults::DB_HOST),
                parse_or("DB_PORT", get("DB_PORT"), defaults::DB_PORT)?,
                get("DB_USER").unwrap_or(defaults::DB_NAME),
                get("DB_PASS"),
                get("DB_NAME").unwrap_or(defaults::DB_NAME),
            ),
        };

        let song_data_addr = get("SONG_DATA_API_ADDR")
            .ok_or_else(|| Error::Config("SONG_DATA_API_ADDR is not set".to_string()))?;
        let timeout_ms = parse_or(
            "SONG_DATA_TIMEOUT_MS",
            get("SONG_DATA_TIMEOUT_MS"),
            defaults::SONG_DATA_TIMEOUT_MS,
        )?;

        Ok(Self {
            host: get("HOST").unwrap_or(defaults::SERVER_HOST).to_string(),
            port: parse_or("PORT", get("PORT"), defaults::SERVER_PORT)?,
            database_url,
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults::DB_MAX_CONNECTIONS,
            )?,
            song_data: SongDataConfig::new(song_data_addr)
                .with_timeout(Duration::from_millis(timeout_ms)),
            migrate_on_start: get("MIGRATE_ON_START")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            env: Environment::parse(get("ENV")),
        })
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(name: &str, value: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} '{}' is invalid: {}", name, v, e))),
        None => Ok(default),
    }
}

fn database_url_from_parts(
    host: &str,
    port: u16,
    user: &str,
    pass: Option<&str>,
    name: &str,
) -> String {
    let credentials = match pass {
        Some(pass) => format!(
            "{}:{}",
            urlencoding::encode(user),
            urlencoding::encode(pass)
        ),
        None => urlencoding::encode(user).into_owned(),
    };
    format!(
        "postgres://{}@{}:{}/{}?sslmode=disable",
        credentials, host, port, name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(vars(&[("SONG_DATA_API_ADDR", "http://songdata")])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.song_data.timeout, Duration::from_millis(1000));
        assert_eq!(
            config.database_url,
            "postgres://songbook@localhost:5432/songbook?sslmode=disable"
        );
        assert!(!config.migrate_on_start);
        assert_eq!(config.env, Environment::Dev);
    }

    #[test]
    fn test_database_url_from_parts_encodes_credentials() {
        let config = AppConfig::from_vars(vars(&[
            ("SONG_DATA_API_ADDR", "http://songdata"),
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_USER", "music"),
            ("DB_PASS", "p@ss word"),
            ("DB_NAME", "library"),
        ]))
        .unwrap();
        assert_eq!(
            config.database_url,
            "postgres://music:p%40ss%20word@db:6543/library?sslmode=disable"
        );
    }

    #[test]
    fn test_database_url_wins_over_parts() {
        let config = AppConfig::from_vars(vars(&[
            ("SONG_DATA_API_ADDR", "http://songdata"),
            ("DATABASE_URL", "postgres://u:p@h/d"),
            ("DB_HOST", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://u:p@h/d");
    }

    #[test]
    fn test_missing_song_data_addr_is_config_error() {
        let err = AppConfig::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_numbers_are_config_errors() {
        for key in ["PORT", "DB_MAX_CONNECTIONS", "SONG_DATA_TIMEOUT_MS", "DB_PORT"] {
            let err = AppConfig::from_vars(vars(&[
                ("SONG_DATA_API_ADDR", "http://songdata"),
                (key, "lots"),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains(key), "{}", key);
        }
    }

    #[test]
    fn test_env_and_flags() {
        let config = AppConfig::from_vars(vars(&[
            ("SONG_DATA_API_ADDR", "http://songdata"),
            ("ENV", "prod"),
            ("MIGRATE_ON_START", "true"),
            ("SONG_DATA_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.env, Environment::Prod);
        assert!(config.migrate_on_start);
        assert_eq!(config.song_data.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_song_data_config_drives_client() {
        let config = AppConfig::from_vars(vars(&[
            ("SONG_DATA_API_ADDR", "http://songdata:8080/"),
            ("SONG_DATA_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();
        let client = songbook_enrichment::HttpSongDataClient::new(config.song_data).unwrap();
        assert_eq!(client.info_url(), "http://songdata:8080/info");
        assert_eq!(client.timeout(), Duration::from_millis(1500));
    }
}
