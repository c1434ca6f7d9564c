use anyhow::{Context, Result};
use axum::http::HeaderValue;
use platform_db::DatabaseSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database =
            DatabaseSettings::from_lookup(&lookup).context("invalid database configuration")?;

        let cors_allowed_origins =
            parse_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            database,
            cors_allowed_origins,
        })
    }
}

/// Comma separated origins; a `*` entry anywhere opens CORS to every origin.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>> {
    let entries = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>();
    if entries.contains(&"*") {
        return Ok(Vec::new());
    }
    entries
        .into_iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_origin_by_default() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.database, DatabaseSettings::default());
    }

    #[test]
    fn wildcard_collapses_to_any_origin() {
        let config = AppConfig::from_lookup(|key| {
            (key == "CORS_ALLOWED_ORIGINS").then(|| " * ".to_string())
        })
        .unwrap();
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn wildcard_among_origins_means_any() {
        let config = AppConfig::from_lookup(|key| {
            (key == "CORS_ALLOWED_ORIGINS").then(|| "http://a.example.com,*".to_string())
        })
        .unwrap();
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn unparsable_origin_fails_loading() {
        let err = AppConfig::from_lookup(|key| {
            (key == "CORS_ALLOWED_ORIGINS").then(|| "http://ok.example.com,bad\norigin".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("invalid CORS origin"));
    }

    #[test]
    fn parses_origin_list() {
        let config = AppConfig::from_lookup(|key| match key {
            "CORS_ALLOWED_ORIGINS" => Some("http://localhost:3000, ,https://hr.example.com".into()),
            "DATABASE_URL" => Some("postgres://hr@db/hr".into()),
            _ => None,
        })
        .unwrap();
        let origins = config
            .cors_allowed_origins
            .iter()
            .map(|origin| origin.to_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(origins, vec!["http://localhost:3000", "https://hr.example.com"]);
        assert_eq!(config.database.url, "postgres://hr@db/hr");
    }

    #[test]
    fn bad_pool_size_fails_loading() {
        let result = AppConfig::from_lookup(|key| {
            (key == "DATABASE_MAX_CONNECTIONS").then(|| "lots".to_string())
        });
        assert!(result.is_err());
    }
}
