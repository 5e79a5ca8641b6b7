use anyhow::{Context, Result};
use common_auth::TokenConfig;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub token: TokenConfig,
    pub payment: PaymentConfig,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub api_url: String,
    pub timeout_seconds: u64,
}

pub fn load_config() -> Result<AppConfig> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    let payment_secret_key =
        env::var("PAYMENT_SECRET_KEY").context("PAYMENT_SECRET_KEY must be set")?;

    let mut token = TokenConfig::new(secret);
    if let Some(ttl) = i64_from_env("JWT_TTL_SECONDS") {
        token = token.with_ttl(ttl);
    }
    if let Some(leeway) = u64_from_env("JWT_LEEWAY_SECONDS") {
        token = token.with_leeway(leeway);
    }

    let payment = PaymentConfig {
        secret_key: payment_secret_key,
        api_url: env::var("PAYMENT_API_URL")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        timeout_seconds: u64_from_env("PAYMENT_TIMEOUT_SECONDS").unwrap_or(10),
    };

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(5000);

    let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|value| parse_origins(&value))
        .unwrap_or_else(default_origins);

    Ok(AppConfig {
        database_url,
        host,
        port,
        token,
        payment,
        cors_allowed_origins,
    })
}

fn i64_from_env(key: &str) -> Option<i64> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

fn u64_from_env(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(|c| c == ',' || c == ';' || c == ' ')
        .filter_map(|item| {
            let origin = item.trim();
            if origin.is_empty() {
                None
            } else {
                Some(origin.to_string())
            }
        })
        .collect()
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://a.test, http://b.test;http://c.test");
        assert_eq!(
            origins,
            vec!["http://a.test", "http://b.test", "http://c.test"]
        );
    }

    #[test]
    fn parse_origins_drops_empty_entries() {
        let origins = parse_origins(" , ;");
        assert!(origins.is_empty());
    }
}
