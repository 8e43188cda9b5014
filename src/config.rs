use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Upper bound on groups processed at once by board/list fan-out.
    pub board_concurrency: usize,
    /// Extra attempts for a read-modify-write that hit a version conflict.
    pub max_update_retries: u32,
    pub request_timeout_secs: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env_or("PORT", 3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            board_concurrency: env_or("BOARD_CONCURRENCY", 8),
            max_update_retries: env_or("MAX_UPDATE_RETRIES", 5),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
