use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::page::{Sort, DEFAULT_SORT};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
pub const ITEMS_PER_PAGE: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub items_per_page: u32,
    pub sort: Sort,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            items_per_page: ITEMS_PER_PAGE,
            sort: Sort::default(),
            timeout: None,
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url: String = try_load("PHOTO_API_URL", DEFAULT_API_URL)?;

        let items_per_page: u32 = try_load("ITEMS_PER_PAGE", &ITEMS_PER_PAGE.to_string())?;
        if items_per_page == 0 {
            return Err(Error::Config("ITEMS_PER_PAGE must be positive".to_string()));
        }

        let timeout = match var("PHOTO_API_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.parse().map_err(|e| {
                Error::Config(format!("invalid PHOTO_API_TIMEOUT_SECS value: {e}"))
            })?)),
            None => None,
        };

        Ok(Config {
            api_url,
            api_token: var("PHOTO_API_TOKEN").filter(|token| !token.is_empty()),
            items_per_page,
            sort: try_load("PHOTO_SORT", DEFAULT_SORT)?,
            timeout,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        Error::Config(format!("invalid {key} value {raw:?}: {e}"))
    })
}
