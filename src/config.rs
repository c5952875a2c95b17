use std::str::FromStr;

use crate::domain::novelty::NoveltyValues;
use crate::domain::stamp::TimestampFormat;
use crate::error::ConfigError;

/// What the long-lived `visit` cookie is rewritten with on a cache miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitCookieValue {
    /// The previous visit that was just resolved; mirrors the cache cookie.
    #[default]
    Previous,
    /// The current request time, so the baseline moves forward once the cache
    /// cookie expires.
    RequestTime,
}

impl FromStr for VisitCookieValue {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "previous" => Ok(Self::Previous),
            "request-time" | "now" => Ok(Self::RequestTime),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoveltySettings {
    /// Name of the virtual attribute records expose.
    pub novelty_attribute: String,
    pub visit_cookie: String,
    /// Seconds.
    pub visit_stamina: u32,
    pub cache_cookie: String,
    /// Seconds.
    pub cache_stamina: u32,
    pub timestamp_format: TimestampFormat,
    pub novelty_values: NoveltyValues,
    pub visit_value: VisitCookieValue,
}

impl Default for NoveltySettings {
    fn default() -> Self {
        Self {
            novelty_attribute: "novelty".to_owned(),
            visit_cookie: "visit".to_owned(),
            visit_stamina: default_visit_stamina(),
            cache_cookie: "visit-cache".to_owned(),
            cache_stamina: default_cache_stamina(),
            timestamp_format: TimestampFormat::Unix,
            novelty_values: NoveltyValues::default(),
            visit_value: VisitCookieValue::Previous,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub novelty: NoveltySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self { port: default_port(), novelty: NoveltySettings::default() }
    }
}

fn default_port() -> u16 { 8080 }
fn default_visit_stamina() -> u32 { 31_536_000 } // one year
fn default_cache_stamina() -> u32 { 1_800 } // 30 minutes

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = NoveltySettings::default();

        let timestamp_format = match lookup("NOVELTY_TIMESTAMP_FORMAT") {
            Some(raw) => TimestampFormat::parse(&raw).map_err(|e| ConfigError::Format(raw, e))?,
            None => defaults.timestamp_format,
        };
        let novelty_values = match lookup("NOVELTY_VALUES") {
            Some(raw) => serde_json::from_str(&raw)?,
            None => defaults.novelty_values,
        };

        let novelty = NoveltySettings {
            novelty_attribute: lookup("NOVELTY_ATTRIBUTE").unwrap_or(defaults.novelty_attribute),
            visit_cookie: lookup("NOVELTY_VISIT_COOKIE").unwrap_or(defaults.visit_cookie),
            visit_stamina: parsed(&lookup, "NOVELTY_VISIT_STAMINA", defaults.visit_stamina)?,
            cache_cookie: lookup("NOVELTY_CACHE_COOKIE").unwrap_or(defaults.cache_cookie),
            cache_stamina: parsed(&lookup, "NOVELTY_CACHE_STAMINA", defaults.cache_stamina)?,
            timestamp_format,
            novelty_values,
            visit_value: parsed(&lookup, "NOVELTY_VISIT_VALUE", defaults.visit_value)?,
        };

        if novelty.visit_cookie == novelty.cache_cookie {
            return Err(ConfigError::Invalid {
                key: "NOVELTY_CACHE_COOKIE",
                value: novelty.cache_cookie,
            });
        }

        Ok(Self { port: parsed(&lookup, "PORT", default_port())?, novelty })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
