use std::{env, fmt::Display, str::FromStr};

use ideaswipe_core::AiSettings;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub port: u16,
    pub ai: AiSettings,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("IDEASWIPE_PORT", DEFAULT_PORT),
            ai: ideaswipe_core::read_settings(),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
