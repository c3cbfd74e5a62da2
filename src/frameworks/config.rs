use crate::domain::Tuning;
use std::{env, fmt, fs, path::Path, time::Duration};

// Runtime/server constants and env overrides. Gameplay tuning lives in `domain::tuning`.

pub fn http_port() -> u16 {
    env::var("ARENA_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn tick_hz() -> u32 {
    env::var("ARENA_TICK_HZ")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|hz| (1..=1000).contains(hz))
        .unwrap_or(60)
}

pub fn tick_interval() -> Duration {
    Duration::from_millis(1000 / u64::from(tick_hz()))
}

/// Optional fixed RNG seed for reproducible arenas.
pub fn rng_seed() -> Option<u64> {
    env::var("ARENA_SEED").ok().and_then(|v| v.parse().ok())
}

/// How often (in ticks) the default sink logs a world summary.
pub fn summary_every_ticks() -> u64 {
    env::var("ARENA_SUMMARY_EVERY_TICKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(u64::from(tick_hz()) * 10)
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const WORLD_BROADCAST_CAPACITY: usize = 128;
pub const NOTICE_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            ConfigError::Parse { path, source } => write!(f, "failed to parse {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parses a tuning file; fields it omits keep their defaults.
pub fn parse_tuning(text: &str, path: &str) -> Result<Tuning, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

pub fn load_tuning_file(path: &Path) -> Result<Tuning, ConfigError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    parse_tuning(&text, &display)
}

/// Tuning from `ARENA_TUNING_PATH` if set, otherwise the built-in defaults.
pub fn load_tuning() -> Result<Tuning, ConfigError> {
    match env::var("ARENA_TUNING_PATH") {
        Ok(path) if !path.trim().is_empty() => load_tuning_file(Path::new(path.trim())),
        _ => Ok(Tuning::default()),
    }
}
