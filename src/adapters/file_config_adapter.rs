//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// INI-backed [`ConfigPort`] for the `[account]`, `[data]` and
/// `[timeframes]` sections. Typed getters parse from the raw string
/// value so every malformed entry falls back the same way: to the
/// caller's default.
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        match config.load(path) {
            Ok(_) => Ok(Self { config }),
            Err(reason) => Err(std::io::Error::other(reason)),
        }
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse<T: std::str::FromStr>(&self, section: &str, key: &str) -> Option<T> {
        self.config.get(section, key)?.trim().parse().ok()
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.parse(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.parse(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.config.get(section, key).map(|v| v.to_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "yes" | "1") => true,
            Some(v) if matches!(v.as_str(), "false" | "no" | "0") => false,
            _ => default,
        }
    }
}
