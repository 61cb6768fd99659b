use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::period::Period;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Owner id stamped on every record and goal written by this install.
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub stats: StatsSettings,
    #[serde(default)]
    pub log: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            profile: Profile::default(),
            stats: StatsSettings::default(),
            log: LogSettings::default(),
        }
    }
}

fn default_owner() -> String {
    "local".to_string()
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StatsSettings {
    /// Period used by `stats` when none is given on the command line.
    #[serde(default, deserialize_with = "lenient_period")]
    pub default_period: Period,
}

/// Unknown period keywords in the file fall back to month instead of
/// failing the whole config load.
fn lenient_period<'de, D>(deserializer: D) -> Result<Period, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = toml::Value::deserialize(deserializer)?;
    let period = match raw.as_str().map(str::parse::<Period>) {
        Some(Ok(p)) => p,
        _ => {
            tracing::warn!(value = %raw, "invalid stats.default_period, using month");
            Period::default()
        }
    };
    Ok(period)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;

            file.write_all(contents.as_bytes())?;

            // Permissions are fixed after the write so a failure here cannot
            // leave an empty config behind.
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Apply a `key = value` update from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "owner" => {
                if value.trim().is_empty() {
                    anyhow::bail!("owner must not be empty");
                }
                self.owner = value.trim().to_string();
            }
            "name" => self.profile.name = Some(value.trim().to_string()),
            "age" => {
                let age: u8 = value.parse()?;
                if !(1..=150).contains(&age) {
                    anyhow::bail!("age must be between 1 and 150");
                }
                self.profile.age = Some(age);
            }
            "gender" => match value {
                "male" | "female" | "other" => self.profile.gender = Some(value.to_string()),
                _ => anyhow::bail!("gender must be male, female, or other"),
            },
            "height" => {
                let h: f64 = value.parse()?;
                if h < 0.0 {
                    anyhow::bail!("height must not be negative");
                }
                self.profile.height_cm = Some(h);
            }
            "activity_level" => match value {
                "sedentary" | "light" | "moderate" | "active" => {
                    self.profile.activity_level = Some(value.to_string())
                }
                _ => anyhow::bail!("activity_level must be sedentary, light, moderate, or active"),
            },
            "stats.default_period" => self.stats.default_period = value.parse()?,
            "log.level" => self.log.level = value.to_string(),
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("VITALSTATS_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitalstats")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
