use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{CrossbotError, Result};
use crate::types::Platform;

pub const DEFAULT_REGISTRY_CAPACITY: usize = 10_000;
pub const DEFAULT_CALLBACK_TTL_SECS: u64 = 3600; // 1 hour

/// Top-level config (crossbot.toml + CROSSBOT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossbotConfig {
    /// Stable bot identifier, used to namespace per-bot state.
    pub id: String,
    /// Human-readable bot name.
    pub name: String,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub platforms: PlatformsConfig,
}

/// Bounds for the callback registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of live callbacks before the oldest are evicted.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Seconds a callback stays resolvable. `0` disables expiry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_REGISTRY_CAPACITY,
            ttl_secs: DEFAULT_CALLBACK_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformsConfig {
    pub telegram: Option<TelegramConfig>,
    pub discord: Option<DiscordConfig>,
    pub guilded: Option<GuildedConfig>,
}

impl PlatformsConfig {
    /// Platforms that have a configuration section, in a fixed order.
    pub fn enabled(&self) -> Vec<Platform> {
        let mut out = Vec::new();
        if self.discord.is_some() {
            out.push(Platform::Discord);
        }
        if self.telegram.is_some() {
            out.push(Platform::Telegram);
        }
        if self.guilded.is_some() {
            out.push(Platform::Guilded);
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Username without the leading `@`; stripped from `/cmd@username` invocations.
    #[serde(default)]
    pub bot_username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub application_id: String,
    pub bot_token: String,
    /// Gateway intents bitfield, passed through untouched.
    #[serde(default)]
    pub intents: u64,
    /// Activity type code, passed through untouched.
    #[serde(default)]
    pub activity_type: u8,
    #[serde(default)]
    pub activity_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildedConfig {
    pub bot_token: String,
}

fn default_capacity() -> usize {
    DEFAULT_REGISTRY_CAPACITY
}
fn default_ttl_secs() -> u64 {
    DEFAULT_CALLBACK_TTL_SECS
}

impl CrossbotConfig {
    /// Load config from a TOML file with CROSSBOT_* env var overrides, then validate it.
    ///
    /// Nested keys use a double underscore in the environment, e.g.
    /// `CROSSBOT_PLATFORMS__TELEGRAM__BOT_TOKEN`.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: CrossbotConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("CROSSBOT_").split("__"))
            .extract()
            .map_err(|e| CrossbotError::Config(e.to_string()))?;

        config.validate()?;
        tracing::debug!(path = %path, id = %config.id, "configuration loaded");
        Ok(config)
    }

    /// Reject configs that cannot start a single platform.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CrossbotError::Config("id must be specified".into()));
        }
        if self.name.trim().is_empty() {
            return Err(CrossbotError::Config("name must be specified".into()));
        }
        if self.platforms.enabled().is_empty() {
            return Err(CrossbotError::Config(
                "no platform configuration specified".into(),
            ));
        }
        if self.registry.capacity == 0 {
            return Err(CrossbotError::Config(
                "registry.capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.crossbot/crossbot.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn minimal() -> CrossbotConfig {
        CrossbotConfig {
            id: "bot".into(),
            name: "Bot".into(),
            registry: RegistryConfig::default(),
            platforms: PlatformsConfig {
                guilded: Some(GuildedConfig {
                    bot_token: "t".into(),
                }),
                ..PlatformsConfig::default()
            },
        }
    }

    #[test]
    fn minimal_config_is_valid() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut cfg = minimal();
        cfg.id = " ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("id must be specified"));
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut cfg = minimal();
        cfg.name.clear();
        assert_eq!(cfg.validate().unwrap_err().code(), "CONFIG_ERROR");
    }

    #[test]
    fn no_platform_is_rejected() {
        let mut cfg = minimal();
        cfg.platforms = PlatformsConfig::default();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("no platform"));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut cfg = minimal();
        cfg.registry.capacity = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn enabled_platforms_follow_sections() {
        let mut cfg = minimal();
        cfg.platforms.telegram = Some(TelegramConfig {
            bot_token: "t".into(),
            bot_username: "crossbot".into(),
        });
        assert_eq!(
            cfg.platforms.enabled(),
            vec![Platform::Telegram, Platform::Guilded]
        );
    }

    #[test]
    fn load_merges_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "crossbot.toml",
                r#"
                id = "demo"
                name = "Demo"

                [registry]
                ttl_secs = 60

                [platforms.telegram]
                bot_token = "from-file"
                bot_username = "demo_bot"
                "#,
            )?;
            jail.set_env("CROSSBOT_PLATFORMS__TELEGRAM__BOT_TOKEN", "from-env");

            let cfg = CrossbotConfig::load(Some("crossbot.toml")).expect("config loads");
            assert_eq!(cfg.id, "demo");
            assert_eq!(cfg.registry.ttl_secs, 60);
            assert_eq!(cfg.registry.capacity, DEFAULT_REGISTRY_CAPACITY);
            let tg = cfg.platforms.telegram.expect("telegram section");
            assert_eq!(tg.bot_token, "from-env");
            assert_eq!(tg.bot_username, "demo_bot");
            Ok(())
        });
    }

    #[test]
    fn load_rejects_invalid_file() {
        Jail::expect_with(|jail| {
            jail.create_file("crossbot.toml", r#"id = "demo""#)?;
            assert!(CrossbotConfig::load(Some("crossbot.toml")).is_err());
            Ok(())
        });
    }
}
