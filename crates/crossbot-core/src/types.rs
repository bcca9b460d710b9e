use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::CrossbotError;

/// Field key carrying the sender's display identity. Always injected by the
/// dispatcher; user input can never set it.
pub const USER_KEY: &str = "user";

/// Field key carrying the display form of the originating [`Platform`].
pub const PLATFORM_KEY: &str = "platform";

/// Chat platform an invocation came from.
///
/// The numeric codes are the legacy wire form still accepted by
/// [`Platform::from_str`](std::str::FromStr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Undefined,
    Discord,
    Telegram,
    Guilded,
}

impl Platform {
    pub fn code(&self) -> u8 {
        match self {
            Platform::Undefined => 0,
            Platform::Discord => 1,
            Platform::Telegram => 2,
            Platform::Guilded => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Undefined => "undefined",
            Platform::Discord => "discord",
            Platform::Telegram => "telegram",
            Platform::Guilded => "guilded",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = CrossbotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undefined" | "0" => Ok(Platform::Undefined),
            "discord" | "1" => Ok(Platform::Discord),
            "telegram" | "2" => Ok(Platform::Telegram),
            "guilded" | "3" => Ok(Platform::Guilded),
            _ => Err(CrossbotError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Ordered string-to-string map handed to handlers and stored in callback
/// payloads.
///
/// Keys are kept sorted, so the JSON form produced by [`FieldMap::to_payload`]
/// is byte-for-byte deterministic for equal maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overwrite the reserved `user` and `platform` keys.
    ///
    /// Called after tokenizing so that context always wins over whatever the
    /// sender typed.
    pub fn inject_context(&mut self, user: &str, platform: Platform) {
        self.insert(USER_KEY, user);
        self.insert(PLATFORM_KEY, platform.to_string());
    }

    /// Serialize to the compact JSON object stored in a callback.
    pub fn to_payload(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a callback payload produced by [`FieldMap::to_payload`].
    ///
    /// An empty payload is treated as an empty map.
    pub fn from_payload(payload: &str) -> crate::error::Result<Self> {
        if payload.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(Self(serde_json::from_str(payload)?))
    }

    /// Stable key built from every `key:value` pair in key order, joined with `-`.
    ///
    /// Handlers use it to name cached results for a given set of inputs.
    pub fn cache_key(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
