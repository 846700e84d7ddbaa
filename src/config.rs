use crate::cache::DEFAULT_CAPACITY;
use crate::i18n::{LanguageDescriptor, LanguageRegistry};
use crate::translation::GOOGLE_TRANSLATE_URL;
use anyhow::{bail, Context, Result};
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Translation backend
    pub translate_api_url: String,

    // Defaults used when a query omits language codes
    pub default_source_language: LanguageDescriptor,
    pub default_target_language: LanguageDescriptor,

    // Response cache
    pub cache_capacity: NonZeroUsize,
    pub cache_ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source (the environment in production).
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_capacity = match var("TRANSLATION_CACHE_CAPACITY") {
            Some(value) => {
                let parsed: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid TRANSLATION_CACHE_CAPACITY: '{}'", value))?;
                NonZeroUsize::new(parsed).context("TRANSLATION_CACHE_CAPACITY must be > 0")?
            }
            None => NonZeroUsize::new(DEFAULT_CAPACITY).context("Default cache capacity is 0")?,
        };

        let cache_ttl = var("TRANSLATION_CACHE_TTL_SECS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("Invalid TRANSLATION_CACHE_TTL_SECS: '{}'", value))
            })
            .transpose()?;

        Ok(Self {
            translate_api_url: var("TRANSLATE_API_URL")
                .unwrap_or_else(|| GOOGLE_TRANSLATE_URL.to_string()),

            default_source_language: match var("DEFAULT_SOURCE_LANGUAGE") {
                Some(value) => parse_language(&value).context("DEFAULT_SOURCE_LANGUAGE")?,
                None => LanguageRegistry::get().auto(),
            },
            default_target_language: match var("DEFAULT_TARGET_LANGUAGE") {
                Some(value) => parse_language(&value).context("DEFAULT_TARGET_LANGUAGE")?,
                None => LanguageRegistry::get().auto(),
            },

            cache_capacity,
            cache_ttl,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translate_api_url: GOOGLE_TRANSLATE_URL.to_string(),
            default_source_language: LanguageDescriptor::AUTO,
            default_target_language: LanguageDescriptor::AUTO,
            cache_capacity: NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            cache_ttl: None,
        }
    }
}

/// Parse a language given either as a registry key (`fr`, `??`) or a code (`auto`).
pub fn parse_language(value: &str) -> Result<LanguageDescriptor> {
    let registry = LanguageRegistry::get();
    let value = value.trim();

    match registry.lookup(value).or_else(|| registry.find_by_code(value)) {
        Some(descriptor) => Ok(*descriptor),
        None => bail!("Unknown language code: '{}'", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("Should succeed");

        assert_eq!(config.translate_api_url, GOOGLE_TRANSLATE_URL);
        assert!(config.default_source_language.is_auto());
        assert!(config.default_target_language.is_auto());
        assert_eq!(config.cache_capacity.get(), DEFAULT_CAPACITY);
        assert_eq!(config.cache_ttl, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TRANSLATE_API_URL", "http://localhost:1234/t"),
            ("DEFAULT_SOURCE_LANGUAGE", "en"),
            ("DEFAULT_TARGET_LANGUAGE", "ja"),
            ("TRANSLATION_CACHE_CAPACITY", "16"),
            ("TRANSLATION_CACHE_TTL_SECS", "60"),
        ])
        .expect("Should succeed");

        assert_eq!(config.translate_api_url, "http://localhost:1234/t");
        assert_eq!(config.default_source_language.code(), "en");
        assert_eq!(config.default_target_language.code(), "ja");
        assert_eq!(config.cache_capacity.get(), 16);
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let err = config_from(&[("DEFAULT_TARGET_LANGUAGE", "xx")]).unwrap_err();
        assert!(format!("{:#}", err).contains("DEFAULT_TARGET_LANGUAGE"));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(config_from(&[("TRANSLATION_CACHE_CAPACITY", "0")]).is_err());
        assert!(config_from(&[("TRANSLATION_CACHE_CAPACITY", "lots")]).is_err());
    }

    #[test]
    fn test_invalid_ttl_is_rejected() {
        assert!(config_from(&[("TRANSLATION_CACHE_TTL_SECS", "-5")]).is_err());
    }

    #[test]
    fn test_parse_language_accepts_key_or_code() {
        assert_eq!(parse_language("??").unwrap(), LanguageDescriptor::AUTO);
        assert_eq!(parse_language("auto").unwrap(), LanguageDescriptor::AUTO);
        assert_eq!(parse_language(" fr ").unwrap().display_name(), "French");
        assert!(parse_language("").is_err());
    }

    #[test]
    fn test_default_matches_empty_environment() {
        let from_vars = config_from(&[]).unwrap();
        let default = Config::default();
        assert_eq!(from_vars.translate_api_url, default.translate_api_url);
        assert_eq!(from_vars.cache_capacity, default.cache_capacity);
    }
}
