//! Default language settings.
//!
//! The resolver reads the default pair on every query through
//! `SettingsProvider`, so changes apply to the next keystroke. `Settings`
//! keeps the pair in a `watch` channel; `subscribe()` is the hook the host
//! uses to learn that cached search results are stale.

use crate::config::{parse_language, Config};
use crate::i18n::LanguageDescriptor;
use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

/// Source of the default language pair.
pub trait SettingsProvider: Send + Sync {
    fn default_source_language(&self) -> LanguageDescriptor;
    fn default_target_language(&self) -> LanguageDescriptor;
}

/// Current default pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultLanguages {
    pub source: LanguageDescriptor,
    pub target: LanguageDescriptor,
}

impl Default for DefaultLanguages {
    fn default() -> Self {
        Self {
            source: LanguageDescriptor::AUTO,
            target: LanguageDescriptor::AUTO,
        }
    }
}

/// In-memory settings with change notification.
#[derive(Debug)]
pub struct Settings {
    defaults: watch::Sender<DefaultLanguages>,
}

impl Settings {
    pub fn new(source: LanguageDescriptor, target: LanguageDescriptor) -> Self {
        let (defaults, _) = watch::channel(DefaultLanguages { source, target });
        Self { defaults }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.default_source_language,
            config.default_target_language,
        )
    }

    pub fn snapshot(&self) -> DefaultLanguages {
        *self.defaults.borrow()
    }

    /// Change the default source language (registry key or code).
    pub fn set_default_source(&self, value: &str) -> Result<()> {
        let language = parse_language(value)?;
        self.update(|defaults| defaults.source = language);
        Ok(())
    }

    /// Change the default target language (registry key or code).
    pub fn set_default_target(&self, value: &str) -> Result<()> {
        let language = parse_language(value)?;
        self.update(|defaults| defaults.target = language);
        Ok(())
    }

    /// Receiver that is notified whenever the defaults change.
    pub fn subscribe(&self) -> watch::Receiver<DefaultLanguages> {
        self.defaults.subscribe()
    }

    fn update(&self, change: impl FnOnce(&mut DefaultLanguages)) {
        let changed = self.defaults.send_if_modified(|defaults| {
            let before = *defaults;
            change(defaults);
            *defaults != before
        });

        if changed {
            let defaults = self.snapshot();
            info!(
                "Default languages changed: {} -> {}",
                defaults.source, defaults.target
            );
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = DefaultLanguages::default();
        Self::new(defaults.source, defaults.target)
    }
}

impl SettingsProvider for Settings {
    fn default_source_language(&self) -> LanguageDescriptor {
        self.snapshot().source
    }

    fn default_target_language(&self) -> LanguageDescriptor {
        self.snapshot().target
    }
}
