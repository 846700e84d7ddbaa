//! Language registry: Single source of truth for all recognized languages.
//!
//! The registry maps the short keys a user types in a query (`fr`, `en`, ...)
//! to language descriptors. It is built once on first access with `OnceLock`
//! and never changes afterwards.

use crate::i18n::LanguageDescriptor;
use std::sync::OnceLock;

/// Key of the auto-detect sentinel entry.
pub const AUTO_KEY: &str = "??";

/// Global language registry singleton.
///
/// Entries are kept in declaration order so that `all()` can be used directly
/// for UI enumeration (the sentinel comes first).
pub struct LanguageRegistry {
    keys: Vec<&'static str>,
    descriptors: Vec<LanguageDescriptor>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| {
            let (keys, descriptors) = default_languages().into_iter().unzip();
            LanguageRegistry { keys, descriptors }
        })
    }

    /// Look up a descriptor by registry key.
    ///
    /// Keys are compared verbatim: `"FR"` is not `"fr"`.
    pub fn lookup(&self, key: &str) -> Option<&LanguageDescriptor> {
        let index = self.keys.iter().position(|k| *k == key)?;
        self.descriptors.get(index)
    }

    /// Check whether `key` is a registry key (the `??` sentinel included).
    pub fn is_valid(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// All descriptors in registry order.
    ///
    /// # Returns
    /// A borrowed slice of the registry table; nothing is allocated per call.
    pub fn all(&self) -> &[LanguageDescriptor] {
        &self.descriptors
    }

    /// Human-readable label for a registry key.
    pub fn display_name(&self, key: &str) -> Option<&'static str> {
        self.lookup(key).map(|descriptor| descriptor.display_name())
    }

    /// Find a descriptor by its language code rather than its key.
    ///
    /// Only differs from `lookup` for the sentinel, whose code is `auto`.
    pub fn find_by_code(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.code() == code)
    }

    /// The auto-detect sentinel.
    pub fn auto(&self) -> LanguageDescriptor {
        self.lookup(AUTO_KEY)
            .copied()
            .unwrap_or(LanguageDescriptor::AUTO)
    }
}

/// Default language table.
fn default_languages() -> Vec<(&'static str, LanguageDescriptor)> {
    const TABLE: &[(&str, &str, &str)] = &[
        (AUTO_KEY, "auto", "Auto"),
        ("ar", "ar", "Arab"),
        ("be", "be", "Belarusian"),
        ("ca", "ca", "Catalan"),
        ("cs", "cs", "Czech"),
        ("da", "da", "Danish"),
        ("de", "de", "German"),
        ("en", "en", "English"),
        ("eo", "eo", "Esperanto"),
        ("es", "es", "Spanish"),
        ("et", "et", "Estonian"),
        ("fa", "fa", "Persian"),
        ("fi", "fi", "Finnish"),
        ("fr", "fr", "French"),
        ("ga", "ga", "Irish"),
        ("he", "he", "Hebrew"),
        ("hi", "hi", "Hindi"),
        ("hu", "hu", "Hungarian"),
        ("id", "id", "Indonesian"),
        ("is", "is", "Icelandic"),
        ("it", "it", "Italian"),
        ("ja", "ja", "Japanese"),
        ("kk", "kk", "Kazakh"),
        ("ko", "ko", "Korean"),
        ("ky", "ky", "Kyrgyz"),
        ("lt", "lt", "Lithuanian"),
        ("lv", "lv", "Latvian"),
        ("nl", "nl", "Dutch"),
        ("no", "no", "Norwegian"),
        ("pl", "pl", "Polish"),
        ("pt", "pt", "Portuguese"),
        ("ro", "ro", "Romanian"),
        ("ru", "ru", "Russian"),
        ("sk", "sk", "Slovak"),
        ("sl", "sl", "Slovenian"),
        ("sv", "sv", "Swedish"),
        ("th", "th", "Thai"),
        ("tr", "tr", "Turkish"),
        ("uk", "uk", "Ukrainian"),
        ("vi", "vi", "Vietnamese"),
        ("yi", "yi", "Yiddish"),
        ("zh", "zh", "Chinese"),
    ];

    TABLE
        .iter()
        .map(|&(key, code, name)| (key, LanguageDescriptor::new(code, name)))
        .collect()
}
