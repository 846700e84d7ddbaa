//! Language descriptor: plain immutable value for one registry entry.

use std::fmt;

/// A language known to the registry.
///
/// Rendering a descriptor with `Display` yields its display name, which is
/// the label the host shows in language pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageDescriptor {
    /// Code sent to the translation backend (e.g., "fr", or "auto")
    code: &'static str,

    /// English name of the language (e.g., "French")
    display_name: &'static str,
}

impl LanguageDescriptor {
    /// The auto-detect descriptor.
    pub const AUTO: LanguageDescriptor = LanguageDescriptor {
        code: "auto",
        display_name: "Auto",
    };

    pub const fn new(code: &'static str, display_name: &'static str) -> Self {
        Self { code, display_name }
    }

    /// Get the language code understood by the backend.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the human-readable label.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Whether this is the auto-detect sentinel.
    pub fn is_auto(&self) -> bool {
        self.code == Self::AUTO.code
    }
}

impl fmt::Display for LanguageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name)
    }
}
