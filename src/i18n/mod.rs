//! Internationalization (i18n) module: the set of languages a query may name.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all recognized language keys
//! - `language`: Immutable `LanguageDescriptor` value type
//! - `metrics`: Translation cache and API counters
//!
//! # Example
//!
//! ```rust
//! use tr_query::i18n::LanguageRegistry;
//!
//! let registry = LanguageRegistry::get();
//! assert!(registry.is_valid("fr"));
//! assert_eq!(registry.display_name("fr"), Some("French"));
//! ```

mod language;
mod metrics;
mod registry;

pub use language::LanguageDescriptor;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageRegistry, AUTO_KEY};
