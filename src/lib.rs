//! Recognizes `tr[anslate] [src] [dst]: text` search queries, resolves the
//! language pair against configured defaults, annotates the typed tokens for
//! highlighting and dispatches the query to a translation backend.
//!
//! ```rust
//! use tr_query::i18n::LanguageDescriptor;
//! use tr_query::pattern::PatternMatcher;
//! use tr_query::resolver::resolve;
//!
//! let raw = PatternMatcher::new().match_input("tr en fr: hello").unwrap();
//! let intent = resolve(&raw, &LanguageDescriptor::AUTO, &LanguageDescriptor::AUTO).unwrap();
//! assert_eq!(intent.source_lang_code, "en");
//! assert_eq!(intent.target_lang_code, "fr");
//! assert_eq!(intent.query_text, " hello");
//! ```

pub mod cache;
pub mod config;
pub mod highlight;
pub mod i18n;
pub mod pattern;
pub mod resolver;
pub mod search;
pub mod settings;
pub mod translation;
