//! Language resolution: turn a `RawMatch` into a `ResolvedIntent`.
//!
//! Rules, by grammar:
//!
//! - target-only, target valid: (default source, target)
//! - target-only, no target: (default source, default target)
//! - target-only, target invalid: (default source, default source). The
//!   target is still flagged invalid so it highlights as an error.
//! - source+target: both codes verbatim, each flagged valid or invalid.
//!
//! A query that is empty after trimming resolves to nothing.

use crate::highlight::{annotate_chars, AnnotatedField, HighlightSpan, HighlightTag};
use crate::i18n::{LanguageDescriptor, LanguageRegistry};
use crate::pattern::{Grammar, RawMatch, Token};
use crate::translation::TranslationRequest;

/// Fully determined translation intent, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIntent {
    pub source_lang_code: String,
    pub target_lang_code: String,

    /// False only when the user typed a source code that is not a registry key
    pub source_valid: bool,

    /// False only when the user typed a target code that is not a registry key
    pub target_valid: bool,

    /// Everything after the colon, untrimmed
    pub query_text: String,

    pub highlight_spans: Vec<HighlightSpan>,
}

impl ResolvedIntent {
    /// The backend request (and cache key) for this intent.
    pub fn request(&self) -> TranslationRequest {
        TranslationRequest::new(
            &self.source_lang_code,
            &self.target_lang_code,
            &self.query_text,
        )
    }

    /// Whether the user typed a code that is not in the registry.
    ///
    /// Such intents are still dispatched; the bad code is only highlighted.
    pub fn has_errors(&self) -> bool {
        !self.source_valid || !self.target_valid
    }
}

/// One language field after fallback.
struct ResolvedField {
    code: String,
    valid: bool,
    span: Option<std::ops::Range<usize>>,
}

impl ResolvedField {
    fn defaulted(default: &LanguageDescriptor) -> Self {
        Self {
            code: default.code().to_string(),
            valid: true,
            span: None,
        }
    }

    /// A typed code; `fallback` replaces it in the output when it is invalid.
    fn typed(token: &Token<'_>, fallback: Option<&LanguageDescriptor>) -> Self {
        let valid = LanguageRegistry::get().is_valid(token.text);
        let code = match fallback {
            Some(default) if !valid => default.code().to_string(),
            _ => token.text.to_string(),
        };

        Self {
            code,
            valid,
            span: Some(token.span.clone()),
        }
    }
}

/// Resolve languages for a raw match against the current default pair.
pub fn resolve(
    raw: &RawMatch<'_>,
    default_source: &LanguageDescriptor,
    default_target: &LanguageDescriptor,
) -> Option<ResolvedIntent> {
    if raw.query_text().trim().is_empty() {
        return None;
    }

    let (source, target, source_tag, target_tag) = match raw.grammar {
        Grammar::TargetOnly => {
            let target = match &raw.target {
                Some(token) => ResolvedField::typed(token, Some(default_source)),
                None => ResolvedField::defaulted(default_target),
            };
            (
                ResolvedField::defaulted(default_source),
                target,
                HighlightTag::PatternMatch,
                HighlightTag::PatternMatch,
            )
        }
        Grammar::SourceTarget => {
            let source = ResolvedField::typed(raw.source.as_ref()?, None);
            let target = ResolvedField::typed(raw.target.as_ref()?, None);
            (source, target, HighlightTag::Operator, HighlightTag::Literal)
        }
    };

    let highlight_spans = annotate_chars(
        raw.input,
        &[
            AnnotatedField::new(Some(raw.header.span.clone()), true, HighlightTag::PatternMatch),
            AnnotatedField::new(source.span.clone(), source.valid, source_tag),
            AnnotatedField::new(target.span.clone(), target.valid, target_tag),
        ],
    );

    Some(ResolvedIntent {
        source_lang_code: source.code,
        target_lang_code: target.code,
        source_valid: source.valid,
        target_valid: target.valid,
        query_text: raw.query_text().to_string(),
        highlight_spans,
    })
}
