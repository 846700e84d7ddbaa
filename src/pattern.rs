//! Pattern matcher for translation queries.
//!
//! Recognizes `tr[anslate] [src] [dst]: text` with two grammars tried in
//! order, first match wins:
//!
//! 1. target-only: `tr fr: bonjour`, `tr: hello`
//! 2. source+target: `tr en fr: hello`
//!
//! The header word is matched case-insensitively. Language codes are exactly
//! two ASCII letters and are kept verbatim. The query is everything after the
//! colon, untrimmed.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

// Regex patterns (cached for performance)
static TARGET_ONLY_REGEX: OnceLock<Regex> = OnceLock::new();
static SOURCE_TARGET_REGEX: OnceLock<Regex> = OnceLock::new();

fn target_only_regex() -> &'static Regex {
    TARGET_ONLY_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?i:(?P<header>tr(?:anslate)?))\s*(?P<target>[A-Za-z]{2})?\s*:(?P<query>(?s:.*))$",
        )
        .unwrap()
    })
}

fn source_target_regex() -> &'static Regex {
    SOURCE_TARGET_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?i:(?P<header>tr(?:anslate)?))\s*(?P<source>[A-Za-z]{2})\s*(?P<target>[A-Za-z]{2})\s*:(?P<query>(?s:.*))$",
        )
        .unwrap()
    })
}

/// Which grammar produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `header [target]: query`
    TargetOnly,
    /// `header source target: query`
    SourceTarget,
}

/// A piece of the input together with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    fn from_capture(caps: &Captures<'a>, name: &str) -> Option<Self> {
        caps.name(name).map(|m| Token {
            text: m.as_str(),
            span: m.range(),
        })
    }
}

/// Structural parse of one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    /// The string this match was taken from
    pub input: &'a str,
    pub grammar: Grammar,
    pub header: Token<'a>,
    pub source: Option<Token<'a>>,
    pub target: Option<Token<'a>>,
    pub query: Token<'a>,
}

impl<'a> RawMatch<'a> {
    /// Everything after the colon, untrimmed.
    ///
    /// # Returns
    /// A slice of the original input; may be empty or whitespace only.
    ///
    /// ```rust
    /// use tr_query::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new();
    /// assert_eq!(matcher.match_input("tr fr:  hi ").unwrap().query_text(), "  hi ");
    /// assert_eq!(matcher.match_input("tr:").unwrap().query_text(), "");
    /// ```
    pub fn query_text(&self) -> &'a str {
        self.query.text
    }
}

/// Stateless matcher over the two query grammars.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Parse `input`, or return `None` if it is not a translation query.
    pub fn match_input<'a>(&self, input: &'a str) -> Option<RawMatch<'a>> {
        if let Some(caps) = target_only_regex().captures(input) {
            return Some(RawMatch {
                input,
                grammar: Grammar::TargetOnly,
                header: Token::from_capture(&caps, "header")?,
                source: None,
                target: Token::from_capture(&caps, "target"),
                query: Token::from_capture(&caps, "query")?,
            });
        }

        let caps = source_target_regex().captures(input)?;
        // Both codes must capture for this grammar to count as a match
        let source = Token::from_capture(&caps, "source")?;
        let target = Token::from_capture(&caps, "target")?;

        Some(RawMatch {
            input,
            grammar: Grammar::SourceTarget,
            header: Token::from_capture(&caps, "header")?,
            source: Some(source),
            target: Some(target),
            query: Token::from_capture(&caps, "query")?,
        })
    }
}
