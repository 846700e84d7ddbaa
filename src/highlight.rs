//! Highlight annotation for recognized query tokens.
//!
//! Each structural token of a query (header, source code, target code) that
//! was typed by the user becomes one tagged span. Defaulted fields have no
//! span and produce nothing; the free-text query is never annotated.

use serde::Serialize;
use std::ops::Range;

/// Semantic class of a highlighted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightTag {
    PatternMatch,
    Error,
    Operator,
    Literal,
}

/// A tagged, half-open character range of the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub tags: Vec<HighlightTag>,
}

impl HighlightSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_error(&self) -> bool {
        self.tags.contains(&HighlightTag::Error)
    }
}

/// One field offered for annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedField {
    /// Where the field sits in the input, if it was typed at all
    pub span: Option<Range<usize>>,
    pub valid: bool,
    pub tag: HighlightTag,
}

impl AnnotatedField {
    pub fn new(span: Option<Range<usize>>, valid: bool, tag: HighlightTag) -> Self {
        Self { span, valid, tag }
    }
}

/// Turn fields into highlight spans, in the order the fields were given.
///
/// Invalid fields are tagged `Error` regardless of their semantic tag. Spans
/// are emitted using the offsets exactly as supplied.
pub fn annotate(fields: &[AnnotatedField]) -> Vec<HighlightSpan> {
    fields
        .iter()
        .filter_map(|field| {
            let span = field.span.as_ref()?;
            let tag = if field.valid {
                field.tag
            } else {
                HighlightTag::Error
            };
            Some(HighlightSpan {
                start: span.start,
                end: span.end,
                tags: vec![tag],
            })
        })
        .collect()
}

/// Like `annotate`, but the field spans are byte offsets into `input` and the
/// resulting spans are character offsets.
pub fn annotate_chars(input: &str, fields: &[AnnotatedField]) -> Vec<HighlightSpan> {
    let converted: Vec<AnnotatedField> = fields
        .iter()
        .map(|field| AnnotatedField {
            span: field
                .span
                .as_ref()
                .map(|span| char_offset(input, span.start)..char_offset(input, span.end)),
            ..field.clone()
        })
        .collect();

    annotate(&converted)
}

/// Character index of a byte offset that lies on a char boundary.
fn char_offset(input: &str, byte: usize) -> usize {
    input
        .get(..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte)
}
