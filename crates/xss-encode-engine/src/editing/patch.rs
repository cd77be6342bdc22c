use thiserror::Error;

use crate::codec::Codec;
use crate::editing::Span;
use crate::error::CodecError;

/// Result of applying a codec to a document
#[derive(Debug)]
pub struct Patch {
    /// Post-edit spans of the inserted replacements, in buffer order.
    pub changed: Vec<Span>,
    /// Spans left untouched because the codec rejected their content.
    pub failures: Vec<SpanFailure>,
    pub version: u64,
}

impl Patch {
    /// True when every selected span was converted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A span whose content the codec could not convert.
#[derive(Debug, Error)]
#[error("Can not convert to {}: {error}", .codec.label())]
pub struct SpanFailure {
    /// Pre-edit span, unchanged in the buffer.
    pub span: Span,
    pub codec: Codec,
    #[source]
    pub error: CodecError,
}
