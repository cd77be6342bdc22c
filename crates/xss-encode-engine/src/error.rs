use thiserror::Error;

use crate::editing::Span;

/// Failures a single codec can report for one input span.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64: {source}")]
    InvalidBase64 { source: base64::DecodeError },

    #[error("invalid hex: {source}")]
    InvalidHex { source: hex::FromHexError },

    #[error("decoded bytes are not valid UTF-8: {source}")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("malformed escape at byte {offset}: {reason}")]
    MalformedEscape { offset: usize, reason: &'static str },

    #[error("{literal} is not a valid Unicode code point")]
    InvalidCodePoint { literal: String },

    #[error("unknown codec '{name}'")]
    UnknownCodec { name: String },
}

/// Selections that cannot be applied to a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("span {}..{} is outside the buffer of {len} bytes", .span.start, .span.end)]
    OutOfBounds { span: Span, len: usize },

    #[error("span {}..{} does not fall on character boundaries", .span.start, .span.end)]
    NotCharBoundary { span: Span },

    #[error("spans {}..{} and {}..{} overlap", .first.start, .first.end, .second.start, .second.end)]
    Overlapping { first: Span, second: Span },
}
