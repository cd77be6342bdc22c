pub mod codec;
pub mod editing;
pub mod error;

// Re-export key types for easier usage
pub use codec::{Codec, CodecOptions};
pub use editing::{Document, Patch, Span, SpanFailure};
pub use error::{CodecError, EditError};
