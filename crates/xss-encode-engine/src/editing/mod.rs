/*!
 * # Editing Core Module
 *
 * Applies one codec to one or more spans of a text buffer and writes the
 * results back in place.
 *
 * ## Edit Loop
 *
 * 1. **Resolve selections**: validate spans against the buffer; no
 *    non-empty selection means the whole buffer
 * 2. **Convert**: run the codec over each span's original text
 * 3. **Compile**: successful replacements become one xi-rope `Delta`
 * 4. **Apply**: the delta replaces the buffer in a single step; failed
 *    spans keep their text and are reported in the `Patch`
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with the xi-rope buffer and `apply`
 * - **`patch`**: `Patch` and `SpanFailure`, the outcome of one apply
 * - **`span`**: `Span`, a byte range into the buffer
 */

pub mod document;
pub mod patch;
pub mod span;

pub use document::Document;
pub use patch::{Patch, SpanFailure};
pub use span::Span;
