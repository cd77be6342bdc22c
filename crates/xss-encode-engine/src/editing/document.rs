use std::borrow::Cow;

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::codec::{Codec, CodecOptions};
use crate::editing::{Patch, Span, SpanFailure};
use crate::error::EditError;

/// A text buffer that codecs are applied to, one or more spans at a time.
///
/// The buffer lives in a single `xi_rope::Rope`. Every [`Document::apply`]
/// converts each selected span from the buffer as it was before the call,
/// then writes all successful replacements in one `Delta`, so replacements
/// never see each other's output.
///
/// ```rust
/// # use xss_encode_engine::{Codec, CodecOptions, Document};
/// let mut doc = Document::new("x=CHR(65)||CHR(66) and y");
/// let patch = doc.apply(Codec::OracleUnchr, &[], &CodecOptions::default()).unwrap();
/// assert!(patch.is_clean());
/// assert_eq!(doc.text(), "x=\"AB\" and y");
/// ```
#[derive(Clone)]
pub struct Document {
    /// xi-rope buffer containing the entire text as UTF-8
    pub(crate) buffer: Rope,
    /// Incremented on every apply that changed the buffer
    pub(crate) version: u64,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Get the buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Slice the buffer; the span must already be validated.
    pub fn slice(&self, span: Span) -> Cow<'_, str> {
        self.buffer.slice_to_cow(span.range())
    }

    /// Span covering the whole buffer.
    pub fn whole(&self) -> Span {
        Span {
            start: 0,
            end: self.buffer.len(),
        }
    }

    /// Apply `codec` to every selected span.
    ///
    /// ## Selection rules
    ///
    /// - With no non-empty selection the whole buffer is converted
    /// - Empty selections next to non-empty ones are ignored
    /// - Selections must lie inside the buffer, on character boundaries, and
    ///   must not overlap; otherwise nothing is converted and an
    ///   [`EditError`] is returned
    ///
    /// ## Failures
    ///
    /// A span the codec rejects keeps its original text and is reported in
    /// [`Patch::failures`]. The other spans are still replaced.
    pub fn apply(
        &mut self,
        codec: Codec,
        selections: &[Span],
        options: &CodecOptions,
    ) -> Result<Patch, EditError> {
        let spans = self.resolve_selections(selections)?;
        log::debug!("applying {codec} to {} span(s)", spans.len());

        let mut builder = Builder::new(self.buffer.len());
        let mut changed = Vec::new();
        let mut failures = Vec::new();
        // Net growth of the buffer from replacements already compiled.
        let mut shift: isize = 0;

        for span in spans {
            let original = self.slice(span);
            match codec.convert_with(&original, options) {
                Ok(replacement) => {
                    let start = span.start.saturating_add_signed(shift);
                    changed.push(Span {
                        start,
                        end: start + replacement.len(),
                    });
                    shift += replacement.len() as isize - span.len() as isize;
                    builder.replace(span.range(), Rope::from(replacement));
                }
                Err(error) => {
                    log::warn!(
                        "{codec} failed on span {}..{}: {error}",
                        span.start,
                        span.end
                    );
                    failures.push(SpanFailure { span, codec, error });
                }
            }
        }

        if !changed.is_empty() {
            let delta = builder.build();
            self.buffer = delta.apply(&self.buffer);
            self.version += 1;
        }

        Ok(Patch {
            changed,
            failures,
            version: self.version,
        })
    }

    /// Validates selections and returns the spans to convert, sorted.
    pub(crate) fn resolve_selections(&self, selections: &[Span]) -> Result<Vec<Span>, EditError> {
        let len = self.buffer.len();
        let text = self.text();

        for &span in selections {
            if span.start > span.end || span.end > len {
                return Err(EditError::OutOfBounds { span, len });
            }
            if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
                return Err(EditError::NotCharBoundary { span });
            }
        }

        let mut spans: Vec<Span> = selections
            .iter()
            .copied()
            .filter(|span| !span.is_empty())
            .collect();
        if spans.is_empty() {
            return Ok(vec![self.whole()]);
        }

        spans.sort();
        spans.dedup();
        if let Some(pair) = spans.windows(2).find(|pair| pair[1].start < pair[0].end) {
            return Err(EditError::Overlapping {
                first: pair[0],
                second: pair[1],
            });
        }

        Ok(spans)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("text", &self.text())
            .field("version", &self.version)
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.buffer.to_string() == other.buffer.to_string() && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use pretty_assertions::assert_eq;

    fn defaults() -> CodecOptions {
        CodecOptions::default()
    }

    // ============ Basic document tests ============

    #[test]
    fn test_new_document_holds_text_unchanged() {
        let text = "CHR(65)||CHR(66)";
        let doc = Document::new(text);

        assert_eq!(doc.text(), text);
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.len(), text.len());
    }

    // ============ Selection resolution ============

    #[test]
    fn no_selection_means_whole_buffer() {
        let doc = Document::new("hello");
        assert_eq!(
            doc.resolve_selections(&[]).unwrap(),
            vec![Span { start: 0, end: 5 }]
        );
        assert_eq!(
            doc.resolve_selections(&[Span { start: 2, end: 2 }]).unwrap(),
            vec![Span { start: 0, end: 5 }]
        );
    }

    #[test]
    fn empty_selections_beside_real_ones_are_ignored() {
        let doc = Document::new("hello world");
        let spans = doc
            .resolve_selections(&[Span { start: 6, end: 11 }, Span { start: 1, end: 1 }])
            .unwrap();
        assert_eq!(spans, vec![Span { start: 6, end: 11 }]);
    }

    #[test]
    fn selections_are_sorted_and_deduplicated() {
        let doc = Document::new("abcdefgh");
        let spans = doc
            .resolve_selections(&[
                Span { start: 6, end: 8 },
                Span { start: 0, end: 2 },
                Span { start: 6, end: 8 },
            ])
            .unwrap();
        assert_eq!(spans, vec![Span { start: 0, end: 2 }, Span { start: 6, end: 8 }]);
    }

    #[test]
    fn out_of_bounds_selection_is_rejected() {
        let doc = Document::new("abc");
        let span = Span { start: 1, end: 9 };
        assert_eq!(
            doc.resolve_selections(&[span]),
            Err(EditError::OutOfBounds { span, len: 3 })
        );
    }

    #[test]
    fn inverted_selection_is_rejected() {
        let doc = Document::new("abc");
        let span = Span { start: 2, end: 1 };
        assert_eq!(
            doc.resolve_selections(&[span]),
            Err(EditError::OutOfBounds { span, len: 3 })
        );
    }

    #[test]
    fn selection_inside_a_character_is_rejected() {
        // 'é' is two bytes
        let doc = Document::new("é");
        let span = Span { start: 1, end: 2 };
        assert_eq!(
            doc.resolve_selections(&[span]),
            Err(EditError::NotCharBoundary { span })
        );
    }

    #[test]
    fn overlapping_selections_are_rejected() {
        let doc = Document::new("abcdef");
        let first = Span { start: 0, end: 4 };
        let second = Span { start: 2, end: 6 };
        assert_eq!(
            doc.resolve_selections(&[second, first]),
            Err(EditError::Overlapping { first, second })
        );
    }

    #[test]
    fn touching_selections_do_not_overlap() {
        let doc = Document::new("abcdef");
        assert!(
            doc.resolve_selections(&[Span { start: 0, end: 3 }, Span { start: 3, end: 6 }])
                .is_ok()
        );
    }

    // ============ Apply ============

    #[test]
    fn apply_to_whole_buffer() {
        let mut doc = Document::new("AB");
        let patch = doc.apply(Codec::OracleChr, &[], &defaults()).unwrap();

        assert_eq!(doc.text(), "CHR(65)||CHR(66)");
        assert!(patch.is_clean());
        assert_eq!(patch.changed, vec![Span { start: 0, end: 16 }]);
        assert_eq!(patch.version, 1);
    }

    #[test]
    fn apply_to_several_spans_uses_original_content() {
        let mut doc = Document::new("<a> and <b>");
        let patch = doc
            .apply(
                Codec::Html10Encode,
                &[Span { start: 0, end: 3 }, Span { start: 8, end: 11 }],
                &defaults(),
            )
            .unwrap();

        assert_eq!(doc.text(), "&#60;&#97;&#62; and &#60;&#98;&#62;");
        assert_eq!(
            patch.changed,
            vec![Span { start: 0, end: 15 }, Span { start: 20, end: 35 }]
        );
    }

    #[test]
    fn changed_spans_track_shrinking_replacements() {
        let mut doc = Document::new("CHR(65)||CHR(66) + CHR(67)");
        let patch = doc
            .apply(
                Codec::OracleUnchr,
                &[Span { start: 0, end: 16 }, Span { start: 19, end: 26 }],
                &defaults(),
            )
            .unwrap();

        let text = doc.text();
        assert_eq!(text, "\"AB\" + \"C\"");
        let slices: Vec<&str> = patch.changed.iter().map(|sp| &text[sp.range()]).collect();
        assert_eq!(slices, vec!["\"AB\"", "\"C\""]);
    }

    #[test]
    fn failing_span_is_left_untouched() {
        let mut doc = Document::new("SGVsbG8= | not*base64");
        let patch = doc
            .apply(
                Codec::Base64Decode,
                &[Span { start: 0, end: 8 }, Span { start: 11, end: 21 }],
                &defaults(),
            )
            .unwrap();

        assert_eq!(doc.text(), "Hello | not*base64");
        assert_eq!(patch.changed, vec![Span { start: 0, end: 5 }]);
        assert_eq!(patch.failures.len(), 1);
        let failure = &patch.failures[0];
        assert_eq!(failure.span, Span { start: 11, end: 21 });
        assert!(matches!(failure.error, CodecError::InvalidBase64 { .. }));
        assert!(
            failure
                .to_string()
                .starts_with("Can not convert to Base64Decode:")
        );
    }

    #[test]
    fn all_spans_failing_leaves_buffer_and_version() {
        let mut doc = Document::new("zz");
        let patch = doc.apply(Codec::HexToString, &[], &defaults()).unwrap();

        assert_eq!(doc.text(), "zz");
        assert_eq!(doc.version(), 0);
        assert!(patch.changed.is_empty());
        assert!(!patch.is_clean());
    }

    #[test]
    fn invalid_selection_leaves_buffer() {
        let mut doc = Document::new("abc");
        let before = doc.clone();
        assert!(
            doc.apply(Codec::Base64Encode, &[Span { start: 0, end: 10 }], &defaults())
                .is_err()
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn empty_document_converts_to_empty() {
        let mut doc = Document::new("");
        let patch = doc.apply(Codec::PhpChr, &[], &defaults()).unwrap();
        assert!(patch.is_clean());
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn options_are_passed_to_the_codec() {
        let mut doc = Document::new("'x'");
        doc.apply(
            Codec::HtmlEscape,
            &[],
            &CodecOptions {
                escape_quotes: true,
            },
        )
        .unwrap();
        assert_eq!(doc.text(), "&#x27;x&#x27;");
    }
}
