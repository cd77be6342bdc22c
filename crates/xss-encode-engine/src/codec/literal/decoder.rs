use std::sync::LazyLock;

use regex::Regex;

use super::code_point;
use super::kinds::ChrConcat;
use crate::editing::Span;
use crate::error::CodecError;

/// One `CHR(<digits>)` call, any letter case. Digits are ASCII only.
static CHR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CHR\(([0-9]+)\)").expect("CHR token pattern is valid"));

/// A maximal sequence of `CHR()` tokens separated by exactly one joiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRun {
    /// Byte range of the run in the scanned text, first `C` to last `)`.
    pub span: Span,
    /// The characters the run spells out, in order.
    pub decoded: String,
}

impl TokenRun {
    /// True when a token starting at `start` is joined onto this run.
    fn continues_at(&self, text: &str, start: usize, joiner: &str) -> bool {
        text.get(self.span.end..start) == Some(joiner)
    }
}

/// Scans `text` left to right and groups `CHR()` tokens into runs.
///
/// Anything between two tokens other than the joiner itself ends the run,
/// including an empty gap, a doubled joiner or a dangling joiner. The
/// joiner that follows the last token of a run is not part of the run.
pub fn find_runs(text: &str, concat: &ChrConcat) -> Result<Vec<TokenRun>, CodecError> {
    let mut runs = Vec::new();
    let mut current: Option<TokenRun> = None;

    for caps in CHR_TOKEN.captures_iter(text) {
        let (Some(token), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let ch = code_point(digits.as_str())?;

        match current.as_mut() {
            Some(run) if run.continues_at(text, token.start(), concat.joiner) => {
                run.decoded.push(ch);
                run.span.end = token.end();
            }
            _ => {
                runs.extend(current.take());
                current = Some(TokenRun {
                    span: Span {
                        start: token.start(),
                        end: token.end(),
                    },
                    decoded: ch.to_string(),
                });
            }
        }
    }
    runs.extend(current);

    Ok(runs)
}

/// Replaces every run in `text` with its decoded string in double quotes.
///
/// Text outside runs is copied through untouched. With no runs the output
/// equals the input.
pub fn decode_chr_runs(text: &str, concat: &ChrConcat) -> Result<String, CodecError> {
    let runs = find_runs(text, concat)?;
    log::debug!(
        "found {} CHR() runs joined by '{}'",
        runs.len(),
        concat.joiner
    );

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for run in &runs {
        out.push_str(&text[copied..run.span.start]);
        out.push('"');
        out.push_str(&run.decoded);
        out.push('"');
        copied = run.span.end;
    }
    out.push_str(&text[copied..]);

    Ok(out)
}
