//! # Character-Code Literals
//!
//! Encoders turn every code point of the input into a numeric literal in one
//! target syntax (`&#65;`, `CHR(65)`, `String.fromCharCode(65)`, ...).
//! Decoders do the reverse for the `CHR()` concatenation forms used in
//! PL/SQL (`CHR(65)||CHR(66)`) and PHP (`CHR(65).CHR(66)`).
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants for every literal syntax
//! - **`encoder`**: per-code-point encoding with the syntax's joiner
//! - **`decoder`**: token and run scanning over arbitrary surrounding text
//!
//! Codes are Unicode scalar values, never UTF-8 bytes.

pub mod decoder;
pub mod encoder;
pub mod kinds;

pub use decoder::{TokenRun, decode_chr_runs, find_runs};
pub use encoder::encode;
pub use kinds::{
    ChrConcat, FROM_CHAR_CODE, HTML_DECIMAL, HTML_HEX, LiteralSyntax, MYSQL_CHAR, ORACLE_CHR,
    PHP_CHR, Radix,
};

use crate::error::CodecError;

/// Maps the decimal digits of one literal to the character they name.
///
/// Fails for values past U+10FFFF, surrogates and digit strings too long
/// for a `u32`.
pub fn code_point(digits: &str) -> Result<char, CodecError> {
    digits
        .parse::<u32>()
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| CodecError::InvalidCodePoint {
            literal: digits.to_string(),
        })
}
