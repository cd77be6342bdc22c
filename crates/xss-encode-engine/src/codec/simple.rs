//! Codecs that hand the whole span to a standard primitive.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CodecError;

/// Decodes character references the way an HTML5 parser does in text,
/// including legacy references with no closing `;`.
pub fn html_unescape(text: &str) -> String {
    htmlize::unescape(text).into_owned()
}

/// Escapes `&`, `<` and `>`, plus both quote characters when `quotes` is set.
pub fn html_escape(text: &str, quotes: bool) -> String {
    if quotes {
        html_escape::encode_quoted_attribute(text).into_owned()
    } else {
        html_escape::encode_text(text).into_owned()
    }
}

pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decodes standard base64 into UTF-8 text.
///
/// Whitespace is ignored so wrapped payloads decode as one block.
pub fn base64_decode(text: &str) -> Result<String, CodecError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|source| CodecError::InvalidBase64 { source })?;
    String::from_utf8(bytes).map_err(|source| CodecError::InvalidUtf8 { source })
}

/// Percent-encodes everything except unreserved characters and `/`.
pub fn url_encode(text: &str) -> String {
    text.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-decodes `text`, leaving malformed sequences as they are.
pub fn url_decode(text: &str) -> String {
    let bytes = urlencoding::decode_binary(text.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Lowercase hex MD5 digest of the UTF-8 bytes.
pub fn md5_hex(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

pub fn string_to_hex(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decodes a hex string, with or without a leading `0x`.
pub fn hex_to_string(text: &str) -> Result<String, CodecError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let bytes = hex::decode(digits).map_err(|source| CodecError::InvalidHex { source })?;
    String::from_utf8(bytes).map_err(|source| CodecError::InvalidUtf8 { source })
}
