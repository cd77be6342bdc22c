//! # Codec Registry
//!
//! A fixed table of stateless `text -> text` conversions used when crafting or
//! reading injection payloads.
//!
//! ## Modules
//!
//! - **`simple`**: thin wrappers over standard primitives (HTML entities,
//!   base64, percent-encoding, MD5, hex)
//! - **`unicode`**: backslash escape and unescape of non-printable and
//!   non-ASCII code points
//! - **`literal`**: per-code-point literal encoders (`&#65;`, `CHR(65)||`, ...)
//!   and the `CHR()` concatenation decoders
//!
//! Every codec is reached through [`Codec`]; there is no shared state between
//! invocations.

pub mod literal;
pub mod simple;
pub mod unicode;

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// Knobs that change how a codec renders its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// `html-escape` also escapes `"` and `'`.
    pub escape_quotes: bool,
}

/// Every conversion the tool offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    HtmlUnescape,
    HtmlEscape,
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
    Md5Encode,
    Html10Encode,
    Html16Encode,
    StringFromCharCode,
    MysqlChar,
    OracleChr,
    OracleUnchr,
    PhpChr,
    PhpUnchr,
    StringToHex,
    HexToString,
    UnicodeEscape,
    UnicodeUnescape,
}

impl Codec {
    pub const ALL: [Codec; 19] = [
        Codec::HtmlUnescape,
        Codec::HtmlEscape,
        Codec::Base64Encode,
        Codec::Base64Decode,
        Codec::UrlEncode,
        Codec::UrlDecode,
        Codec::Md5Encode,
        Codec::Html10Encode,
        Codec::Html16Encode,
        Codec::StringFromCharCode,
        Codec::MysqlChar,
        Codec::OracleChr,
        Codec::OracleUnchr,
        Codec::PhpChr,
        Codec::PhpUnchr,
        Codec::StringToHex,
        Codec::HexToString,
        Codec::UnicodeEscape,
        Codec::UnicodeUnescape,
    ];

    /// Command name used on the invocation surface.
    pub fn name(self) -> &'static str {
        match self {
            Codec::HtmlUnescape => "html-unescape",
            Codec::HtmlEscape => "html-escape",
            Codec::Base64Encode => "base64-encode",
            Codec::Base64Decode => "base64-decode",
            Codec::UrlEncode => "url-encode",
            Codec::UrlDecode => "url-decode",
            Codec::Md5Encode => "md5-encode",
            Codec::Html10Encode => "html10-encode",
            Codec::Html16Encode => "html16-encode",
            Codec::StringFromCharCode => "string-from-char-code",
            Codec::MysqlChar => "mysql-char",
            Codec::OracleChr => "oracle-chr",
            Codec::OracleUnchr => "oracle-unchr",
            Codec::PhpChr => "php-chr",
            Codec::PhpUnchr => "php-unchr",
            Codec::StringToHex => "string-to-hex",
            Codec::HexToString => "hex-to-string",
            Codec::UnicodeEscape => "unicode-escape",
            Codec::UnicodeUnescape => "unicode-unescape",
        }
    }

    /// Human label used in failure messages ("Can not convert to ...").
    pub fn label(self) -> &'static str {
        match self {
            Codec::HtmlUnescape => "HtmlUnescape",
            Codec::HtmlEscape => "HtmlEscape",
            Codec::Base64Encode => "Base64Encode",
            Codec::Base64Decode => "Base64Decode",
            Codec::UrlEncode => "UrlEncode",
            Codec::UrlDecode => "UrlDecode",
            Codec::Md5Encode => "Md5Encode",
            Codec::Html10Encode => "HTML10 Entities",
            Codec::Html16Encode => "HTML16 Entities",
            Codec::StringFromCharCode => "String.fromCharCode",
            Codec::MysqlChar => "MysqlChar",
            Codec::OracleChr => "OracleChr",
            Codec::OracleUnchr => "OracleUnchr",
            Codec::PhpChr => "PhpChr",
            Codec::PhpUnchr => "PhpUnchr",
            Codec::StringToHex => "StringToHex",
            Codec::HexToString => "HexToString",
            Codec::UnicodeEscape => "UnicodeEncode",
            Codec::UnicodeUnescape => "UnicodeDecode",
        }
    }

    /// Runs the codec with default options.
    pub fn convert(self, text: &str) -> Result<String, CodecError> {
        self.convert_with(text, &CodecOptions::default())
    }

    pub fn convert_with(self, text: &str, options: &CodecOptions) -> Result<String, CodecError> {
        let out = match self {
            Codec::HtmlUnescape => simple::html_unescape(text),
            Codec::HtmlEscape => simple::html_escape(text, options.escape_quotes),
            Codec::Base64Encode => simple::base64_encode(text),
            Codec::Base64Decode => simple::base64_decode(text)?,
            Codec::UrlEncode => simple::url_encode(text),
            Codec::UrlDecode => simple::url_decode(text),
            Codec::Md5Encode => simple::md5_hex(text),
            Codec::Html10Encode => literal::encode(text, &literal::HTML_DECIMAL),
            Codec::Html16Encode => literal::encode(text, &literal::HTML_HEX),
            Codec::StringFromCharCode => literal::encode(text, &literal::FROM_CHAR_CODE),
            Codec::MysqlChar => literal::encode(text, &literal::MYSQL_CHAR),
            Codec::OracleChr => literal::encode(text, &literal::ORACLE_CHR),
            Codec::OracleUnchr => literal::decode_chr_runs(text, &literal::ChrConcat::ORACLE)?,
            Codec::PhpChr => literal::encode(text, &literal::PHP_CHR),
            Codec::PhpUnchr => literal::decode_chr_runs(text, &literal::ChrConcat::PHP)?,
            Codec::StringToHex => simple::string_to_hex(text),
            Codec::HexToString => simple::hex_to_string(text)?,
            Codec::UnicodeEscape => unicode::escape(text),
            Codec::UnicodeUnescape => unicode::unescape(text)?,
        };
        log::debug!(
            "{} converted {} bytes into {} bytes",
            self.name(),
            text.len(),
            out.len()
        );
        Ok(out)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Codec::ALL
            .into_iter()
            .find(|codec| codec.name() == wanted)
            .ok_or_else(|| CodecError::UnknownCodec {
                name: s.to_string(),
            })
    }
}
