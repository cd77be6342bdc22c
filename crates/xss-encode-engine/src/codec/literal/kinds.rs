/// Base the numeric code is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    /// Lowercase, no padding.
    Hex,
}

/// Shape of one literal syntax: `prefix (open code close) joiner ... suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSyntax {
    /// Written once before the first token.
    pub prefix: &'static str,
    pub open: &'static str,
    pub radix: Radix,
    pub close: &'static str,
    /// Written between tokens, never after the last one.
    pub joiner: &'static str,
    /// Written once after the last token.
    pub suffix: &'static str,
}

/// `&#60;`
pub const HTML_DECIMAL: LiteralSyntax = LiteralSyntax {
    prefix: "",
    open: "&#",
    radix: Radix::Decimal,
    close: ";",
    joiner: "",
    suffix: "",
};

/// `&#x3c;`
pub const HTML_HEX: LiteralSyntax = LiteralSyntax {
    prefix: "",
    open: "&#x",
    radix: Radix::Hex,
    close: ";",
    joiner: "",
    suffix: "",
};

/// `String.fromCharCode(72,105)`
pub const FROM_CHAR_CODE: LiteralSyntax = LiteralSyntax {
    prefix: "String.fromCharCode(",
    open: "",
    radix: Radix::Decimal,
    close: "",
    joiner: ",",
    suffix: ")",
};

/// `CHAR(72,105)`
pub const MYSQL_CHAR: LiteralSyntax = LiteralSyntax {
    prefix: "CHAR(",
    open: "",
    radix: Radix::Decimal,
    close: "",
    joiner: ",",
    suffix: ")",
};

/// `CHR(72)||CHR(105)`
pub const ORACLE_CHR: LiteralSyntax = LiteralSyntax {
    prefix: "",
    open: ChrConcat::OPEN,
    radix: Radix::Decimal,
    close: ChrConcat::CLOSE,
    joiner: ChrConcat::ORACLE.joiner,
    suffix: "",
};

/// `CHR(72).CHR(105)`
pub const PHP_CHR: LiteralSyntax = LiteralSyntax {
    prefix: "",
    open: ChrConcat::OPEN,
    radix: Radix::Decimal,
    close: ChrConcat::CLOSE,
    joiner: ChrConcat::PHP.joiner,
    suffix: "",
};

/// A concatenation of `CHR(<code>)` calls that the decoders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChrConcat {
    /// Exactly this text must sit between two tokens of one run.
    pub joiner: &'static str,
}

impl ChrConcat {
    pub const OPEN: &'static str = "CHR(";
    pub const CLOSE: &'static str = ")";

    pub const ORACLE: ChrConcat = ChrConcat { joiner: "||" };
    pub const PHP: ChrConcat = ChrConcat { joiner: "." };
}
