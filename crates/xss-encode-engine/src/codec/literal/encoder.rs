use super::kinds::{LiteralSyntax, Radix};

impl LiteralSyntax {
    /// Renders a single code point as one token of this syntax.
    pub fn token(&self, ch: char) -> String {
        let code = u32::from(ch);
        match self.radix {
            Radix::Decimal => format!("{}{code}{}", self.open, self.close),
            Radix::Hex => format!("{}{code:x}{}", self.open, self.close),
        }
    }
}

/// Encodes every code point of `text` in `syntax`.
///
/// Empty input gives empty output rather than a bare `CHAR()` wrapper.
pub fn encode(text: &str, syntax: &LiteralSyntax) -> String {
    if text.is_empty() {
        return String::new();
    }
    let tokens: Vec<String> = text.chars().map(|ch| syntax.token(ch)).collect();
    format!(
        "{}{}{}",
        syntax.prefix,
        tokens.join(syntax.joiner),
        syntax.suffix
    )
}
