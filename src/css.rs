//! Stylesheet Output
//!
//! Each rule is exactly three lines:
//!
//! ```text
//! .cg-wrap piece.white.king {
//!     background-image: url('data:image/svg+xml;base64,...');
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

use crate::hashing::sha256_hex;

pub const DEFAULT_SELECTOR_PREFIX: &str = ".cg-wrap piece";
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Compose `<prefix>.<color>.<piece><suffix>`
pub fn selector(prefix: &str, color: &str, piece_name: &str, suffix: &str) -> String {
    format!("{}.{}.{}{}", prefix, color, piece_name, suffix)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    /// Base64 of the SVG markup
    pub payload: String,
}

impl CssRule {
    pub fn svg_background(selector: impl Into<String>, svg: &[u8]) -> Self {
        Self {
            selector: selector.into(),
            payload: STANDARD.encode(svg),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("{}{}", SVG_DATA_URI_PREFIX, self.payload)
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        writeln!(f, "    background-image: url('{}');", self.data_uri())?;
        writeln!(f, "}}")
    }
}

/// Ordered rules; order is the output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, rules: impl IntoIterator<Item = CssRule>) {
        self.rules.extend(rules);
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// SHA-256 of the rendered text
    pub fn digest(&self) -> String {
        sha256_hex(self.render().as_bytes())
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector() {
        assert_eq!(
            selector(DEFAULT_SELECTOR_PREFIX, "black", "rook-queen", ".selected.left"),
            ".cg-wrap piece.black.rook-queen.selected.left"
        );
    }

    #[test]
    fn test_rule_three_lines() {
        let rule = CssRule::svg_background(".cg-wrap piece.white.king", b"<svg></svg>");
        assert_eq!(
            rule.to_string(),
            ".cg-wrap piece.white.king {\n    background-image: url('data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=');\n}\n"
        );
    }

    #[test]
    fn test_empty_stylesheet_renders_nothing() {
        let sheet = Stylesheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.render(), "");
    }

    #[test]
    fn test_digest_tracks_content() {
        let mut a = Stylesheet::new();
        a.push(CssRule::svg_background(".a", b"<svg></svg>"));
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());

        b.push(CssRule::svg_background(".b", b"<svg></svg>"));
        assert_ne!(a.digest(), b.digest());
    }
}
