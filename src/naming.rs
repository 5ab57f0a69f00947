//! Asset Naming Convention
//!
//! Piece images are named `<color>-<piece>[-<piece>...].svg`.
//! One token after the color is a unitary piece, more than one is a combo.

use serde::Serialize;
use thiserror::Error;

pub const SVG_EXTENSION: &str = ".svg";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("{0} is not an .svg file")]
    NotSvg(String),

    #[error("{0} has no piece segment (expected <color>-<piece>.svg)")]
    MissingPiece(String),

    #[error("{0} contains an empty segment")]
    EmptySegment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Single-square glyph, animated through the `main` element
    Unitary,
    /// Two-square composite glyph with independent `left` and `right` halves
    Combo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetFile {
    pub file_name: String,
    pub color: String,
    pub piece_tokens: Vec<String>,
}

impl AssetFile {
    /// Parse a file name against the naming convention.
    ///
    /// The stem is everything before the first `.`, so `white-king.v2.svg`
    /// is the white king.
    pub fn parse(file_name: &str) -> Result<Self, NameError> {
        if !file_name.ends_with(SVG_EXTENSION) {
            return Err(NameError::NotSvg(file_name.to_string()));
        }

        let stem = file_name
            .split_once('.')
            .map_or(file_name, |(stem, _)| stem);
        let mut segments = stem.split('-');
        let color = segments.next().unwrap_or_default();
        let piece_tokens: Vec<String> = segments.map(str::to_string).collect();

        if piece_tokens.is_empty() {
            return Err(NameError::MissingPiece(file_name.to_string()));
        }
        if color.is_empty() || piece_tokens.iter().any(String::is_empty) {
            return Err(NameError::EmptySegment(file_name.to_string()));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            color: color.to_string(),
            piece_tokens,
        })
    }

    pub fn piece_name(&self) -> String {
        self.piece_tokens.join("-")
    }

    pub fn kind(&self) -> PieceKind {
        if self.piece_tokens.len() == 1 {
            PieceKind::Unitary
        } else {
            PieceKind::Combo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unitary() {
        let asset = AssetFile::parse("white-king.svg").unwrap();
        assert_eq!(asset.color, "white");
        assert_eq!(asset.piece_tokens, vec!["king"]);
        assert_eq!(asset.piece_name(), "king");
        assert_eq!(asset.kind(), PieceKind::Unitary);
    }

    #[test]
    fn test_parse_combo() {
        let asset = AssetFile::parse("black-rook-queen.svg").unwrap();
        assert_eq!(asset.color, "black");
        assert_eq!(asset.piece_name(), "rook-queen");
        assert_eq!(asset.kind(), PieceKind::Combo);
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        let asset = AssetFile::parse("white-king.v2.svg").unwrap();
        assert_eq!(asset.piece_name(), "king");
    }

    #[test]
    fn test_missing_hyphen_rejected() {
        assert_eq!(
            AssetFile::parse("king.svg"),
            Err(NameError::MissingPiece("king.svg".to_string()))
        );
        assert!(matches!(AssetFile::parse(".svg"), Err(NameError::MissingPiece(_))));
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(matches!(AssetFile::parse("white--king.svg"), Err(NameError::EmptySegment(_))));
        assert!(matches!(AssetFile::parse("-king.svg"), Err(NameError::EmptySegment(_))));
        assert!(matches!(AssetFile::parse("white-.svg"), Err(NameError::EmptySegment(_))));
    }

    #[test]
    fn test_non_svg_rejected() {
        assert!(matches!(AssetFile::parse("white-king.png"), Err(NameError::NotSvg(_))));
        assert!(matches!(AssetFile::parse("white-king.SVG"), Err(NameError::NotSvg(_))));
    }
}
