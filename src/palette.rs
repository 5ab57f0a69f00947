//! Animation Palette - Color to Fade Animation Table
//!
//! Selected pieces pulse between a base and a peak fill. The palette decides
//! which colors a stylesheet may animate; a color missing here is a
//! configuration error, never a silently static "selected" image.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Failed to read palette {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse palette: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid palette: {0}")]
    Invalid(String),
}

/// Keyframe fills for one color: 0% base, 50% peak, 100% base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeAnimation {
    pub base: String,
    pub peak: String,
}

impl FadeAnimation {
    pub fn new(base: impl Into<String>, peak: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            peak: peak.into(),
        }
    }

    /// Render the `@keyframes fade` style block injected into animated payloads
    pub fn style_block(&self) -> String {
        format!(
            "<style>\n\
             @keyframes fade {{\n\
             \x20   0% {{\n\
             \x20       fill: {base};\n\
             \x20   }}\n\
             \x20   50% {{\n\
             \x20       fill: {peak};\n\
             \x20   }}\n\
             \x20   100% {{\n\
             \x20       fill: {base};\n\
             \x20   }}\n\
             }}</style>\n",
            base = self.base,
            peak = self.peak,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationPalette {
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default)]
    pub colors: BTreeMap<String, FadeAnimation>,
}

fn default_duration() -> String {
    "1s".to_string()
}

impl AnimationPalette {
    /// Empty palette; every selected variant fails until colors are registered
    pub fn new() -> Self {
        Self {
            duration: default_duration(),
            colors: BTreeMap::new(),
        }
    }

    /// The white/black table shipped with the cburnett piece set
    pub fn standard() -> Self {
        let mut palette = Self::new();
        palette.register("white", FadeAnimation::new("#ffaaaa", "#ff0000"));
        palette.register("black", FadeAnimation::new("#00aa00", "#00ff00"));
        palette
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, PaletteError> {
        let palette: Self = serde_json::from_str(content)?;
        palette.validate()?;
        Ok(palette)
    }

    /// Values are spliced into a `<style>` element, so markup and rule
    /// delimiters are rejected.
    pub fn validate(&self) -> Result<(), PaletteError> {
        check_value("duration", &self.duration)?;
        for (color, animation) in &self.colors {
            if color.is_empty() || color.contains(['-', '.', ' ']) {
                return Err(PaletteError::Invalid(format!(
                    "color name '{}' cannot be used in a file name or selector",
                    color
                )));
            }
            check_value(&format!("{}.base", color), &animation.base)?;
            check_value(&format!("{}.peak", color), &animation.peak)?;
        }
        Ok(())
    }

    pub fn get(&self, color: &str) -> Option<&FadeAnimation> {
        self.colors.get(color)
    }

    pub fn register(&mut self, color: impl Into<String>, animation: FadeAnimation) {
        self.colors.insert(color.into(), animation);
    }

    pub fn color_names(&self) -> Vec<&str> {
        self.colors.keys().map(String::as_str).collect()
    }
}

fn check_value(field: &str, value: &str) -> Result<(), PaletteError> {
    if value.trim().is_empty() {
        return Err(PaletteError::Invalid(format!("{} is empty", field)));
    }
    if value.contains(['<', '>', ';', '{', '}']) {
        return Err(PaletteError::Invalid(format!(
            "{} contains markup or rule delimiters: {}",
            field, value
        )));
    }
    Ok(())
}

impl Default for AnimationPalette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_block_layout() {
        let block = FadeAnimation::new("#ffaaaa", "#ff0000").style_block();
        let expected = "<style>\n@keyframes fade {\n    0% {\n        fill: #ffaaaa;\n    }\n    50% {\n        fill: #ff0000;\n    }\n    100% {\n        fill: #ffaaaa;\n    }\n}</style>\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_standard_palette_colors() {
        let palette = AnimationPalette::standard();
        assert_eq!(palette.color_names(), vec!["black", "white"]);
        assert_eq!(palette.get("black").unwrap().peak, "#00ff00");
        assert!(palette.get("red").is_none());
    }

    #[test]
    fn test_from_json_defaults_duration() {
        let palette = AnimationPalette::from_json(
            r##"{"colors": {"red": {"base": "#aa0000", "peak": "#ff0000"}}}"##,
        )
        .unwrap();
        assert_eq!(palette.duration, "1s");
        assert_eq!(palette.get("red"), Some(&FadeAnimation::new("#aa0000", "#ff0000")));
    }

    #[test]
    fn test_from_json_rejects_markup() {
        let result = AnimationPalette::from_json(
            r##"{"colors": {"red": {"base": "</style>", "peak": "#ff0000"}}}"##,
        );
        assert!(matches!(result, Err(PaletteError::Invalid(_))));
    }

    #[test]
    fn test_from_json_rejects_hyphenated_color() {
        let result = AnimationPalette::from_json(
            r##"{"colors": {"dark-red": {"base": "#110000", "peak": "#ff0000"}}}"##,
        );
        assert!(matches!(result, Err(PaletteError::Invalid(_))));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            AnimationPalette::from_json("{not json"),
            Err(PaletteError::Parse(_))
        ));
    }
}
