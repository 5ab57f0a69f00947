//! Piece CSS - SVG Piece Stylesheet Compiler
//!
//! Scans a directory of `<color>-<piece>.svg` images and emits one CSS rule
//! per piece and selected state, each embedding the SVG as a base64 data URI.
//! Output order follows sorted file names, so unchanged inputs give
//! byte-identical stylesheets.

pub mod naming;
pub mod palette;
pub mod svg;
pub mod css;
pub mod hashing;
pub mod generator;

pub use naming::{AssetFile, NameError, PieceKind};
pub use palette::{AnimationPalette, FadeAnimation, PaletteError};
pub use svg::{inject_before_closing_tag, InjectError, SelectedState};
pub use css::{CssRule, Stylesheet};
pub use hashing::sha256_hex;
pub use generator::{CheckOutcome, ConfigOverrides, GenerationReport, GeneratorConfig, GeneratorError, StylesheetGenerator};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
