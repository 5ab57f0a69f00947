//! SVG Animation Injection
//!
//! Animated payloads are the source markup with a fade style block and an
//! activation rule spliced in directly before the single `</svg>` tag.

use serde::Serialize;
use thiserror::Error;

use crate::naming::PieceKind;
use crate::palette::FadeAnimation;

pub const CLOSING_TAG: &str = "</svg>";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InjectError {
    #[error("closing </svg> tag not found")]
    MissingClosingTag,

    #[error("closing </svg> tag appears {0} times, expected exactly once")]
    DuplicateClosingTag(usize),
}

/// Insert `fragment` immediately before the closing `</svg>` tag.
///
/// The tag must occur exactly once in `svg`.
pub fn inject_before_closing_tag(svg: &str, fragment: &str) -> Result<String, InjectError> {
    let mut matches = svg.match_indices(CLOSING_TAG);
    let (index, _) = matches.next().ok_or(InjectError::MissingClosingTag)?;

    let extra = matches.count();
    if extra > 0 {
        return Err(InjectError::DuplicateClosingTag(extra + 1));
    }

    let mut injected = String::with_capacity(svg.len() + fragment.len());
    injected.push_str(&svg[..index]);
    injected.push_str(fragment);
    injected.push_str(&svg[index..]);
    Ok(injected)
}

/// Selected-state variant of a piece, each targeting element ids in the SVG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedState {
    Main,
    Left,
    Right,
    Full,
}

impl SelectedState {
    pub fn for_kind(kind: PieceKind) -> &'static [SelectedState] {
        match kind {
            PieceKind::Unitary => &[SelectedState::Main],
            PieceKind::Combo => &[SelectedState::Left, SelectedState::Right, SelectedState::Full],
        }
    }

    /// Class suffix appended to the base selector
    pub fn selector_suffix(&self) -> &'static str {
        match self {
            SelectedState::Main => ".selected",
            SelectedState::Left => ".selected.left",
            SelectedState::Right => ".selected.right",
            SelectedState::Full => ".selected.full",
        }
    }

    pub fn target_ids(&self) -> &'static [&'static str] {
        match self {
            SelectedState::Main => &["main"],
            SelectedState::Left => &["left"],
            SelectedState::Right => &["right"],
            SelectedState::Full => &["left", "right"],
        }
    }

    /// `<style>` element running `fade` on every target id and its descendants
    pub fn activation_rule(&self, duration: &str) -> String {
        let declarations: Vec<String> = self
            .target_ids()
            .iter()
            .map(|id| {
                format!(
                    "#{id} {{ animation: fade {d} infinite; }} #{id} * {{ animation: fade {d} infinite; }}",
                    id = id,
                    d = duration
                )
            })
            .collect();
        format!("<style>{}</style>", declarations.join(" "))
    }
}

/// Build the animated copy of `svg` for one selected state.
///
/// Always starts from the original markup; variants never chain.
pub fn animate(
    svg: &str,
    animation: &FadeAnimation,
    state: SelectedState,
    duration: &str,
) -> Result<String, InjectError> {
    let fragment = format!("{}{}", animation.style_block(), state.activation_rule(duration));
    inject_before_closing_tag(svg, &fragment)
}
