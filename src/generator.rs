//! Stylesheet Generator - Single Entry Point
//!
//! The whole stylesheet is rendered in memory before the output file is
//! touched. Any error aborts the run and leaves the previous output intact.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::css::{selector, CssRule, Stylesheet, DEFAULT_SELECTOR_PREFIX};
use crate::hashing::sha256_hex;
use crate::naming::{AssetFile, NameError, SVG_EXTENSION};
use crate::palette::{AnimationPalette, PaletteError};
use crate::svg::{animate, InjectError, SelectedState};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{file} is not valid UTF-8: {source}")]
    Decode {
        file: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("No animation registered for color '{color}' (needed by {file})")]
    UnknownColor { color: String, file: String },

    #[error("Malformed asset name: {0}")]
    MalformedName(#[from] NameError),

    #[error("Cannot animate {file}: {source}")]
    Injection {
        file: String,
        #[source]
        source: InjectError,
    },

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Config error: {0}")]
    Config(String),
}

impl GeneratorError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_selector_prefix")]
    pub selector_prefix: String,
    /// Palette JSON file; the standard white/black table when absent
    #[serde(default)]
    pub palette: Option<PathBuf>,
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_output() -> PathBuf {
    PathBuf::from("./css/cburnett.css")
}

fn default_selector_prefix() -> String {
    DEFAULT_SELECTOR_PREFIX.to_string()
}

impl GeneratorConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| GeneratorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply command-line values over this config
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(asset_dir) = overrides.asset_dir {
            self.asset_dir = asset_dir;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(prefix) = overrides.selector_prefix {
            self.selector_prefix = prefix;
        }
        if let Some(palette) = overrides.palette {
            self.palette = Some(palette);
        }
        self
    }

    pub fn load_palette(&self) -> Result<AnimationPalette, GeneratorError> {
        match &self.palette {
            Some(path) => Ok(AnimationPalette::load_from_file(path)?),
            None => Ok(AnimationPalette::standard()),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            output: default_output(),
            selector_prefix: default_selector_prefix(),
            palette: None,
        }
    }
}

/// Values that take precedence over a loaded config; `None` keeps the config value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub asset_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub selector_prefix: Option<String>,
    pub palette: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub assets: usize,
    pub rules: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub up_to_date: bool,
    pub expected_sha256: String,
    /// `None` when the output file does not exist
    pub actual_sha256: Option<String>,
}

pub struct StylesheetGenerator {
    palette: AnimationPalette,
    selector_prefix: String,
}

impl StylesheetGenerator {
    /// Fails when a palette value would break the injected markup
    pub fn new(palette: AnimationPalette) -> Result<Self, GeneratorError> {
        palette.validate()?;
        Ok(Self {
            palette,
            selector_prefix: default_selector_prefix(),
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let palette = config.load_palette()?;
        Ok(Self::new(palette)?.with_selector_prefix(config.selector_prefix.clone()))
    }

    pub fn with_selector_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.selector_prefix = prefix.into();
        self
    }

    pub fn palette(&self) -> &AnimationPalette {
        &self.palette
    }

    /// List `.svg` files in `dir`, sorted by file name.
    ///
    /// Other files and non-file entries are ignored; a `.svg` name that
    /// breaks the naming convention fails the scan.
    pub fn scan_assets(dir: &Path) -> Result<Vec<AssetFile>, GeneratorError> {
        let mut names = vec![];

        for entry in fs::read_dir(dir).map_err(|e| GeneratorError::io(dir, e))? {
            let entry = entry.map_err(|e| GeneratorError::io(dir, e))?;
            let path = entry.path();

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping non UTF-8 entry {}", raw.to_string_lossy());
                    continue;
                }
            };
            if !name.ends_with(SVG_EXTENSION) || !path.is_file() {
                continue;
            }
            names.push(name);
        }

        names.sort();

        let assets = names
            .iter()
            .map(|name| AssetFile::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Found {} assets in {}", assets.len(), dir.display());
        Ok(assets)
    }

    /// Rules for one asset: the base rule, then one per selected state
    pub fn rules_for(&self, asset: &AssetFile, svg: &str) -> Result<Vec<CssRule>, GeneratorError> {
        let piece = asset.piece_name();
        let base_selector = selector(&self.selector_prefix, &asset.color, &piece, "");
        let mut rules = vec![CssRule::svg_background(base_selector, svg.as_bytes())];

        let animation = self.palette.get(&asset.color).ok_or_else(|| {
            GeneratorError::UnknownColor {
                color: asset.color.clone(),
                file: asset.file_name.clone(),
            }
        })?;

        for &state in SelectedState::for_kind(asset.kind()) {
            let animated = animate(svg, animation, state, &self.palette.duration).map_err(|source| {
                GeneratorError::Injection {
                    file: asset.file_name.clone(),
                    source,
                }
            })?;
            let state_selector = selector(
                &self.selector_prefix,
                &asset.color,
                &piece,
                state.selector_suffix(),
            );
            rules.push(CssRule::svg_background(state_selector, animated.as_bytes()));
        }

        debug!("{}: {} rules", asset.file_name, rules.len());
        Ok(rules)
    }

    /// Render the stylesheet for every asset in `asset_dir`
    pub fn build(&self, asset_dir: &Path) -> Result<(Stylesheet, usize), GeneratorError> {
        let assets = Self::scan_assets(asset_dir)?;
        let mut stylesheet = Stylesheet::new();

        for asset in &assets {
            let path = asset_dir.join(&asset.file_name);
            let bytes = fs::read(&path).map_err(|e| GeneratorError::io(&path, e))?;
            let svg = String::from_utf8(bytes).map_err(|source| GeneratorError::Decode {
                file: asset.file_name.clone(),
                source,
            })?;
            stylesheet.extend(self.rules_for(asset, &svg)?);
        }

        Ok((stylesheet, assets.len()))
    }

    /// Build and write the stylesheet to `output`, replacing it atomically
    pub fn generate(&self, asset_dir: &Path, output: &Path) -> Result<GenerationReport, GeneratorError> {
        let (stylesheet, assets) = self.build(asset_dir)?;
        let rendered = stylesheet.render();
        write_atomic(output, rendered.as_bytes())?;

        let report = GenerationReport {
            output: output.to_path_buf(),
            assets,
            rules: stylesheet.len(),
            sha256: sha256_hex(rendered.as_bytes()),
        };
        info!(
            "Wrote {} rules for {} assets to {}",
            report.rules,
            report.assets,
            output.display()
        );
        Ok(report)
    }

    /// Compare a fresh build against the existing `output` without writing
    pub fn check(&self, asset_dir: &Path, output: &Path) -> Result<CheckOutcome, GeneratorError> {
        let (stylesheet, _) = self.build(asset_dir)?;
        let expected_sha256 = stylesheet.digest();

        let actual_sha256 = match fs::read(output) {
            Ok(existing) => Some(sha256_hex(&existing)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(GeneratorError::io(output, e)),
        };

        let up_to_date = actual_sha256.as_deref() == Some(expected_sha256.as_str());
        if !up_to_date {
            info!("{} is stale", output.display());
        }

        Ok(CheckOutcome {
            up_to_date,
            expected_sha256,
            actual_sha256,
        })
    }
}

impl Default for StylesheetGenerator {
    fn default() -> Self {
        Self {
            palette: AnimationPalette::standard(),
            selector_prefix: default_selector_prefix(),
        }
    }
}

fn write_atomic(output: &Path, contents: &[u8]) -> Result<(), GeneratorError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| GeneratorError::io(dir, e))?;

    // Keep the mode of the file being replaced
    let permissions = match fs::metadata(output) {
        Ok(existing) => Some(existing.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fresh_permissions(),
        Err(e) => return Err(GeneratorError::io(output, e)),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| GeneratorError::io(dir, e))?;
    if let Some(permissions) = permissions {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|e| GeneratorError::io(file.path(), e))?;
    }
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| GeneratorError::io(file.path(), e))?;
    file.persist(output)
        .map_err(|e| GeneratorError::io(output, e.error))?;
    Ok(())
}

/// Temp files are created 0600; a new stylesheet is world-readable
#[cfg(unix)]
fn fresh_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn fresh_permissions() -> Option<fs::Permissions> {
    None
}
