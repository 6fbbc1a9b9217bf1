use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use crate::error::VizError;

/// Glyph resource used for every piece of text on a figure. Loaded from an
/// explicit file path so vocabularies in non-Latin scripts render with a
/// font that actually covers them.
#[derive(Debug)]
pub struct LabelFont {
    font: FontVec,
    path: PathBuf,
}

impl LabelFont {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| VizError::Font {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| VizError::Font {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn as_font(&self) -> &FontVec {
        &self.font
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Probe the usual system locations for a usable fallback font, for
/// callers that do not configure a glyph file of their own.
pub fn find_system_font() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/Library/Fonts/Arial Unicode.ttf",
    ];
    CANDIDATES.iter().map(PathBuf::from).find(|p| p.is_file())
}
