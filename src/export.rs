use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::collect::VizPoint;
use crate::error::VizError;

/// Machine-readable record of a projected layout, written alongside the
/// rendered figure so separate runs can be compared coordinate for
/// coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub points: Vec<LayoutPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub word: String,
    pub is_query: bool,
    pub group: usize,
    pub x: f64,
    pub y: f64,
}

impl Layout {
    pub fn from_points(title: &str, points: &[VizPoint]) -> Self {
        Self {
            title: title.to_string(),
            points: points
                .iter()
                .map(|p| LayoutPoint {
                    word: p.word.clone(),
                    is_query: p.is_query,
                    group: p.group,
                    x: p.position.0,
                    y: p.position.1,
                })
                .collect(),
        }
    }

    /// Save the layout to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), VizError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a layout from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let json = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }
}
