use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::{
    core::{Rect, STORYBOARD_HEIGHT},
    error::{StoryboardError, StoryboardResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Project-wide inputs of a render pass.
pub struct DrawSettings {
    /// Primary texture root.
    pub mapset_path: PathBuf,
    /// Fallback texture root, tried when the primary has no file.
    pub project_asset_path: PathBuf,
    /// How far sprite colors are pulled toward black, `0..=1`.
    pub dim_factor: f32,
    /// Opacity multiplier applied on top of each sprite's fade.
    pub opacity: f32,
    /// Destination viewport; storyboard units are scaled by `height / 480`.
    pub bounds: Rect,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            mapset_path: PathBuf::from("."),
            project_asset_path: PathBuf::from("assetlibrary"),
            dim_factor: 0.0,
            opacity: 1.0,
            bounds: Rect::new(0.0, 0.0, 854.0, STORYBOARD_HEIGHT),
        }
    }
}

impl DrawSettings {
    pub fn from_json_file(path: &Path) -> StoryboardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read draw settings '{}'", path.display()))?;
        let settings: Self =
            serde_json::from_str(&text).map_err(|e| StoryboardError::serde(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> StoryboardResult<()> {
        if !(0.0..=1.0).contains(&self.dim_factor) {
            return Err(StoryboardError::validation("dim_factor must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(StoryboardError::validation("opacity must be in [0, 1]"));
        }
        if !(self.bounds.height() > 0.0 && self.bounds.width() > 0.0) {
            return Err(StoryboardError::validation(
                "bounds must have a positive size",
            ));
        }
        Ok(())
    }

    /// Storyboard unit to viewport pixel factor.
    pub fn bounds_scaling(&self) -> f64 {
        self.bounds.height() / STORYBOARD_HEIGHT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
