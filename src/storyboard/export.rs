use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{StoryboardError, StoryboardResult};

/// Formatting options for the line-oriented text export form.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Keep fractional milliseconds instead of rounding times to integers.
    pub use_float_for_time: bool,
    /// Maximum number of decimals written for values (and float times).
    pub value_precision: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            use_float_for_time: false,
            value_precision: 4,
        }
    }
}

impl ExportSettings {
    pub fn from_json_file(path: &Path) -> StoryboardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read export settings '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| StoryboardError::serde(e.to_string()))
    }

    pub fn format_time(&self, ms: f64) -> String {
        if self.use_float_for_time {
            self.format_value(ms)
        } else {
            trim_number(format!("{:.0}", ms.round()))
        }
    }

    pub fn format_value(&self, v: f64) -> String {
        trim_number(format!("{:.*}", self.value_precision, v))
    }

    pub(crate) fn indent(&self, depth: usize) -> String {
        " ".repeat(depth)
    }
}

fn trim_number(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/export.rs"]
mod tests;
