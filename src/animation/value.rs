use std::fmt::Debug;

use crate::{foundation::core::Vec2, storyboard::export::ExportSettings};

/// Immutable property value a command interpolates between.
///
/// Implemented for scalars (`f64`), vectors ([`Vec2`]), colors and parameter flags.
pub trait CommandValue: Clone + Debug + PartialEq + 'static {
    /// Interpolate between `start` and `end` with an already-eased progress fraction.
    fn interpolate(start: &Self, end: &Self, progress: f64) -> Self;

    /// Comma-separated fields in the text export form.
    fn to_osb_string(&self, settings: &ExportSettings) -> String;
}

impl CommandValue for f64 {
    fn interpolate(start: &Self, end: &Self, progress: f64) -> Self {
        start + (end - start) * progress
    }

    fn to_osb_string(&self, settings: &ExportSettings) -> String {
        settings.format_value(*self)
    }
}

impl CommandValue for Vec2 {
    fn interpolate(start: &Self, end: &Self, progress: f64) -> Self {
        start.lerp(*end, progress)
    }

    fn to_osb_string(&self, settings: &ExportSettings) -> String {
        format!(
            "{},{}",
            settings.format_value(self.x),
            settings.format_value(self.y)
        )
    }
}

/// RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommandColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl CommandColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }
}

impl Default for CommandColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl CommandValue for CommandColor {
    fn interpolate(start: &Self, end: &Self, progress: f64) -> Self {
        Self {
            r: start.r + (end.r - start.r) * progress,
            g: start.g + (end.g - start.g) * progress,
            b: start.b + (end.b - start.b) * progress,
        }
    }

    fn to_osb_string(&self, _settings: &ExportSettings) -> String {
        fn byte(c: f64) -> u8 {
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        }
        format!("{},{},{}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// On/off sprite parameter toggled by `P` commands.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CommandParameter {
    #[default]
    None,
    FlipHorizontal,
    FlipVertical,
    AdditiveBlending,
}

impl CommandValue for CommandParameter {
    fn interpolate(start: &Self, end: &Self, progress: f64) -> Self {
        if progress < 1.0 { *start } else { *end }
    }

    fn to_osb_string(&self, _settings: &ExportSettings) -> String {
        match self {
            Self::None => "",
            Self::FlipHorizontal => "H",
            Self::FlipVertical => "V",
            Self::AdditiveBlending => "A",
        }
        .to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
