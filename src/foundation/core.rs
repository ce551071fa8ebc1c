pub use kurbo::{Point, Rect, Vec2};

/// Width of the native storyboard coordinate space.
pub const STORYBOARD_WIDTH: f64 = 640.0;
/// Height of the native storyboard coordinate space.
pub const STORYBOARD_HEIGHT: f64 = 480.0;

/// Region visible on a 16:9 display, in native storyboard coordinates.
pub const WIDESCREEN_BOUNDS: Rect = Rect::new(-107.0, 0.0, 747.0, STORYBOARD_HEIGHT);
/// Area of [`WIDESCREEN_BOUNDS`].
pub const WIDESCREEN_AREA: f64 = 854.0 * STORYBOARD_HEIGHT;

/// Opacity below which a sprite is considered invisible.
pub const OPACITY_EPSILON: f64 = 0.00001;

/// Anchor point of a sprite relative to its texture.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Origin {
    TopLeft,
    TopCentre,
    TopRight,
    CentreLeft,
    #[default]
    Centre,
    CentreRight,
    BottomLeft,
    BottomCentre,
    BottomRight,
}

impl Origin {
    /// Anchor offset in pixels for a texture of the given size.
    pub fn vector(self, width: f64, height: f64) -> Vec2 {
        let (fx, fy) = match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCentre => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CentreLeft => (0.0, 0.5),
            Self::Centre => (0.5, 0.5),
            Self::CentreRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCentre => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        };
        Vec2::new(width * fx, height * fy)
    }

    /// Name used by the text export form.
    pub fn osb_name(self) -> &'static str {
        match self {
            Self::TopLeft => "TopLeft",
            Self::TopCentre => "TopCentre",
            Self::TopRight => "TopRight",
            Self::CentreLeft => "CentreLeft",
            Self::Centre => "Centre",
            Self::CentreRight => "CentreRight",
            Self::BottomLeft => "BottomLeft",
            Self::BottomCentre => "BottomCentre",
            Self::BottomRight => "BottomRight",
        }
    }
}

/// Straight (non-premultiplied) RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Blend the color channels toward `other` by `t`; alpha is kept.
    pub fn lerp_color(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a,
        }
    }

    pub fn with_opacity(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
