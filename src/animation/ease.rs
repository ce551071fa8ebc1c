use std::f64::consts::PI;

/// Easing curves understood by the storyboard text format, in export-id order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Ease {
    #[default]
    Linear,
    Out,
    In,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    OutElasticHalf,
    OutElasticQuarter,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Ease {
    pub const ALL: [Ease; 35] = [
        Self::Linear,
        Self::Out,
        Self::In,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InElastic,
        Self::OutElastic,
        Self::OutElasticHalf,
        Self::OutElasticQuarter,
        Self::InOutElastic,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
    ];

    /// Numeric id written by the text export form.
    pub fn osb_id(self) -> u8 {
        self as u8
    }

    pub fn from_osb_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Map linear progress to eased progress.
    ///
    /// The input is not clamped: callers pass a fraction already limited to `[0, 1]`.
    /// Overshooting curves (back, elastic) may return values outside `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::In | Self::InQuad => t * t,
            Self::Out | Self::OutQuad => reverse(|x| x * x, t),
            Self::InOutQuad => in_out(|x| x * x, t),
            Self::InCubic => t.powi(3),
            Self::OutCubic => reverse(|x| x.powi(3), t),
            Self::InOutCubic => in_out(|x| x.powi(3), t),
            Self::InQuart => t.powi(4),
            Self::OutQuart => reverse(|x| x.powi(4), t),
            Self::InOutQuart => in_out(|x| x.powi(4), t),
            Self::InQuint => t.powi(5),
            Self::OutQuint => reverse(|x| x.powi(5), t),
            Self::InOutQuint => in_out(|x| x.powi(5), t),
            Self::InSine => sine_in(t),
            Self::OutSine => reverse(sine_in, t),
            Self::InOutSine => in_out(sine_in, t),
            Self::InExpo => expo_in(t),
            Self::OutExpo => reverse(expo_in, t),
            Self::InOutExpo => in_out(expo_in, t),
            Self::InCirc => circ_in(t),
            Self::OutCirc => reverse(circ_in, t),
            Self::InOutCirc => in_out(circ_in, t),
            Self::InElastic => reverse(|x| elastic_out(x, 1.0), t),
            Self::OutElastic => elastic_out(t, 1.0),
            Self::OutElasticHalf => elastic_out(t, 0.5),
            Self::OutElasticQuarter => elastic_out(t, 0.25),
            Self::InOutElastic => in_out(|x| reverse(|y| elastic_out(y, 1.0), x), t),
            Self::InBack => back_in(t, BACK),
            Self::OutBack => reverse(|x| back_in(x, BACK), t),
            Self::InOutBack => in_out(|x| back_in(x, BACK * 1.525), t),
            Self::InBounce => reverse(bounce_out, t),
            Self::OutBounce => bounce_out(t),
            Self::InOutBounce => in_out(|x| reverse(bounce_out, x), t),
        }
    }
}

const BACK: f64 = 1.70158;

fn reverse(f: impl Fn(f64) -> f64, t: f64) -> f64 {
    1.0 - f(1.0 - t)
}

fn in_out(f: impl Fn(f64) -> f64, t: f64) -> f64 {
    0.5 * if t < 0.5 {
        f(2.0 * t)
    } else {
        2.0 - f(2.0 - 2.0 * t)
    }
}

fn sine_in(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

fn expo_in(t: f64) -> f64 {
    2f64.powf(10.0 * (t - 1.0))
}

fn circ_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

fn elastic_out(t: f64, period_scale: f64) -> f64 {
    2f64.powf(-10.0 * t) * ((period_scale * t - 0.075) * (2.0 * PI) / 0.3).sin() + 1.0
}

fn back_in(t: f64, s: f64) -> f64 {
    t * t * ((s + 1.0) * t - s)
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
