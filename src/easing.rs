//! Easing curves for height transitions.
//!
//! An [`Ease`] controls the rate of change over the course of a transition.
//! Curves can be picked programmatically or resolved from the string
//! identifiers used by configuration and per-element attributes (see
//! [`Ease::parse`]), in the naming style of the usual tween libraries.

/// Easing curve applied to a transition's interpolation factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// Constant speed (the `easeNoneLinear` of tween libraries)
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// CSS-style cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Ease {
    /// Evaluate the curve at time `t` (0.0 to 1.0), returning the
    /// interpolation factor.
    pub fn evaluate(self, t: f32) -> f32 {
        match self {
            Ease::Linear => t,
            Ease::EaseIn => ease_in(t),
            Ease::EaseOut => ease_out(t),
            Ease::EaseInOut => ease_in_out(t),
            Ease::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Resolve a named ease identifier.
    ///
    /// Unknown names yield `None`; callers fall back to the configured
    /// default rather than raising an error.
    pub fn parse(name: &str) -> Option<Ease> {
        match name {
            "linear" | "easeNone" | "easeNoneLinear" => Some(Ease::Linear),
            "easeIn" | "easeInQuad" => Some(Ease::EaseIn),
            "easeOut" | "easeOutQuad" => Some(Ease::EaseOut),
            "easeInOut" | "easeInOutQuad" => Some(Ease::EaseInOut),
            _ => None,
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Linear
    }
}

// Easing functions

fn ease_in(t: f32) -> f32 {
    t * t
}

fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Cubic bezier curve evaluation
/// Simplified implementation assuming x1, x2 are in [0, 1]
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Use Newton-Raphson to solve for t given x
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t, y1, y2)
}

fn cubic_bezier_x(t: f32, x1: f32, x2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * x1 + 3.0 * mt * t2 * x2 + t3
}

fn cubic_bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * y1 + 3.0 * mt * t2 * y2 + t3
}

fn cubic_bezier_slope(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}
