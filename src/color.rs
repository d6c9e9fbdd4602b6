//! Deterministic annotation colors via golden-ratio hue spacing.

use serde::{Deserialize, Serialize};

/// Conjugate of the golden ratio, `(sqrt(5) - 1) / 2`
///
/// Successive multiples of an irrational step never land near each other
/// modulo 1, so consecutive ordinals get hues that stay far apart even when
/// only a handful of colors are needed.
const PHI: f64 = 0.618_033_988_749_895;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// CSS `rgb(r, g, b)` form for styling rendered units
    #[must_use]
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Color for the annotation at `ordinal` out of `total`
///
/// Hue is `frac(ordinal * PHI)`; saturation is fixed at 0.5; value is
/// `1.0 - frac(ordinal * PHI) % 0.5`, a secondary decorrelation so that
/// hue near-collisions across long ordinal ranges still differ in
/// brightness. Pure and total for any ordinal.
///
/// `total` is accepted for interface symmetry but does not affect the
/// result.
#[must_use]
pub fn equidistributed_color(ordinal: usize, _total: usize) -> Rgb {
    let x = ordinal as f64 * PHI;
    let (r, g, b) = hsv_to_rgb(x % 1.0, 0.5, 1.0 - x % 0.5);
    Rgb {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}

/// HSV to RGB, all components in `[0, 1]`
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
