//! Length units.
//!
//! All geometry is expressed in PDF points (1/72 inch) as `f32`.

/// A length in points.
pub type Pt = f32;

/// Tolerance for comparing accumulated float lengths.
pub const EPSILON: Pt = 0.01;

const POINTS_PER_MM: Pt = 72.0 / 25.4;

/// Convert millimetres to points.
pub const fn mm(value: f32) -> Pt {
    value * POINTS_PER_MM
}

/// `a <= b`, tolerating float noise up to [`EPSILON`].
pub fn approx_le(a: Pt, b: Pt) -> bool {
    a <= b + EPSILON
}
