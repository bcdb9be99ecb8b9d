//! Relative floating point comparisons shared by the solvers and the planner.
//!
//! Two values are treated as equal when their difference is within
//! `tolerance` scaled by the larger magnitude. The scale never drops below
//! one, so values near zero compare on an absolute basis instead of
//! requiring exact equality.

/// Default relative tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

fn scale(a: f64, b: f64) -> f64 {
    a.abs().max(b.abs()).max(1.0)
}

/// `a ≈ b`
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * scale(a, b)
}

/// `a ≤ b`, allowing `a` to exceed `b` by the tolerance
pub fn approx_le(a: f64, b: f64, tolerance: f64) -> bool {
    a - b <= tolerance * scale(a, b)
}

/// Snap values that are within tolerance of zero to exactly zero
pub fn snap_zero(value: f64, tolerance: f64) -> f64 {
    if value.abs() <= tolerance { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_equality() {
        assert!(approx_eq(170000.0, 170000.0 + 1e-5, DEFAULT_TOLERANCE));
        assert!(!approx_eq(170000.0, 170000.1, DEFAULT_TOLERANCE));
        assert!(approx_eq(0.0, 1e-10, DEFAULT_TOLERANCE));
        assert!(!approx_eq(0.0, 1e-6, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_approx_le() {
        assert!(approx_le(6000.0 + 1e-7, 6000.0, DEFAULT_TOLERANCE));
        assert!(!approx_le(6000.1, 6000.0, DEFAULT_TOLERANCE));
        assert!(approx_le(-5.0, 0.0, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_snap_zero() {
        assert_eq!(snap_zero(-1e-12, DEFAULT_TOLERANCE), 0.0);
        assert_eq!(snap_zero(0.5, DEFAULT_TOLERANCE), 0.5);
    }
}
