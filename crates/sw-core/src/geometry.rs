use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default plane width in world units.
pub const DEFAULT_WIDTH: f64 = 1024.0;
/// Default plane height in world units.
pub const DEFAULT_HEIGHT: f64 = 768.0;

/// Dimensions of the toroidal plane. Coordinates live in `[0, width)` x `[0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Plane width.
    pub width: f64,
    /// Plane height.
    pub height: f64,
}

impl Bounds {
    /// Create bounds, rejecting non-positive or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> CoreResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(CoreError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Wrap a point onto the torus, each axis independently.
    pub fn wrap(&self, x: f64, y: f64) -> (f64, f64) {
        (wrap_axis(x, self.width), wrap_axis(y, self.height))
    }

    /// Center of the plane.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Returns true if the point lies inside the canonical range.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Wrap a single coordinate into `[0, extent)`.
///
/// Overshooting the far edge by `e` lands at `e`; landing exactly on the far
/// edge lands on `0`, which is the same point on the torus.
pub fn wrap_axis(value: f64, extent: f64) -> f64 {
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negatives up to `extent` itself
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap_axis(degrees, 360.0)
}

/// Heading in degrees of the vector `(dx, dy)`, in `[0, 360)`.
///
/// The zero vector has heading `0`.
pub fn heading_of(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Straight-line distance between two points. Does not consider wraparound.
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).hypot(ay - by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bounds_reject_invalid_dimensions() {
        assert!(Bounds::new(0.0, 10.0).is_err());
        assert!(Bounds::new(10.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
        assert!(Bounds::new(f64::INFINITY, 10.0).is_err());
        assert!(Bounds::new(640.0, 480.0).is_ok());
    }

    #[test]
    fn overshoot_lands_past_origin() {
        let w = DEFAULT_WIDTH;
        let eps = 0.75;
        assert!((wrap_axis(w + eps, w) - eps).abs() < 1e-9);
    }

    #[test]
    fn far_edge_wraps_to_zero() {
        assert_eq!(wrap_axis(DEFAULT_WIDTH, DEFAULT_WIDTH), 0.0);
    }

    #[test]
    fn negative_wraps_to_far_side() {
        let wrapped = wrap_axis(-2.5, 100.0);
        assert!((wrapped - 97.5).abs() < 1e-9);
    }

    #[test]
    fn tiny_negative_never_reaches_extent() {
        let wrapped = wrap_axis(-1e-20, 100.0);
        assert!(wrapped < 100.0);
    }

    #[test]
    fn heading_quadrants() {
        assert_eq!(heading_of(0.0, 0.0), 0.0);
        assert!((heading_of(1.0, 0.0)).abs() < 1e-9);
        assert!((heading_of(0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((heading_of(-1.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((heading_of(0.0, -1.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_handles_full_turns() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn wrapped_coordinates_stay_in_range(x in -5000.0f64..5000.0, y in -5000.0f64..5000.0) {
            let bounds = Bounds::default();
            let (wx, wy) = bounds.wrap(x, y);
            prop_assert!(bounds.contains(wx, wy));
        }
    }
}
