use super::{Point, Trait};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned drawing rectangle in display coordinates (y up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportBounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl ViewportBounds {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self> {
        let finite = [x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min > x_max || y_min > y_max {
            return Err(Error::InvalidGeometry(format!(
                "viewport ({x_min}, {y_min}, {x_max}, {y_max}) is not a finite rectangle"
            )));
        }
        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Pixel extents of a `w × h` image: `(0, 0, w, h)`.
    pub fn from_image(w: usize, h: usize) -> Self {
        Self {
            x_min: 0.0,
            y_min: 0.0,
            x_max: w as f64,
            y_max: h as f64,
        }
    }

    /// Bounding box of every trait's extent points; `None` without traits.
    pub fn from_traits(traits: &[Trait]) -> Option<Self> {
        let mut points = traits.iter().flat_map(|t| t.extent_points());
        let first = points.next()?;
        let init = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        Some(points.fold(init, |b, p| Self {
            x_min: b.x_min.min(p.x),
            y_min: b.y_min.min(p.y),
            x_max: b.x_max.max(p.x),
            y_max: b.y_max.max(p.y),
        }))
    }

    /// Grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            x_min: self.x_min - margin,
            y_min: self.y_min - margin,
            x_max: self.x_max + margin,
            y_max: self.y_max + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.x_min + self.x_max),
            0.5 * (self.y_min + self.y_max),
        )
    }

    /// Inclusive containment with an absolute slack of `tol`.
    pub fn contains(&self, p: &Point, tol: f64) -> bool {
        p.x >= self.x_min - tol
            && p.x <= self.x_max + tol
            && p.y >= self.y_min - tol
            && p.y <= self.y_max + tol
    }

    /// Array form `[x_min, y_min, x_max, y_max]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Segment};

    #[test]
    fn from_image_uses_pixel_extents() {
        let b = ViewportBounds::from_image(640, 480);
        assert_eq!(b.to_array(), [0.0, 0.0, 640.0, 480.0]);
        assert_eq!(b.center(), Point::new(320.0, 240.0));
    }

    #[test]
    fn from_traits_covers_endpoints_and_circle_extremes() {
        let traits = vec![
            Trait::from(Segment::new(Point::new(1.0, 2.0), Point::new(4.0, -3.0)).unwrap()),
            Trait::from(Circle::new(Point::new(10.0, 10.0), 2.5).unwrap()),
        ];
        let b = ViewportBounds::from_traits(&traits).unwrap();
        assert_eq!(b.to_array(), [1.0, -3.0, 12.5, 12.5]);
        assert!(ViewportBounds::from_traits(&[]).is_none());
    }

    #[test]
    fn expanded_and_contains() {
        let b = ViewportBounds::from_image(10, 10).expanded(1.0);
        assert_eq!(b.to_array(), [-1.0, -1.0, 11.0, 11.0]);
        assert!(b.contains(&Point::new(-1.0, 11.0), 0.0));
        assert!(!b.contains(&Point::new(-1.1, 5.0), 0.0));
        assert!(ViewportBounds::new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(ViewportBounds::new(0.0, f64::NAN, 1.0, 1.0).is_err());
    }
}
