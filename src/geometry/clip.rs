//! Clipping of unbounded primitives against a viewport.
//!
//! The viewport is treated as four infinite boundary lines. The supporting
//! line of the trait is intersected with each; parallel boundaries give no
//! point, and intersections outside the rectangle (beyond a small tolerance)
//! are discarded. Coincident hits at a corner collapse into one.

use super::{Line, Point, Ray, ViewportBounds};
use nalgebra::Vector2;

/// Relative slack for the inclusive bounds test and corner dedup.
const CLIP_EPS: f64 = 1e-9;

/// Intersection with the boundary lines as `(s, point)` pairs, where
/// `point = origin + s·dir`, sorted by `s` with coincident points merged.
fn boundary_hits(origin: &Point, dir: &Vector2<f64>, bounds: &ViewportBounds) -> Vec<(f64, Point)> {
    let scale = bounds
        .width()
        .abs()
        .max(bounds.height().abs())
        .max(origin.coords.amax())
        .max(1.0);
    let tol = CLIP_EPS * scale;
    let dir_norm = dir.norm();
    if !(dir_norm > 0.0) {
        return Vec::new();
    }

    let mut hits: Vec<(f64, Point)> = Vec::with_capacity(4);
    for &x in &[bounds.x_min, bounds.x_max] {
        if dir.x.abs() > CLIP_EPS * dir_norm {
            let s = (x - origin.x) / dir.x;
            hits.push((s, Point::new(x, origin.y + s * dir.y)));
        }
    }
    for &y in &[bounds.y_min, bounds.y_max] {
        if dir.y.abs() > CLIP_EPS * dir_norm {
            let s = (y - origin.y) / dir.y;
            hits.push((s, Point::new(origin.x + s * dir.x, y)));
        }
    }

    hits.retain(|(s, p)| s.is_finite() && bounds.contains(p, tol));
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.dedup_by(|a, b| (a.1 - b.1).norm() <= tol);
    hits
}

/// Visible endpoints of an infinite line, ordered along its direction.
/// `None` when the line misses the viewport or only touches a corner.
pub fn clip_line(line: &Line, bounds: &ViewportBounds) -> Option<[Point; 2]> {
    let hits = boundary_hits(&line.p1(), &line.direction(), bounds);
    match (hits.first(), hits.last()) {
        (Some(a), Some(b)) if hits.len() >= 2 => Some([a.1, b.1]),
        _ => None,
    }
}

/// Origin and draw vector of a ray: the vector reaches the boundary point
/// where the ray leaves the viewport going forward. `None` when the ray
/// never reaches the viewport boundary strictly ahead of its origin.
pub fn clip_ray(ray: &Ray, bounds: &ViewportBounds) -> Option<(Point, Vector2<f64>)> {
    let origin = ray.origin();
    let dir = ray.direction();
    let hits = boundary_hits(&origin, &dir, bounds);
    let tol = CLIP_EPS / dir.norm().max(f64::MIN_POSITIVE);
    let (_, exit) = hits.into_iter().filter(|(s, _)| *s > tol).last()?;
    Some((origin, exit - origin))
}
