//! Closed-form circle and arc fitting from clicked points.
//!
//! The three-point circumcircle is solved with the determinant form
//!
//! ```text
//! A = |x1 y1 1|   D = |x1²+y1² y1 1|   E = |x1²+y1² x1 1|   F = |x1²+y1² x1 y1|
//!     |x2 y2 1|       |x2²+y2² y2 1|       |x2²+y2² x2 1|       |x2²+y2² x2 y2|
//!     |x3 y3 1|       |x3²+y3² y3 1|       |x3²+y3² x3 1|       |x3²+y3² x3 y3|
//!
//! a = det A, d = −det D, e = det E, f = −det F
//! center = (−d / 2a, −e / 2a),  r = sqrt((d² + e²) / 4a² − f / a)
//! ```
//!
//! `a` is twice the signed triangle area, so near-collinear input is rejected
//! before any division happens.

use crate::error::{Error, Result};
use crate::geometry::{Arc, Circle, Point};
use log::warn;
use nalgebra::Matrix3;

/// `|a|` below this fraction of `|p2 − p1|·|p3 − p1|` counts as collinear.
const COLLINEAR_EPS: f64 = 1e-10;

/// Circle centred at `center` passing through `perimeter`.
pub fn circle_from_center_and_point(center: Point, perimeter: Point) -> Result<Circle> {
    let radius = (perimeter - center).norm();
    if !(radius > 0.0) {
        return Err(Error::DegenerateFit(
            "center and perimeter point coincide".to_string(),
        ));
    }
    Circle::new(center, radius)
}

/// Circle through three points.
pub fn circumcircle(p1: Point, p2: Point, p3: Point) -> Result<Circle> {
    let (center, radius) = circumcircle_parts(&p1, &p2, &p3)?;
    Circle::new(center, radius).map_err(|e| Error::DegenerateFit(e.to_string()))
}

/// Arc from `start` through `mid` to `end`, swept counter-clockwise from the
/// start angle; the end angle is lifted by 2π when it is below the start.
pub fn arc_through(start: Point, mid: Point, end: Point) -> Result<Arc> {
    let (center, radius) = circumcircle_parts(&start, &mid, &end)?;
    let t1 = (start.y - center.y).atan2(start.x - center.x);
    let mut t2 = (end.y - center.y).atan2(end.x - center.x);
    if t1 > t2 {
        t2 += std::f64::consts::TAU;
    }
    Arc::new(center, radius, t1, t2).map_err(|e| Error::DegenerateFit(e.to_string()))
}

/// Circle from clicked points: two points are center then perimeter, three or
/// more use the last three as perimeter points.
pub fn fit_circle(points: &[Point]) -> Result<Circle> {
    match points {
        [] | [_] => Err(Error::InsufficientPoints {
            required: 2,
            available: points.len(),
        }),
        [c, p] => circle_from_center_and_point(*c, *p),
        [.., a, b, c] => circumcircle(*a, *b, *c),
    }
}

/// Arc from the first three clicked points (start, middle, end).
pub fn fit_arc(points: &[Point]) -> Result<Arc> {
    match points {
        [start, mid, end, rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    "arc fit uses the first 3 of {} points, the rest are ignored",
                    points.len()
                );
            }
            arc_through(*start, *mid, *end)
        }
        _ => Err(Error::InsufficientPoints {
            required: 3,
            available: points.len(),
        }),
    }
}

fn circumcircle_parts(p1: &Point, p2: &Point, p3: &Point) -> Result<(Point, f64)> {
    let finite = [p1, p2, p3]
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite());
    if !finite {
        return Err(Error::DegenerateFit("points must be finite".to_string()));
    }
    let span = (p2 - p1).norm() * (p3 - p1).norm();
    if !(span > 0.0) || p2 == p3 {
        return Err(Error::DegenerateFit("coincident points".to_string()));
    }

    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let (s1, s2, s3) = (x1 * x1 + y1 * y1, x2 * x2 + y2 * y2, x3 * x3 + y3 * y3);

    #[rustfmt::skip]
    let a = Matrix3::new(
        x1, y1, 1.0,
        x2, y2, 1.0,
        x3, y3, 1.0,
    ).determinant();
    if a.abs() <= COLLINEAR_EPS * span {
        return Err(Error::DegenerateFit(format!(
            "collinear points (det = {a:e})"
        )));
    }
    #[rustfmt::skip]
    let d = -Matrix3::new(
        s1, y1, 1.0,
        s2, y2, 1.0,
        s3, y3, 1.0,
    ).determinant();
    #[rustfmt::skip]
    let e = Matrix3::new(
        s1, x1, 1.0,
        s2, x2, 1.0,
        s3, x3, 1.0,
    ).determinant();
    #[rustfmt::skip]
    let f = -Matrix3::new(
        s1, x1, y1,
        s2, x2, y2,
        s3, x3, y3,
    ).determinant();

    let center = Point::new(-d / (2.0 * a), -e / (2.0 * a));
    let radius = ((d * d + e * e) / (4.0 * a * a) - f / a).sqrt();
    if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite() && radius > 0.0) {
        return Err(Error::DegenerateFit(format!(
            "non-finite circle (center = ({}, {}), r = {radius})",
            center.x, center.y
        )));
    }
    Ok((center, radius))
}
