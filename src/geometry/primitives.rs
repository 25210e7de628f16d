use super::Point;
use crate::angle::ccw_bounds;
use crate::error::{Error, Result};
use nalgebra::Vector2;
use serde::Serialize;
use std::f64::consts::TAU;

fn check_point(p: &Point, what: &str) -> Result<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidGeometry(format!(
            "{what} must be finite, got ({}, {})",
            p.x, p.y
        )))
    }
}

fn check_distinct(a: &Point, b: &Point, what: &str) -> Result<()> {
    if a == b {
        Err(Error::InvalidGeometry(format!("{what} needs two distinct points")))
    } else {
        Ok(())
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidGeometry(format!(
            "radius must be finite and positive, got {radius}"
        )))
    }
}

/// Infinite line through two distinct points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Line {
    p1: Point,
    p2: Point,
}

impl Line {
    pub fn through(p1: Point, p2: Point) -> Result<Self> {
        check_point(&p1, "line point")?;
        check_point(&p2, "line point")?;
        check_distinct(&p1, &p2, "line")?;
        Ok(Self { p1, p2 })
    }

    /// Line through `p` with slope `dy/dx`; an infinite slope is vertical.
    pub fn from_point_slope(p: Point, slope: f64) -> Result<Self> {
        if slope.is_nan() {
            return Err(Error::InvalidGeometry("slope is NaN".to_string()));
        }
        let dir = if slope.is_infinite() {
            Vector2::new(0.0, 1.0)
        } else {
            Vector2::new(1.0, slope)
        };
        Self::through(p, p + dir)
    }

    /// Line through `p` along `angle` (radians, counter-clockwise from +x).
    pub fn from_point_angle(p: Point, angle: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(Error::InvalidGeometry(format!("angle must be finite, got {angle}")));
        }
        Self::through(p, p + Vector2::new(angle.cos(), angle.sin()))
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.p2 - self.p1
    }
}

/// Bounded segment between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    p1: Point,
    p2: Point,
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Result<Self> {
        check_point(&p1, "segment endpoint")?;
        check_point(&p2, "segment endpoint")?;
        check_distinct(&p1, &p2, "segment")?;
        Ok(Self { p1, p2 })
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }
}

/// Semi-infinite ray from `origin` through `through`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ray {
    origin: Point,
    through: Point,
}

impl Ray {
    pub fn new(origin: Point, through: Point) -> Result<Self> {
        check_point(&origin, "ray origin")?;
        check_point(&through, "ray direction point")?;
        check_distinct(&origin, &through, "ray")?;
        Ok(Self { origin, through })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn through(&self) -> Point {
        self.through
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.through - self.origin
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self> {
        check_point(&center, "circle center")?;
        check_radius(radius)?;
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Circular arc swept counter-clockwise from `t1` to `t2` (radians).
///
/// Construction lifts `t2` by whole turns so that `t1 <= t2 <= t1 + 2π`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arc {
    center: Point,
    radius: f64,
    t1: f64,
    t2: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, t1: f64, t2: f64) -> Result<Self> {
        check_point(&center, "arc center")?;
        check_radius(radius)?;
        if !(t1.is_finite() && t2.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "arc bounds must be finite, got ({t1}, {t2})"
            )));
        }
        let (t1, t2) = ccw_bounds(t1, t2);
        Ok(Self {
            center,
            radius,
            t1,
            t2,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn t1(&self) -> f64 {
        self.t1
    }

    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// Swept angle in `[0, 2π]`.
    pub fn sweep(&self) -> f64 {
        (self.t2 - self.t1).clamp(0.0, TAU)
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.center + Vector2::new(t.cos(), t.sin()) * self.radius
    }
}

/// One geometric primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Trait {
    Line(Line),
    Segment(Segment),
    Ray(Ray),
    Circle(Circle),
    Arc(Arc),
}

impl Trait {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Trait::Line(_) => "line",
            Trait::Segment(_) => "segment",
            Trait::Ray(_) => "ray",
            Trait::Circle(_) => "circle",
            Trait::Arc(_) => "arc",
        }
    }

    /// Points whose bounding box contains the defining geometry: both
    /// defining points of lines/segments/rays, `center ± radius` on both axes
    /// for circles and arcs.
    pub fn extent_points(&self) -> Vec<Point> {
        match self {
            Trait::Line(l) => vec![l.p1, l.p2],
            Trait::Segment(s) => vec![s.p1, s.p2],
            Trait::Ray(r) => vec![r.origin, r.through],
            Trait::Circle(c) => circle_extremes(&c.center, c.radius),
            Trait::Arc(a) => circle_extremes(&a.center, a.radius),
        }
    }
}

fn circle_extremes(c: &Point, r: f64) -> Vec<Point> {
    vec![
        Point::new(c.x - r, c.y - r),
        Point::new(c.x + r, c.y + r),
    ]
}

impl From<Line> for Trait {
    fn from(v: Line) -> Self {
        Trait::Line(v)
    }
}

impl From<Segment> for Trait {
    fn from(v: Segment) -> Self {
        Trait::Segment(v)
    }
}

impl From<Ray> for Trait {
    fn from(v: Ray) -> Self {
        Trait::Ray(v)
    }
}

impl From<Circle> for Trait {
    fn from(v: Circle) -> Self {
        Trait::Circle(v)
    }
}

impl From<Arc> for Trait {
    fn from(v: Arc) -> Self {
        Trait::Arc(v)
    }
}
