use super::{clip_line, clip_ray, Point, Trait, ViewportBounds};
use nalgebra::Vector2;
use serde::Serialize;
use std::f64::consts::TAU;

/// Samples used to draw a full circle.
pub const CIRCLE_SAMPLES: usize = 90;

/// What a renderer draws for one trait.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderGeometry {
    /// Connected points; lines and segments have two.
    Polyline { points: Vec<Point> },
    /// Ray drawn from `origin` along `vector` up to the viewport boundary.
    Arrow {
        origin: Point,
        vector: Vector2<f64>,
    },
    /// Nothing visible inside the viewport.
    Hidden,
}

impl RenderGeometry {
    pub fn is_visible(&self) -> bool {
        !matches!(self, RenderGeometry::Hidden)
    }
}

fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| start + step * i as f64)
}

/// Render geometry for `t` inside `bounds`. The only per-kind dispatch used
/// for drawing.
pub fn render_geometry(t: &Trait, bounds: &ViewportBounds) -> RenderGeometry {
    match t {
        Trait::Line(line) => match clip_line(line, bounds) {
            Some(points) => RenderGeometry::Polyline {
                points: points.to_vec(),
            },
            None => RenderGeometry::Hidden,
        },
        Trait::Ray(ray) => match clip_ray(ray, bounds) {
            Some((origin, vector)) => RenderGeometry::Arrow { origin, vector },
            None => RenderGeometry::Hidden,
        },
        Trait::Segment(seg) => RenderGeometry::Polyline {
            points: vec![seg.p1(), seg.p2()],
        },
        Trait::Circle(c) => RenderGeometry::Polyline {
            points: linspace(0.0, TAU, CIRCLE_SAMPLES)
                .map(|a| c.center() + Vector2::new(a.cos(), a.sin()) * c.radius())
                .collect(),
        },
        Trait::Arc(arc) => {
            // one sample per swept degree
            let count = (arc.sweep().to_degrees().floor() as usize).max(2);
            RenderGeometry::Polyline {
                points: linspace(arc.t1(), arc.t2(), count)
                    .map(|a| arc.point_at(a))
                    .collect(),
            }
        }
    }
}
