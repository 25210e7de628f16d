//! Annotation session: the state an interactive shell keeps between calls.
//!
//! The session owns the loaded image, the current orientation set, the
//! clicked annotation points, a buffer of freshly built traits and the
//! committed trait list. Every pipeline stage is a method taking explicit
//! options; nothing is global.

use crate::error::{Error, Result};
use crate::fit::{fit_arc, fit_circle};
use crate::geometry::{
    render_geometry, Line, Point, Ray, RenderGeometry, Segment, Trait, ViewportBounds,
};
use crate::image::{ImageF32, ImageView};
use crate::orientation::{
    estimate_orientations, orientation_from_points, OrientationOptions, OrientationSet,
};
use crate::projection::{detect_lines, ProjectionOptions};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Primitive to build from the annotation points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitKind {
    Line,
    Segment,
    Ray,
    Circle,
    Arc,
}

impl TraitKind {
    /// Clicked points needed in the general case.
    pub fn required_points(&self) -> usize {
        match self {
            TraitKind::Line | TraitKind::Segment | TraitKind::Ray | TraitKind::Circle => 2,
            TraitKind::Arc => 3,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnnotationSession {
    image: Option<ImageF32>,
    orientations: OrientationSet,
    annotation: Vec<Point>,
    buffer: Vec<Trait>,
    list: Vec<Trait>,
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working image (raster order). The viewport follows its
    /// extents from now on.
    pub fn load_image(&mut self, image: ImageF32) {
        info!("session: image {}x{} loaded", image.w, image.h);
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageF32> {
        self.image.as_ref()
    }

    pub fn push_point(&mut self, p: Point) -> Result<()> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "annotation point ({}, {}) is not finite",
                p.x, p.y
            )));
        }
        self.annotation.push(p);
        Ok(())
    }

    pub fn annotation(&self) -> &[Point] {
        &self.annotation
    }

    pub fn reset_annotation(&mut self) {
        self.annotation.clear();
    }

    pub fn orientations(&self) -> &OrientationSet {
        &self.orientations
    }

    /// Estimate orientations from the loaded image. Without an image the set
    /// becomes empty.
    pub fn detect_orientations(&mut self, opts: &OrientationOptions) -> Result<&OrientationSet> {
        self.orientations = match &self.image {
            Some(image) => estimate_orientations(image, opts)?,
            None => {
                warn!("session: no image loaded, orientation set cleared");
                OrientationSet::new()
            }
        };
        info!(
            "session: orientations [{}] deg",
            self.orientations.to_degrees_text()
        );
        Ok(&self.orientations)
    }

    /// Replace the orientations with comma-separated degrees. On a parse
    /// error the current set is kept.
    pub fn set_orientations_from_text(&mut self, text: &str) -> Result<&OrientationSet> {
        self.orientations = OrientationSet::from_degrees_text(text)?;
        info!(
            "session: orientations corrected to [{}] deg",
            self.orientations.to_degrees_text()
        );
        Ok(&self.orientations)
    }

    /// Append the orientation of the last two annotation points and clear the
    /// annotation. Returns the new orientation in radians.
    pub fn orientation_from_annotation(&mut self) -> Result<f64> {
        let n = self.annotation.len();
        if n < 2 {
            warn!("session: estimating an orientation needs two points, got {n}");
            return Err(Error::InsufficientPoints {
                required: 2,
                available: n,
            });
        }
        if n > 2 {
            warn!("session: orientation from the last two of {n} points, others discarded");
        }
        let result = orientation_from_points(&self.annotation[n - 2], &self.annotation[n - 1]);
        self.reset_annotation();
        let angle = result?;
        if self.orientations.push(angle) {
            info!("session: orientation {angle:.2} rad appended");
        } else {
            info!("session: orientation {angle:.2} rad already present");
        }
        Ok(angle)
    }

    /// Run projection line detection on the loaded image with the current
    /// orientations. The buffer is replaced by the found lines; returns their
    /// count.
    pub fn detect_lines(&mut self, opts: &ProjectionOptions) -> Result<usize> {
        let image = self
            .image
            .as_ref()
            .ok_or(Error::EmptyInput("line detection needs a loaded image"))?;
        let lines = detect_lines(image, &self.orientations, opts)?;
        info!("session: found {} lines", lines.len());
        self.buffer = lines;
        Ok(self.buffer.len())
    }

    /// Build a `kind` trait from the annotation points and append it to the
    /// buffer.
    ///
    /// - Fewer than two points: a single point with exactly one known
    ///   orientation makes a line along it; anything else is
    ///   `InsufficientPoints` and the annotation is kept.
    /// - Line, segment, ray: the last two points.
    /// - Circle: two points are center then perimeter, more use the last three.
    /// - Arc: the first three points as start, middle, end.
    ///
    /// Otherwise the annotation is cleared whether or not the fit succeeds.
    pub fn construct_trait(&mut self, kind: TraitKind) -> Result<Trait> {
        let n = self.annotation.len();
        if n < 2 {
            let along_orientation = match (self.annotation.last(), self.orientations.angles(), kind) {
                (Some(&p), &[theta], TraitKind::Line) => Some((p, theta)),
                _ => None,
            };
            if let Some((p, theta)) = along_orientation {
                let t = Trait::from(Line::from_point_angle(p, theta)?);
                self.buffer.push(t);
                self.reset_annotation();
                return Ok(t);
            }
            warn!("session: not enough points for a {kind:?} ({n} given)");
            return Err(Error::InsufficientPoints {
                required: kind.required_points(),
                available: n,
            });
        }

        let result = self.build(kind);
        self.reset_annotation();
        let t = result?;
        self.buffer.push(t);
        Ok(t)
    }

    fn build(&self, kind: TraitKind) -> Result<Trait> {
        let pts = &self.annotation;
        let (a, b) = (pts[pts.len() - 2], pts[pts.len() - 1]);
        let t = match kind {
            TraitKind::Line => Line::through(a, b)?.into(),
            TraitKind::Segment => Segment::new(a, b)?.into(),
            TraitKind::Ray => Ray::new(a, b)?.into(),
            TraitKind::Circle => fit_circle(pts)?.into(),
            TraitKind::Arc => fit_arc(pts)?.into(),
        };
        Ok(t)
    }

    /// Traits built but not yet committed.
    pub fn buffer(&self) -> &[Trait] {
        &self.buffer
    }

    /// Committed traits.
    pub fn traits(&self) -> &[Trait] {
        &self.list
    }

    /// Committed traits followed by the buffer.
    pub fn all_traits(&self) -> Vec<Trait> {
        self.list.iter().chain(self.buffer.iter()).copied().collect()
    }

    /// Move the buffer into the trait list; returns how many were moved.
    pub fn commit_buffer(&mut self) -> usize {
        let n = self.buffer.len();
        self.list.append(&mut self.buffer);
        n
    }

    pub fn reset_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn reset_list(&mut self) {
        self.list.clear();
    }

    /// Remove one committed trait.
    pub fn remove_trait(&mut self, index: usize) -> Option<Trait> {
        (index < self.list.len()).then(|| self.list.remove(index))
    }

    /// Image extents when an image is loaded, otherwise the bounding box of
    /// all traits. `None` when neither exists.
    pub fn viewport(&self) -> Option<ViewportBounds> {
        match &self.image {
            Some(image) if !image.is_empty() => Some(ViewportBounds::from_image(image.w, image.h)),
            _ => ViewportBounds::from_traits(&self.all_traits()),
        }
    }

    /// Render geometry for the committed traits, then the buffer.
    pub fn render(&self) -> Vec<RenderGeometry> {
        let Some(bounds) = self.viewport() else {
            return Vec::new();
        };
        self.list
            .iter()
            .chain(self.buffer.iter())
            .map(|t| render_geometry(t, &bounds))
            .collect()
    }

    /// Viewport grown by `margin`, used as the finite frame handed to an
    /// arrangement builder alongside the traits.
    pub fn export_bounds(&self, margin: f64) -> Option<ViewportBounds> {
        self.viewport().map(|b| b.expanded(margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Circle;

    fn session_with_points(points: &[(f64, f64)]) -> AnnotationSession {
        let mut s = AnnotationSession::new();
        for &(x, y) in points {
            s.push_point(Point::new(x, y)).unwrap();
        }
        s
    }

    #[test]
    fn line_segment_ray_use_last_two_points() {
        let mut s = session_with_points(&[(9.0, 9.0), (0.0, 0.0), (4.0, 2.0)]);
        let t = s.construct_trait(TraitKind::Segment).unwrap();
        match t {
            Trait::Segment(seg) => {
                assert_eq!(seg.p1(), Point::new(0.0, 0.0));
                assert_eq!(seg.p2(), Point::new(4.0, 2.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(s.annotation().is_empty());
        assert_eq!(s.buffer().len(), 1);
    }

    #[test]
    fn single_point_line_uses_the_only_orientation() {
        let mut s = session_with_points(&[(3.0, 4.0)]);
        assert!(matches!(
            s.construct_trait(TraitKind::Line),
            Err(Error::InsufficientPoints {
                required: 2,
                available: 1
            })
        ));
        assert_eq!(s.annotation().len(), 1, "failed construction keeps the point");

        s.set_orientations_from_text("90").unwrap();
        let t = s.construct_trait(TraitKind::Line).unwrap();
        match t {
            Trait::Line(l) => {
                assert_eq!(l.p1(), Point::new(3.0, 4.0));
                assert!(l.direction().x.abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(s.annotation().is_empty());
    }

    #[test]
    fn circle_and_arc_construction() {
        let mut s = session_with_points(&[(1.0, 1.0), (1.0, 3.0)]);
        let c = s.construct_trait(TraitKind::Circle).unwrap();
        assert_eq!(c, Trait::from(Circle::new(Point::new(1.0, 1.0), 2.0).unwrap()));

        let mut s = session_with_points(&[(1.0, 0.0), (0.0, 1.0)]);
        assert!(s.construct_trait(TraitKind::Arc).is_err());
        assert!(s.annotation().is_empty());

        let mut s = session_with_points(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        match s.construct_trait(TraitKind::Arc).unwrap() {
            Trait::Arc(a) => {
                assert!(a.t1().abs() < 1e-9);
                assert!((a.t2() - std::f64::consts::PI).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn collinear_circle_is_degenerate_and_clears_annotation() {
        let mut s = session_with_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(matches!(
            s.construct_trait(TraitKind::Circle),
            Err(Error::DegenerateFit(_))
        ));
        assert!(s.annotation().is_empty());
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn orientation_from_annotation_appends() {
        let mut s = session_with_points(&[(0.0, 0.0)]);
        assert!(s.orientation_from_annotation().is_err());
        s.push_point(Point::new(5.0, 5.0)).unwrap();
        let a = s.orientation_from_annotation().unwrap();
        assert!((a - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(s.orientations().len(), 1);
        assert!(s.annotation().is_empty());
    }

    #[test]
    fn buffer_list_lifecycle_and_viewport() {
        let mut s = session_with_points(&[(0.0, 0.0), (10.0, 4.0)]);
        s.construct_trait(TraitKind::Segment).unwrap();
        s.push_point(Point::new(20.0, 20.0)).unwrap();
        s.push_point(Point::new(22.0, 20.0)).unwrap();
        s.construct_trait(TraitKind::Circle).unwrap();
        assert_eq!(s.commit_buffer(), 2);
        assert!(s.buffer().is_empty());
        assert_eq!(s.traits().len(), 2);

        let vp = s.viewport().unwrap();
        assert_eq!(vp.to_array(), [0.0, 0.0, 22.0, 22.0]);
        assert_eq!(s.export_bounds(1.0).unwrap().to_array(), [-1.0, -1.0, 23.0, 23.0]);
        assert_eq!(s.render().len(), 2);

        s.load_image(ImageF32::new(100, 50));
        assert_eq!(s.viewport().unwrap().to_array(), [0.0, 0.0, 100.0, 50.0]);

        assert!(s.remove_trait(5).is_none());
        assert!(matches!(s.remove_trait(0), Some(Trait::Segment(_))));
        s.reset_list();
        assert!(s.traits().is_empty());
    }

    #[test]
    fn detection_without_image() {
        let mut s = AnnotationSession::new();
        assert!(s
            .detect_orientations(&OrientationOptions::default())
            .unwrap()
            .is_empty());
        assert!(matches!(
            s.detect_lines(&ProjectionOptions::default()),
            Err(Error::EmptyInput(_))
        ));
        assert!(s.viewport().is_none());
        assert!(s.render().is_empty());
    }
}
