use kurbo::{ParamCurve, ParamCurveArclen, PathEl};

use crate::foundation::core::Point;
use crate::route::path::{ARCLEN_ACCURACY, Curve};

/// Arc length between the sampled position and the look-ahead point used for the tangent.
pub const TANGENT_LOOKAHEAD: f64 = 1.0;

/// Position and heading at one arc length along a curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CurveSample {
    /// Point on the curve.
    pub position: Point,
    /// Heading in degrees, `atan2(dy, dx)` convention.
    pub tangent_angle_deg: f64,
}

/// Uniform-speed lookup along a [`Curve`].
///
/// Hosts may supply their own implementation backed by whatever geometry API they have.
pub trait CurveSampler {
    /// Total arc length of `curve`.
    fn total_length(&self, curve: &Curve) -> f64;

    /// Point at arc length `length`, clamped to `[0, total_length]`.
    fn point_at(&self, curve: &Curve, length: f64) -> Point;

    /// Position and tangent heading at arc length `length`.
    ///
    /// The heading is taken toward a point [`TANGENT_LOOKAHEAD`] further along, clamped to the
    /// curve's end, so the heading at the very end is `0`.
    fn sample_at(&self, curve: &Curve, length: f64) -> CurveSample {
        let total = self.total_length(curve);
        sample_along(total, length, |s| self.point_at(curve, s))
    }
}

pub(crate) fn clamp_length(length: f64, total: f64) -> f64 {
    if length.is_nan() {
        return 0.0;
    }
    length.clamp(0.0, total.max(0.0))
}

fn sample_along(total: f64, length: f64, point_at: impl Fn(f64) -> Point) -> CurveSample {
    let s = clamp_length(length, total);
    let position = point_at(s);
    let ahead = point_at((s + TANGENT_LOOKAHEAD).min(total));
    CurveSample {
        position,
        tangent_angle_deg: (ahead - position).atan2().to_degrees(),
    }
}

/// Sampler backed by kurbo's arc-length and inverse arc-length solvers.
#[derive(Clone, Copy, Debug)]
pub struct ArclenSampler {
    accuracy: f64,
}

impl ArclenSampler {
    /// Create a sampler solving inverse arc length to `accuracy` surface units.
    pub fn new(accuracy: f64) -> Self {
        Self { accuracy }
    }
}

impl Default for ArclenSampler {
    fn default() -> Self {
        Self::new(ARCLEN_ACCURACY)
    }
}

impl CurveSampler for ArclenSampler {
    fn total_length(&self, curve: &Curve) -> f64 {
        curve.total_length()
    }

    fn point_at(&self, curve: &Curve, length: f64) -> Point {
        let s = clamp_length(length, curve.total_length());
        let (i, local) = curve.locate(s);
        let seg = curve.segments()[i].path_seg();
        let seg_len = curve.segment_lengths()[i];

        let t = if local <= 0.0 || seg_len <= 0.0 {
            0.0
        } else if local >= seg_len {
            1.0
        } else {
            seg.inv_arclen(local, self.accuracy).clamp(0.0, 1.0)
        };
        seg.eval(t)
    }
}

/// Sampler that flattens the curve into a polyline within `tolerance` and interpolates along
/// the cumulative chord lengths.
#[derive(Clone, Copy, Debug)]
pub struct PolylineSampler {
    tolerance: f64,
}

impl PolylineSampler {
    /// Create a sampler flattening to within `tolerance` surface units.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn polyline(&self, curve: &Curve) -> Polyline {
        let mut pl = Polyline::default();
        let path = curve.measured_path();
        kurbo::flatten(path.elements().iter().copied(), self.tolerance, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => pl.push(p),
            _ => {}
        });
        pl
    }
}

impl Default for PolylineSampler {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl CurveSampler for PolylineSampler {
    fn total_length(&self, curve: &Curve) -> f64 {
        self.polyline(curve).total()
    }

    fn point_at(&self, curve: &Curve, length: f64) -> Point {
        self.polyline(curve).point_at(length)
    }

    fn sample_at(&self, curve: &Curve, length: f64) -> CurveSample {
        let pl = self.polyline(curve);
        sample_along(pl.total(), length, |s| pl.point_at(s))
    }
}

#[derive(Debug, Default)]
struct Polyline {
    points: Vec<Point>,
    cumulative: Vec<f64>,
}

impl Polyline {
    fn push(&mut self, p: Point) {
        let run = match self.points.last() {
            Some(prev) => self.total() + prev.distance(p),
            None => 0.0,
        };
        self.points.push(p);
        self.cumulative.push(run);
    }

    fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, length: f64) -> Point {
        let Some(&first) = self.points.first() else {
            return Point::ORIGIN;
        };
        let s = clamp_length(length, self.total());
        // First vertex whose cumulative length reaches `s`.
        let hi = self.cumulative.partition_point(|&c| c < s);
        if hi == 0 {
            return first;
        }
        if hi >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (c0, c1) = (self.cumulative[hi - 1], self.cumulative[hi]);
        let span = c1 - c0;
        if span <= 0.0 {
            return self.points[hi];
        }
        self.points[hi - 1].lerp(self.points[hi], (s - c0) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/route/sampler.rs"]
mod tests;
