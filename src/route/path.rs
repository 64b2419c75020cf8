use kurbo::{BezPath, Line, ParamCurveArclen, PathSeg, QuadBez};

use crate::foundation::core::Point;

/// Accuracy handed to kurbo's arc-length routines, in surface units.
pub(crate) const ARCLEN_ACCURACY: f64 = 1e-6;

// Relative distance under which a control point counts as sitting on an endpoint.
const DEGENERATE_EPS: f64 = 1e-9;

/// One quadratic piece of a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadSegment {
    /// Start point (end of the previous segment, or the first waypoint).
    pub start: Point,
    /// Control vertex.
    pub control: Point,
    /// End point.
    pub end: Point,
    /// `true` when `control` is the reflection of the previous segment's control (SVG `T`).
    pub smooth: bool,
}

impl QuadSegment {
    /// The segment as a kurbo quadratic Bézier.
    pub fn to_quad(self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    /// Geometry used for arc-length work.
    ///
    /// A control vertex sitting on an endpoint traces a straight line; it is measured as a
    /// [`Line`] since arc-length lookup does not depend on the parametrization.
    pub fn path_seg(self) -> PathSeg {
        let scale = 1.0 + self.start.distance(self.end);
        let on_start = self.control.distance(self.start) <= DEGENERATE_EPS * scale;
        let on_end = self.control.distance(self.end) <= DEGENERATE_EPS * scale;
        if on_start || on_end {
            PathSeg::Line(Line::new(self.start, self.end))
        } else {
            PathSeg::Quad(self.to_quad())
        }
    }
}

/// Smooth route through a waypoint sequence: quadratic segments with shared tangents at each
/// join, plus cached arc lengths.
///
/// Always holds at least one segment; only [`PathBuilder::build`] creates curves.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Curve {
    segments: Vec<QuadSegment>,
    lengths: Vec<f64>,
    total_length: f64,
}

impl Curve {
    fn from_segments(segments: Vec<QuadSegment>) -> Self {
        let lengths: Vec<f64> = segments
            .iter()
            .map(|s| s.path_seg().arclen(ARCLEN_ACCURACY).max(0.0))
            .collect();
        let total_length = lengths.iter().sum();
        Self {
            segments,
            lengths,
            total_length,
        }
    }

    /// Segments in travel order.
    pub fn segments(&self) -> &[QuadSegment] {
        &self.segments
    }

    /// Arc length of each segment, parallel to [`segments`](Self::segments).
    pub fn segment_lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Total arc length.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// First point of the curve (the first waypoint).
    pub fn start(&self) -> Point {
        self.segments[0].start
    }

    /// Last point of the curve (the last waypoint).
    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end
    }

    /// Segment index holding arc length `s` and the remaining length inside that segment.
    ///
    /// `s` is expected in `[0, total_length]`; the last segment absorbs rounding overshoot.
    pub(crate) fn locate(&self, s: f64) -> (usize, f64) {
        let last = self.lengths.len() - 1;
        let mut remaining = s.max(0.0);
        for (i, &len) in self.lengths.iter().enumerate() {
            if remaining <= len || i == last {
                return (i, remaining.min(len));
            }
            remaining -= len;
        }
        (last, self.lengths[last])
    }

    /// The curve as a kurbo path (`M` followed by one `Q` per segment).
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        for seg in &self.segments {
            path.quad_to(seg.control, seg.end);
        }
        path
    }

    /// Path with degenerate quadratics replaced by lines, as measured by the samplers.
    pub(crate) fn measured_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        for seg in &self.segments {
            match seg.path_seg() {
                PathSeg::Line(l) => path.line_to(l.p1),
                PathSeg::Quad(q) => path.quad_to(q.p1, q.p2),
                PathSeg::Cubic(c) => path.curve_to(c.p1, c.p2, c.p3),
            }
        }
        path
    }

    /// SVG path data (`d` attribute) for drawing the route.
    pub fn svg_path_data(&self) -> String {
        self.to_bez_path().to_svg()
    }
}

/// Builds the smooth route curve from a waypoint sequence.
pub struct PathBuilder;

impl PathBuilder {
    /// Build the curve for `points`, or `None` with fewer than two points.
    ///
    /// The first segment starts at point 0 with point 1 as control and ends at the midpoint of
    /// points 1 and 2 (or at point 1 for a two-point route). Every later segment reflects the
    /// previous control about the previous end, ending at the midpoint of its two bounding
    /// waypoints; the final segment ends exactly on the last waypoint.
    pub fn build(points: &[Point]) -> Option<Curve> {
        let n = points.len();
        if n < 2 {
            return None;
        }

        let end_of = |k: usize| -> Point {
            if k + 2 < n {
                points[k + 1].midpoint(points[k + 2])
            } else {
                points[n - 1]
            }
        };

        let mut segments = Vec::with_capacity(n - 1);
        let mut seg = QuadSegment {
            start: points[0],
            control: points[1],
            end: end_of(0),
            smooth: false,
        };
        segments.push(seg);

        for k in 1..n - 1 {
            let control = seg.end + (seg.end - seg.control);
            seg = QuadSegment {
                start: seg.end,
                control,
                end: end_of(k),
                smooth: true,
            };
            segments.push(seg);
        }

        Some(Curve::from_segments(segments))
    }

    /// SVG path data for whatever the sequence currently defines: empty for no points, a bare
    /// `M` for a single point, the curve otherwise.
    pub fn svg_path_data(points: &[Point]) -> String {
        match points {
            [] => String::new(),
            [p] => {
                let mut path = BezPath::new();
                path.move_to(*p);
                path.to_svg()
            }
            _ => Self::build(points)
                .map(|c| c.svg_path_data())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/route/path.rs"]
mod tests;
