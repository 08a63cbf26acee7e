//! Curve flattening and path measurements.

use lyon::geom::{
    point as lpoint, vector as lvector, Angle, ArcFlags, CubicBezierSegment,
    QuadraticBezierSegment, SvgArc,
};

use super::path::{Path, Segment, Subpath};
use super::point::{push_unique_point, Point};
use crate::constants::{EPSILON, FLATTEN_TOLERANCE};
use crate::error::{GeometryError, Result};

const MAX_CURVE_STEPS: usize = 1024;

fn to_lyon(p: Point) -> lyon::geom::Point<f64> {
    lpoint(p.x, p.y)
}

fn from_lyon(p: lyon::geom::Point<f64>) -> Point {
    Point::new(p.x, p.y)
}

fn svg_arc(
    from: Point,
    rx: f64,
    ry: f64,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> SvgArc<f64> {
    SvgArc {
        from: to_lyon(from),
        to: to_lyon(to),
        radii: lvector(rx, ry),
        x_rotation: Angle::degrees(x_rotation),
        flags: ArcFlags { large_arc, sweep },
    }
}

fn bezier_steps(control_length: f64, tolerance: f64) -> usize {
    ((control_length / tolerance.max(EPSILON)).sqrt().ceil() as usize).clamp(4, MAX_CURVE_STEPS)
}

impl Segment {
    /// Appends the flattened vertices of this segment (excluding `from`).
    pub fn flatten_into(&self, from: Point, tolerance: f64, out: &mut Vec<Point>) {
        match *self {
            Segment::Line { to } => push_unique_point(out, to),
            Segment::Quadratic { ctrl, to } => {
                let curve = QuadraticBezierSegment {
                    from: to_lyon(from),
                    ctrl: to_lyon(ctrl),
                    to: to_lyon(to),
                };
                let steps = bezier_steps(from.distance_to(&ctrl) + ctrl.distance_to(&to), tolerance);
                for i in 1..steps {
                    push_unique_point(out, from_lyon(curve.sample(i as f64 / steps as f64)));
                }
                push_unique_point(out, to);
            }
            Segment::Cubic { ctrl1, ctrl2, to } => {
                let curve = CubicBezierSegment {
                    from: to_lyon(from),
                    ctrl1: to_lyon(ctrl1),
                    ctrl2: to_lyon(ctrl2),
                    to: to_lyon(to),
                };
                let steps = bezier_steps(
                    from.distance_to(&ctrl1) + ctrl1.distance_to(&ctrl2) + ctrl2.distance_to(&to),
                    tolerance,
                );
                for i in 1..steps {
                    push_unique_point(out, from_lyon(curve.sample(i as f64 / steps as f64)));
                }
                push_unique_point(out, to);
            }
            Segment::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => {
                let svg = svg_arc(from, rx, ry, x_rotation, large_arc, sweep, to);
                if svg.is_straight_line() {
                    push_unique_point(out, to);
                    return;
                }
                let arc = svg.to_arc();
                let radius = arc.radii.x.abs().max(arc.radii.y.abs());
                let max_step = if tolerance < radius {
                    2.0 * (1.0 - tolerance / radius).acos()
                } else {
                    std::f64::consts::FRAC_PI_2
                };
                let sweep_angle = arc.sweep_angle.radians.abs();
                let steps = ((sweep_angle / max_step.max(EPSILON)).ceil() as usize)
                    .clamp(2, MAX_CURVE_STEPS);
                for i in 1..steps {
                    push_unique_point(out, from_lyon(arc.sample(i as f64 / steps as f64)));
                }
                push_unique_point(out, to);
            }
        }
    }

    /// Arc length of the segment when drawn from `from`.
    pub fn length(&self, from: Point) -> f64 {
        match *self {
            Segment::Line { to } => from.distance_to(&to),
            Segment::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                to,
            } if (rx - ry).abs() < EPSILON => {
                let svg = svg_arc(from, rx, ry, x_rotation, large_arc, sweep, to);
                if svg.is_straight_line() {
                    return from.distance_to(&to);
                }
                let arc = svg.to_arc();
                arc.radii.x.abs() * arc.sweep_angle.radians.abs()
            }
            _ => {
                let mut points = vec![from];
                self.flatten_into(from, FLATTEN_TOLERANCE * 0.01, &mut points);
                polyline_length(&points)
            }
        }
    }
}

fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

impl Subpath {
    /// Vertices of the flattened subpath, starting with `start`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Point> {
        let mut points = vec![self.start];
        let mut from = self.start;
        for segment in &self.segments {
            segment.flatten_into(from, tolerance, &mut points);
            from = segment.end();
        }
        points
    }

    /// Total length, including the implicit closing line of a `Z`.
    pub fn length(&self) -> f64 {
        let mut from = self.start;
        let mut total = 0.0;
        for segment in &self.segments {
            total += segment.length(from);
            from = segment.end();
        }
        if self.closed {
            total += from.distance_to(&self.start);
        }
        total
    }
}

impl Path {
    /// Sum of all subpath lengths.
    pub fn length(&self) -> f64 {
        self.subpaths.iter().map(Subpath::length).sum()
    }

    /// First point of the path.
    pub fn start(&self) -> Result<Point> {
        self.subpaths
            .first()
            .map(|sp| sp.start)
            .ok_or(GeometryError::EmptyPath)
    }

    /// Last point of the path; a closed subpath ends where it started.
    pub fn end(&self) -> Result<Point> {
        self.subpaths
            .last()
            .map(|sp| if sp.closed { sp.start } else { sp.end() })
            .ok_or(GeometryError::EmptyPath)
    }

    /// Direction of the chord from start to end, in radians.
    ///
    /// When the path returns to its start the direction of the first
    /// segment is used instead.
    pub fn angle(&self) -> Result<f64> {
        let start = self.start()?;
        let end = self.end()?;
        let toward = if start.approx_eq(&end) {
            self.subpaths
                .first()
                .and_then(|sp| sp.segments.first())
                .map(|seg| seg.lead_point(start))
                .ok_or(GeometryError::EmptyPath)?
        } else {
            end
        };
        Ok((toward.y - start.y).atan2(toward.x - start.x))
    }

    /// Every segment as a standalone single-segment path.
    ///
    /// A closed subpath whose last vertex differs from its start also yields
    /// the closing line.
    pub fn segments_as_paths(&self) -> Vec<Path> {
        let mut out = Vec::new();
        for subpath in &self.subpaths {
            let mut from = subpath.start;
            for segment in &subpath.segments {
                out.push(Path::from_subpath(Subpath {
                    start: from,
                    segments: vec![*segment],
                    closed: false,
                }));
                from = segment.end();
            }
            if subpath.closed && !from.approx_eq(&subpath.start) {
                out.push(Path::from_subpath(Subpath::new(from).line_to(subpath.start)));
            }
        }
        out
    }

    /// Flattens each subpath into a vertex loop; a repeated closing vertex is
    /// dropped.
    pub fn to_loops(&self, tolerance: f64) -> Vec<Vec<Point>> {
        self.subpaths
            .iter()
            .map(|sp| {
                let mut points = sp.flatten(tolerance);
                if points.len() > 1 {
                    if let (Some(first), Some(last)) = (points.first(), points.last()) {
                        if first.approx_eq(last) {
                            points.pop();
                        }
                    }
                }
                points
            })
            .collect()
    }

    /// Axis-aligned bounds of the flattened path as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self
            .to_loops(FLATTEN_TOLERANCE)
            .into_iter()
            .flatten();
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}
