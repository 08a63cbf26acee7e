//! Rigid and uniform-scale transforms of paths.

use nalgebra::{Isometry2, Point2, Vector2};

use super::path::{Path, Segment, Subpath};
use super::point::Point;

impl Segment {
    fn map(&self, f: &impl Fn(Point) -> Point, rotation_deg: f64, radius_scale: f64) -> Segment {
        match *self {
            Segment::Line { to } => Segment::Line { to: f(to) },
            Segment::Quadratic { ctrl, to } => Segment::Quadratic {
                ctrl: f(ctrl),
                to: f(to),
            },
            Segment::Cubic { ctrl1, ctrl2, to } => Segment::Cubic {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Segment::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => Segment::Arc {
                rx: rx * radius_scale,
                ry: ry * radius_scale,
                x_rotation: x_rotation + rotation_deg,
                large_arc,
                sweep,
                to: f(to),
            },
        }
    }
}

impl Path {
    fn map(&self, f: impl Fn(Point) -> Point, rotation_deg: f64, radius_scale: f64) -> Path {
        Path {
            subpaths: self
                .subpaths
                .iter()
                .map(|sp| Subpath {
                    start: f(sp.start),
                    segments: sp
                        .segments
                        .iter()
                        .map(|seg| seg.map(&f, rotation_deg, radius_scale))
                        .collect(),
                    closed: sp.closed,
                })
                .collect(),
        }
    }

    /// Applies `p' = R·p + t`.
    pub fn transformed(&self, isometry: &Isometry2<f64>) -> Path {
        let rotation_deg = isometry.rotation.angle().to_degrees();
        self.map(
            |p| Point::from(isometry.transform_point(&Point2::new(p.x, p.y))),
            rotation_deg,
            1.0,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Path {
        self.map(|p| Point::new(p.x + dx, p.y + dy), 0.0, 1.0)
    }

    /// Rotates by `angle` radians about `center`.
    pub fn rotate(&self, angle: f64, center: Point) -> Path {
        if angle == 0.0 {
            return self.clone();
        }
        let (sin, cos) = angle.sin_cos();
        self.map(
            |p| {
                let dx = p.x - center.x;
                let dy = p.y - center.y;
                Point::new(
                    center.x + dx * cos - dy * sin,
                    center.y + dx * sin + dy * cos,
                )
            },
            angle.to_degrees(),
            1.0,
        )
    }

    /// Uniform scale about the origin.
    pub fn scale(&self, factor: f64) -> Path {
        self.map(|p| p.scaled(factor), 0.0, factor.abs())
    }

    /// Moves a path drawn along +x from the origin onto an edge that starts
    /// at `start` and heads in direction `angle`.
    pub fn place(&self, start: Point, angle: f64) -> Path {
        self.transformed(&Isometry2::new(Vector2::new(start.x, start.y), angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translate() {
        let path = Path::rectangle(0.0, 0.0, 2.0, 1.0).translate(3.0, -1.0);
        assert_eq!(path.to_svg_data(), "M 3 -1 L 3 0 L 5 0 L 5 -1 Z");
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let path = Path::parse("M 1 0 L 2 0").unwrap();
        let rotated = path.rotate(FRAC_PI_2, Point::new(0.0, 0.0));
        assert!(rotated.start().unwrap().approx_eq(&Point::new(0.0, 1.0)));
        assert!(rotated.end().unwrap().approx_eq(&Point::new(0.0, 2.0)));
    }

    #[test]
    fn test_place_on_vertical_edge() {
        let path = Path::rectangle(0.0, 0.0, 2.0, 1.0);
        let placed = path.place(Point::new(10.0, 10.0), FRAC_PI_2);
        assert!(placed.start().unwrap().approx_eq(&Point::new(10.0, 10.0)));
        let (lo, hi) = placed.bounds().unwrap();
        assert!(lo.approx_eq(&Point::new(9.0, 10.0)));
        assert!(hi.approx_eq(&Point::new(10.0, 12.0)));
    }

    #[test]
    fn test_scale_scales_arc_radii() {
        let path = Path::parse("M 0 0 A 5 5 0 0 1 10 0").unwrap().scale(2.0);
        assert_eq!(path.to_svg_data(), "M 0 0 A 10 10 0 0 1 20 0");
    }

    proptest! {
        #[test]
        fn prop_place_at_origin_is_identity(
            x0 in -1000.0f64..1000.0,
            y0 in -1000.0f64..1000.0,
            x1 in -1000.0f64..1000.0,
            y1 in -1000.0f64..1000.0,
        ) {
            let path = Path::rectangle(x0, y0, x1, y1);
            prop_assert_eq!(path.place(Point::new(0.0, 0.0), 0.0), path);
        }

        #[test]
        fn prop_rotation_preserves_length(angle in -6.3f64..6.3) {
            let path = Path::parse("M 0 0 L 3 4 A 2 2 0 0 1 7 4").unwrap();
            let rotated = path.rotate(angle, Point::new(1.0, 1.0));
            prop_assert!((rotated.length() - path.length()).abs() < 1e-6);
        }
    }
}
