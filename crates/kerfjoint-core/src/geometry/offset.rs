//! Uniform outward/inward offsetting of regions.

use std::f64::consts::PI;
use std::panic;

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use geo::{LineString, MultiPolygon};

use super::point::{push_unique_point, Point};
use super::region::{loop_polygon, Region};
use crate::constants::{EPSILON, FLATTEN_TOLERANCE, MIN_LOOP_AREA};
use crate::error::{GeometryError, Result};

fn ring_to_polyline(ring: &LineString<f64>) -> Polyline<f64> {
    let mut points: Vec<Point> = Vec::new();
    for c in ring.coords() {
        push_unique_point(&mut points, Point::from(*c));
    }
    if points.len() > 1 && points[0].approx_eq(&points[points.len() - 1]) {
        points.pop();
    }

    let mut signed_area = 0.0;
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        signed_area += p1.x * p2.y - p2.x * p1.y;
    }
    if signed_area < 0.0 {
        points.reverse();
    }

    let mut pline = Polyline::new();
    for p in points {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);
    pline
}

/// Vertices of a closed polyline with bulge arcs sampled within `tolerance`.
fn polyline_to_points(pline: &Polyline<f64>, tolerance: f64) -> Vec<Point> {
    let mut points = Vec::new();
    let count = pline.vertex_count();
    for i in 0..count {
        let v1 = pline.at(i);
        let v2 = pline.at((i + 1) % count);
        push_unique_point(&mut points, Point::new(v1.x, v1.y));

        if v1.bulge.abs() <= 1e-5 {
            continue;
        }
        let theta = 4.0 * v1.bulge.atan();
        let chord_len = ((v2.x - v1.x).powi(2) + (v2.y - v1.y).powi(2)).sqrt();
        if chord_len <= 1e-5 {
            continue;
        }
        let radius = (chord_len / (2.0 * (theta / 2.0).sin())).abs();
        let dist_to_center = radius * (theta.abs() / 2.0).cos();
        let (mx, my) = ((v1.x + v2.x) / 2.0, (v1.y + v2.y) / 2.0);
        let (nx, ny) = (-(v2.y - v1.y) / chord_len, (v2.x - v1.x) / chord_len);
        let sign = if v1.bulge > 0.0 { 1.0 } else { -1.0 };
        let cx = mx + nx * dist_to_center * sign;
        let cy = my + ny * dist_to_center * sign;

        let start_angle = (v1.y - cy).atan2(v1.x - cx);
        let mut end_angle = (v2.y - cy).atan2(v2.x - cx);
        if v1.bulge > 0.0 {
            if end_angle <= start_angle {
                end_angle += 2.0 * PI;
            }
        } else if end_angle >= start_angle {
            end_angle -= 2.0 * PI;
        }

        let max_step = if tolerance < radius {
            2.0 * (1.0 - tolerance / radius).acos()
        } else {
            PI / 2.0
        };
        let segments = (((end_angle - start_angle).abs() / max_step.max(EPSILON)).ceil() as usize)
            .clamp(2, 256);
        for j in 1..segments {
            let t = j as f64 / segments as f64;
            let angle = start_angle + (end_angle - start_angle) * t;
            push_unique_point(
                &mut points,
                Point::new(cx + radius * angle.cos(), cy + radius * angle.sin()),
            );
        }
    }
    points
}

/// Offsets one ring so the area it bounds grows by `grow` (shrinks when
/// negative). Returns the resulting loops.
fn offset_ring(ring: &LineString<f64>, grow: f64) -> Result<Vec<Vec<Point>>> {
    let pline = ring_to_polyline(ring);
    if pline.vertex_count() < 3 {
        return Ok(Vec::new());
    }
    // positive offsets move a counter-clockwise polyline inward
    let offset_res = panic::catch_unwind(panic::AssertUnwindSafe(|| pline.parallel_offset(-grow)));
    let offsets = offset_res.map_err(|_| GeometryError::OffsetFailed {
        reason: format!("offset engine panicked on a ring of {} vertices", pline.vertex_count()),
    })?;
    Ok(offsets
        .iter()
        .filter(|p| p.is_closed() && p.vertex_count() > 2)
        .map(|p| polyline_to_points(p, FLATTEN_TOLERANCE))
        .filter(|pts| pts.len() > 2)
        .collect())
}

fn union_loops(region: Region, loops: Vec<Vec<Point>>) -> Region {
    loops.into_iter().fold(region, |acc, pts| {
        let piece = Region::from_multi_polygon(MultiPolygon::new(vec![loop_polygon(&pts)]));
        if piece.area() < MIN_LOOP_AREA {
            acc
        } else {
            acc.union(&piece)
        }
    })
}

/// Grows every boundary of `region` outward by `distance` (inward when
/// negative). Holes shrink by the same amount.
pub fn offset_region(region: &Region, distance: f64) -> Result<Region> {
    if distance == 0.0 || region.is_empty() {
        return Ok(region.clone());
    }

    // each polygon loses only its own holes; an island inside another
    // polygon's hole must survive
    let mut result = Region::empty();
    for polygon in region.polygons() {
        let solid = union_loops(Region::empty(), offset_ring(polygon.exterior(), distance)?);
        let mut holes = Region::empty();
        for interior in polygon.interiors() {
            holes = union_loops(holes, offset_ring(interior, -distance)?);
        }
        result = result.union(&solid.difference(&holes));
    }

    tracing::debug!(
        "Offset region by {:.4}: area {:.4} -> {:.4}",
        distance,
        region.area(),
        result.area()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::Path;

    #[test]
    fn test_grow_square() {
        let region = Region::from_path(&Path::rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let grown = offset_region(&region, 1.0).unwrap();
        // square plus four 10x1 strips plus four quarter discs
        let expected = 100.0 + 40.0 + PI;
        assert!((grown.area() - expected).abs() < 0.05);
    }

    #[test]
    fn test_shrink_square() {
        let region = Region::from_path(&Path::rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let shrunk = offset_region(&region, -1.0).unwrap();
        assert!((shrunk.area() - 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_hole_shrinks_when_region_grows() {
        let outer = Region::from_path(&Path::rectangle(0.0, 0.0, 20.0, 20.0)).unwrap();
        let hole = Region::from_path(&Path::rectangle(5.0, 5.0, 15.0, 15.0)).unwrap();
        let frame = outer.difference(&hole);
        let grown = offset_region(&frame, 1.0).unwrap();
        assert!(grown.contains_point(Point::new(5.5, 10.0)));
        assert!(!grown.contains_point(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_island_inside_hole_survives() {
        let outer = Region::from_path(&Path::rectangle(0.0, 0.0, 20.0, 20.0)).unwrap();
        let hole = Region::from_path(&Path::rectangle(5.0, 5.0, 15.0, 15.0)).unwrap();
        let island = Region::from_path(&Path::rectangle(8.0, 8.0, 12.0, 12.0)).unwrap();
        let region = outer.difference(&hole).union(&island);
        assert_eq!(region.polygons().len(), 2);

        let grown = offset_region(&region, 0.5).unwrap();
        assert!(grown.contains_point(Point::new(10.0, 10.0)));
        assert!(grown.contains_point(Point::new(7.75, 10.0)));
        assert!(!grown.contains_point(Point::new(6.5, 10.0)));
        assert!(grown.contains_point(Point::new(5.25, 10.0)));
        // 21x21 frame less a 9x9 hole, plus a 5x5 island, each outer
        // corner rounded with radius 0.5
        let corner_loss = 8.0 * 0.25 * (1.0 - PI / 4.0);
        let expected = 441.0 - 81.0 + 25.0 - corner_loss;
        assert!((grown.area() - expected).abs() < 0.1);
    }

    #[test]
    fn test_round_trip_square() {
        let region = Region::from_path(&Path::rectangle(0.0, 0.0, 10.0, 10.0)).unwrap();
        let back = offset_region(&offset_region(&region, 0.5).unwrap(), -0.5).unwrap();
        assert!((back.area() - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_zero_distance_is_identity() {
        let region = Region::from_path(&Path::rectangle(0.0, 0.0, 3.0, 3.0)).unwrap();
        assert_eq!(offset_region(&region, 0.0).unwrap(), region);
    }
}
