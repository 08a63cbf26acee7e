//! Filled planar regions and polygon boolean operations.
//!
//! Regions are stored as a `geo::MultiPolygon`; paths are flattened into
//! loops before they enter a boolean operation.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, Contains, Coord, Line, LineString, MultiPolygon, Polygon};

use super::path::{Path, Subpath};
use super::point::Point;
use crate::constants::{EPSILON, FLATTEN_TOLERANCE, MIN_LOOP_AREA};
use crate::error::{GeometryError, Result};

/// A filled area made of disjoint polygons with holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Region(MultiPolygon<f64>);

impl Default for Region {
    fn default() -> Self {
        Self::empty()
    }
}

impl Region {
    pub fn empty() -> Self {
        Region(MultiPolygon::new(Vec::new()))
    }

    pub fn from_multi_polygon(polygons: MultiPolygon<f64>) -> Self {
        Region(polygons)
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.0
    }

    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.0 .0
    }

    /// Region covered by any loop of `path`.
    ///
    /// Zero-area loops are skipped; a self-intersecting loop is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut region = Region::empty();
        for points in path.to_loops(FLATTEN_TOLERANCE) {
            if let Some(ring) = validate_loop(&points)? {
                region = region.union(&Region(MultiPolygon::new(vec![Polygon::new(
                    ring,
                    Vec::new(),
                )])));
            }
        }
        Ok(region)
    }

    /// Union of the regions of all `paths`.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<Self> {
        paths
            .into_iter()
            .try_fold(Region::empty(), |acc, path| Ok(acc.union(&Region::from_path(path)?)))
    }

    pub fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Region(self.0.union(&other.0))
    }

    pub fn difference(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Region(self.0.difference(&other.0))
    }

    pub fn area(&self) -> f64 {
        self.0.unsigned_area()
    }

    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty() || self.area() < MIN_LOOP_AREA
    }

    /// True when `point` lies strictly inside the region.
    pub fn contains_point(&self, point: Point) -> bool {
        self.0.contains(&geo::Point::new(point.x, point.y))
    }

    /// One closed path per polygon: the exterior followed by its holes.
    pub fn to_paths(&self) -> Vec<Path> {
        self.polygons()
            .iter()
            .map(|polygon| {
                let mut path = Path::new();
                path.push(ring_to_subpath(polygon.exterior()));
                for hole in polygon.interiors() {
                    path.push(ring_to_subpath(hole));
                }
                path
            })
            .collect()
    }
}

fn ring_to_subpath(ring: &LineString<f64>) -> Subpath {
    let mut points: Vec<Point> = ring.coords().map(|c| Point::from(*c)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let mut subpath = match points.split_first() {
        Some((first, rest)) => rest.iter().fold(Subpath::new(*first), |sp, p| sp.line_to(*p)),
        None => Subpath::default(),
    };
    subpath.closed = true;
    subpath
}

fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// True when every vertex lies on the line through the first vertex and the
/// vertex farthest from it.
fn is_flat(points: &[Point]) -> bool {
    let origin = points[0];
    let far = points.iter().copied().fold(origin, |best, p| {
        if origin.distance_to(&p) > origin.distance_to(&best) {
            p
        } else {
            best
        }
    });
    let span = origin.distance_to(&far);
    if span < EPSILON {
        return true;
    }
    points.iter().all(|p| {
        let cross = (far.x - origin.x) * (p.y - origin.y) - (far.y - origin.y) * (p.x - origin.x);
        (cross / span).abs() < EPSILON
    })
}

/// Checks a flattened loop before it enters a boolean operation.
///
/// Returns `Ok(None)` for loops that enclose no area, which callers drop.
/// A loop that crosses itself is an error even when its signed area
/// cancels out.
pub fn validate_loop(points: &[Point]) -> Result<Option<LineString<f64>>> {
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::degenerate("loop has a non-finite coordinate"));
    }
    if points.len() < 3 || is_flat(points) {
        tracing::warn!("Dropping zero-area loop with {} vertices", points.len());
        return Ok(None);
    }
    if let Some((i, j)) = find_self_intersection(points) {
        return Err(GeometryError::degenerate(format!(
            "loop crosses itself between edges {} and {}",
            i, j
        )));
    }
    if signed_area(points).abs() < MIN_LOOP_AREA {
        tracing::warn!("Dropping zero-area loop with {} vertices", points.len());
        return Ok(None);
    }
    let mut coords: Vec<Coord<f64>> = points.iter().map(|p| Coord::from(*p)).collect();
    coords.push(coords[0]);
    Ok(Some(LineString::new(coords)))
}

fn find_self_intersection(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();
    let edge = |i: usize| Line::new(Coord::from(points[i]), Coord::from(points[(i + 1) % n]));
    for i in 0..n {
        for j in (i + 2)..n {
            // first and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if matches!(
                line_intersection(edge(i), edge(j)),
                Some(LineIntersection::SinglePoint { .. } | LineIntersection::Collinear { .. })
            ) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Polygon for a closed vertex loop, without validation.
pub fn loop_polygon(points: &[Point]) -> Polygon<f64> {
    Polygon::new(
        LineString::new(points.iter().map(|p| Coord::from(*p)).collect()),
        Vec::new(),
    )
}

/// Unsigned area enclosed by a loop.
pub fn loop_area(points: &[Point]) -> f64 {
    loop_polygon(points).unsigned_area()
}

/// True when the loop `inner` lies inside the loop `outer`.
pub fn loop_contains(outer: &[Point], inner: &[Point]) -> bool {
    if outer.len() < 3 || inner.is_empty() {
        return false;
    }
    loop_polygon(outer).contains(&loop_polygon(inner))
}
