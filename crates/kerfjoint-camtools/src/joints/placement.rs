//! Moving joint geometry from its canonical frame onto a real edge.
//!
//! Generators draw as if the edge ran along +x from the origin, with +y
//! pointing into the joint. [`align_joint`] shifts that drawing for the
//! requested alignment and [`place_on_edge`] carries it onto the edge.

use kerfjoint_core::Path;
use kerfjoint_designer::Alignment;

use crate::error::CamToolResult;

/// Shifts canonical geometry below the edge by the alignment offset.
pub fn align_joint(path: &Path, thickness: f64, alignment: Alignment) -> Path {
    let offset = alignment.offset(thickness);
    if offset == 0.0 {
        return path.clone();
    }
    path.translate(0.0, -offset)
}

/// Translates `path` to the start of `edge`, then rotates it about that
/// point by the edge direction.
pub fn place_on_edge(path: &Path, edge: &Path) -> CamToolResult<Path> {
    Ok(path.place(edge.start()?, edge.angle()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerfjoint_core::Point;
    use proptest::prelude::*;

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance_to(&b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_align_offsets() {
        let tooth = Path::rectangle(0.0, 0.0, 5.0, 3.0);
        assert_eq!(align_joint(&tooth, 3.0, Alignment::Inside), tooth);
        let middle = align_joint(&tooth, 3.0, Alignment::Middle);
        assert_close(middle.start().unwrap(), Point::new(0.0, -1.5));
        let outside = align_joint(&tooth, 3.0, Alignment::Outside);
        assert_close(outside.start().unwrap(), Point::new(0.0, -3.0));
    }

    #[test]
    fn test_place_on_vertical_edge() {
        let edge = Path::parse("M 10 10 L 10 60").unwrap();
        let tooth = Path::parse("M 5 0 L 5 2").unwrap();
        let placed = place_on_edge(&tooth, &edge).unwrap();
        assert_close(placed.start().unwrap(), Point::new(10.0, 15.0));
        assert_close(placed.end().unwrap(), Point::new(8.0, 15.0));
    }

    #[test]
    fn test_place_on_empty_edge_fails() {
        let tooth = Path::rectangle(0.0, 0.0, 1.0, 1.0);
        assert!(place_on_edge(&tooth, &Path::new()).is_err());
    }

    proptest! {
        #[test]
        fn prop_origin_edge_is_identity(
            x in -100.0f64..100.0, y in -100.0f64..100.0, len in 1.0f64..100.0
        ) {
            let edge = Path::parse(&format!("M 0 0 L {} 0", len)).unwrap();
            let shape = Path::rectangle(x, y, x + 3.0, y + 2.0);
            let placed = place_on_edge(&shape, &edge).unwrap();
            for (a, b) in shape.subpaths[0]
                .segment_starts()
                .zip(placed.subpaths[0].segment_starts())
            {
                prop_assert!(a.distance_to(&b) < 1e-9);
            }
        }
    }
}
