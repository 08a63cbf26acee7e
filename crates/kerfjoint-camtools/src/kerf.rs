//! Kerf compensation.

use tracing::{debug, info};

use kerfjoint_core::{offset_region, Region};

use crate::compositor::FaceRegions;
use crate::error::CamToolResult;

/// Grows every composed outline by half the beam width, so the beam runs
/// outside the finished part. Holes shrink by the same amount.
pub fn kerf_offset(regions: &FaceRegions, kerf: f64) -> CamToolResult<FaceRegions> {
    let distance = kerf / 2.0;
    info!("Applying kerf offset of {} to {} face(s)", distance, regions.len());
    regions
        .iter()
        .map(|(face, region)| -> CamToolResult<(String, Region)> {
            let offset = offset_region(region, distance)?;
            debug!("{}: area {:.3} -> {:.3}", face, region.area(), offset.area());
            Ok((face.clone(), offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerfjoint_core::{Path, Point};

    fn square() -> FaceRegions {
        let mut regions = FaceRegions::new();
        regions.insert(
            "face1".to_string(),
            Region::from_path(&Path::rectangle(0.0, 0.0, 50.0, 50.0)).unwrap(),
        );
        regions
    }

    #[test]
    fn test_zero_kerf_is_identity() {
        let regions = square();
        assert_eq!(kerf_offset(&regions, 0.0).unwrap(), regions);
    }

    #[test]
    fn test_kerf_grows_outline_by_half() {
        let out = kerf_offset(&square(), 0.2).unwrap();
        let face = &out["face1"];
        assert!(face.contains_point(Point::new(-0.05, 25.0)));
        assert!(!face.contains_point(Point::new(-0.15, 25.0)));
        assert!(face.area() > 2500.0);
    }

    #[test]
    fn test_round_trip_returns_to_original() {
        let regions = square();
        let grown = kerf_offset(&regions, 1.0).unwrap();
        let back = kerf_offset(&grown, -1.0).unwrap();
        let original = regions["face1"].area();
        assert!((back["face1"].area() - original).abs() < 0.5);
    }
}
