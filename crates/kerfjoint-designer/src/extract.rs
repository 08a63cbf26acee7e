//! Face and edge extraction from raw drawing geometry.
//!
//! A raw drawing is one combined path. Closed loops become faces: a loop
//! nested inside an even number of other loops is a face perimeter, one
//! nested inside an odd number is a cut-out of the innermost perimeter that
//! contains it. Each perimeter is then split into numbered edges.

use tracing::{debug, warn};

use kerfjoint_core::constants::FLATTEN_TOLERANCE;
use kerfjoint_core::{loop_area, loop_contains, Path, Point};

use crate::error::DesignResult;
use crate::model::{face_name, Attributes, DesignModel, Edge, EdgeData, FaceLayers, Layer, TreeEntry};

pub const OPEN_PATHS_KEY: &str = "Open Paths";

/// Splits every subpath into the closed and the open set.
pub fn separate_closed_paths(paths: &[Path]) -> (Vec<Path>, Vec<Path>) {
    let mut closed = Vec::new();
    let mut open = Vec::new();
    for path in paths {
        for sub in path.split_subpaths() {
            if sub.subpaths.iter().all(|sp| sp.segments.is_empty()) {
                continue;
            }
            if sub.subpaths.iter().all(|sp| sp.is_closed()) {
                closed.push(sub);
            } else {
                open.push(sub);
            }
        }
    }
    (closed, open)
}

struct ClosedLoop {
    path: Path,
    points: Vec<Point>,
    area: f64,
}

/// Classifies closed loops by nesting depth. Returns perimeters and, for
/// each cut, the index of the perimeter it belongs to.
fn classify(closed: Vec<Path>) -> (Vec<ClosedLoop>, Vec<(ClosedLoop, Option<usize>)>) {
    let loops: Vec<ClosedLoop> = closed
        .into_iter()
        .map(|path| {
            let points = path
                .to_loops(FLATTEN_TOLERANCE)
                .into_iter()
                .next()
                .unwrap_or_default();
            let area = loop_area(&points);
            ClosedLoop { path, points, area }
        })
        .collect();

    let depth: Vec<usize> = (0..loops.len())
        .map(|i| {
            (0..loops.len())
                .filter(|&j| j != i && loop_contains(&loops[j].points, &loops[i].points))
                .count()
        })
        .collect();

    let mut perimeters = Vec::new();
    let mut cuts = Vec::new();
    for (lp, d) in loops.into_iter().zip(depth) {
        if d % 2 == 0 {
            perimeters.push(lp);
        } else {
            cuts.push(lp);
        }
    }

    let cuts = cuts
        .into_iter()
        .map(|cut| {
            let owner = perimeters
                .iter()
                .enumerate()
                .filter(|(_, perim)| loop_contains(&perim.points, &cut.points))
                .min_by(|(_, a), (_, b)| a.area.total_cmp(&b.area))
                .map(|(i, _)| i);
            (cut, owner)
        })
        .collect();
    (perimeters, cuts)
}

/// Splits closed loops into face perimeters and cut-outs.
pub fn separate_perims_from_cuts(closed: Vec<Path>) -> (Vec<Path>, Vec<Path>) {
    let (perimeters, cuts) = classify(closed);
    (
        perimeters.into_iter().map(|p| p.path).collect(),
        cuts.into_iter().map(|(c, _)| c.path).collect(),
    )
}

/// Builds a model whose tree holds one `faceN` entry per perimeter.
pub fn paths_to_faces(closed: Vec<Path>, attrib: Attributes) -> DesignModel {
    let mut model = DesignModel::blank(attrib);
    let (perimeters, cuts) = classify(closed);

    let mut faces: Vec<FaceLayers> = perimeters
        .iter()
        .map(|perim| FaceLayers {
            perimeter: Layer::from_paths(std::slice::from_ref(&perim.path)),
            cuts: Layer::default(),
        })
        .collect();

    for (cut, owner) in cuts {
        match owner {
            Some(i) => faces[i].cuts.paths.push(cut.path.to_svg_data()),
            None => warn!("Cut-out is not inside any face perimeter; dropping it"),
        }
    }

    for (index, face) in faces.into_iter().enumerate() {
        model.tree.insert(face_name(index + 1), TreeEntry::Face(face));
    }
    model
}

/// Splits every face perimeter into edges numbered across the whole model.
pub fn get_edges(model: &DesignModel) -> DesignResult<EdgeData> {
    let mut edges = Vec::new();
    let mut edge_count = 0u32;
    for (face, layers) in model.faces() {
        let Some(perimeter) = layers.perimeter.paths.first() else {
            continue;
        };
        for segment in Path::parse(perimeter)?.segments_as_paths() {
            edge_count += 1;
            edges.push(Edge {
                d: segment.to_svg_data(),
                face: face.to_string(),
                edge: edge_count,
            });
        }
    }
    Ok(EdgeData {
        view_box: model.view_box().unwrap_or_default().to_string(),
        edges,
    })
}

/// Derives a complete model (faces, edges, no joints) from raw paths.
pub fn model_from_paths(paths: &[Path], attrib: Attributes) -> DesignResult<DesignModel> {
    let (closed, open) = separate_closed_paths(paths);
    debug!("{} closed and {} open paths", closed.len(), open.len());

    let mut model = paths_to_faces(closed, attrib);
    if !open.is_empty() {
        model
            .tree
            .insert(OPEN_PATHS_KEY.to_string(), TreeEntry::Layer(Layer::from_paths(&open)));
    }
    model.edge_data = get_edges(&model)?;
    model.joint_index = 1;
    Ok(model)
}
