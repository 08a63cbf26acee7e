//! SVG import and export.
//!
//! Import collects the root `<svg>` attributes, converts every drawable
//! shape to path data and picks up a model embedded under
//! `<metadata><laserassistant model="..."/></metadata>`. Shapes inside
//! `<defs>` and `<metadata>` are skipped and `transform` attributes are
//! ignored.

use std::path::Path as FsPath;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use tracing::{debug, warn};

use kerfjoint_core::{Path, Point, Segment, Subpath};

use crate::error::{DesignResult, FileFormatError, FileFormatResult};
use crate::extract::model_from_paths;
use crate::model::{Attributes, DesignModel, TreeEntry};

/// Element under `<metadata>` that carries the serialized model.
pub const MODEL_ELEMENT: &str = "laserassistant";
const MODEL_ATTRIBUTE: &str = "model";

/// Everything import needs from an SVG document.
#[derive(Debug, Clone, Default)]
pub struct ParsedSvg {
    pub attrib: Attributes,
    pub paths: Vec<Path>,
    pub embedded_model: Option<String>,
}

fn parse_error(e: impl std::fmt::Display) -> FileFormatError {
    FileFormatError::SvgParseError(e.to_string())
}

fn write_error(e: impl std::fmt::Display) -> FileFormatError {
    FileFormatError::SvgWriteError(e.to_string())
}

fn attributes_of(element: &BytesStart<'_>) -> FileFormatResult<Attributes> {
    let mut attrib = Attributes::new();
    for attr in element.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(parse_error)?.into_owned();
        attrib.insert(key, value);
    }
    Ok(attrib)
}

/// Parses a length attribute, tolerating a trailing unit such as `px`.
fn number(attrib: &Attributes, key: &str) -> Option<f64> {
    attrib
        .get(key)?
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .parse()
        .ok()
}

fn required(attrib: &Attributes, element: &str, key: &str) -> FileFormatResult<f64> {
    number(attrib, key).ok_or_else(|| FileFormatError::MissingAttribute {
        element: element.to_string(),
        attribute: key.to_string(),
    })
}

fn parse_points(text: &str) -> Vec<Point> {
    let values: Vec<f64> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Path {
    let half = |to: Point| Segment::Arc {
        rx,
        ry,
        x_rotation: 0.0,
        large_arc: true,
        sweep: false,
        to,
    };
    let left = Point::new(cx - rx, cy);
    let right = Point::new(cx + rx, cy);
    let mut subpath = Subpath::new(left);
    subpath.segments = vec![half(right), half(left)];
    subpath.closed = true;
    Path::from_subpath(subpath)
}

/// Converts one drawable element to a path; `None` for anything else.
fn shape_to_path(name: &str, attrib: &Attributes) -> DesignResult<Option<Path>> {
    let path = match name {
        "path" => match attrib.get("d") {
            Some(d) => Path::parse(d)?,
            None => {
                warn!("Skipping <path> without 'd'");
                return Ok(None);
            }
        },
        "rect" => {
            let x = number(attrib, "x").unwrap_or(0.0);
            let y = number(attrib, "y").unwrap_or(0.0);
            let w = required(attrib, name, "width")?;
            let h = required(attrib, name, "height")?;
            Path::from_points(
                &[
                    Point::new(x, y),
                    Point::new(x + w, y),
                    Point::new(x + w, y + h),
                    Point::new(x, y + h),
                ],
                true,
            )
        }
        "circle" => {
            let r = required(attrib, name, "r")?;
            let cx = number(attrib, "cx").unwrap_or(0.0);
            let cy = number(attrib, "cy").unwrap_or(0.0);
            ellipse_path(cx, cy, r, r)
        }
        "ellipse" => {
            let rx = required(attrib, name, "rx")?;
            let ry = required(attrib, name, "ry")?;
            let cx = number(attrib, "cx").unwrap_or(0.0);
            let cy = number(attrib, "cy").unwrap_or(0.0);
            ellipse_path(cx, cy, rx, ry)
        }
        "line" => Path::from_points(
            &[
                Point::new(
                    number(attrib, "x1").unwrap_or(0.0),
                    number(attrib, "y1").unwrap_or(0.0),
                ),
                Point::new(
                    number(attrib, "x2").unwrap_or(0.0),
                    number(attrib, "y2").unwrap_or(0.0),
                ),
            ],
            false,
        ),
        "polyline" | "polygon" => {
            let points = parse_points(attrib.get("points").map(String::as_str).unwrap_or(""));
            if points.len() < 2 {
                return Ok(None);
            }
            Path::from_points(&points, name == "polygon")
        }
        _ => return Ok(None),
    };
    Ok(Some(path))
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Reads root attributes, shape geometry and any embedded model JSON.
pub fn parse_svg(text: &str) -> DesignResult<ParsedSvg> {
    if text.trim().is_empty() {
        return Err(FileFormatError::EmptyFile("no content".to_string()).into());
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedSvg::default();
    let mut seen_root = false;
    let mut skip_depth = 0usize;
    let mut in_metadata = false;

    loop {
        let event = reader.read_event().map_err(parse_error)?;
        let (element, is_empty) = match &event {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if matches!(name.as_str(), "defs" | "metadata" | "clipPath" | "mask")
                    && skip_depth > 0
                {
                    skip_depth -= 1;
                    if name == "metadata" {
                        in_metadata = false;
                    }
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let name = local_name(element);
        let attrib = attributes_of(element)?;

        if name == "svg" && !seen_root {
            seen_root = true;
            parsed.attrib = attrib;
            continue;
        }
        if in_metadata && name == MODEL_ELEMENT {
            parsed.embedded_model = attrib.get(MODEL_ATTRIBUTE).cloned();
            continue;
        }
        if matches!(name.as_str(), "defs" | "metadata" | "clipPath" | "mask") {
            if !is_empty {
                skip_depth += 1;
                in_metadata |= name == "metadata";
            }
            continue;
        }
        if skip_depth > 0 {
            continue;
        }
        if let Some(path) = shape_to_path(&name, &attrib)? {
            if !path.is_empty() {
                parsed.paths.push(path);
            }
        }
    }

    if !seen_root {
        return Err(FileFormatError::EmptyFile("no <svg> element".to_string()).into());
    }
    debug!(
        "Parsed SVG: {} shapes, embedded model: {}",
        parsed.paths.len(),
        parsed.embedded_model.is_some()
    );
    Ok(parsed)
}

/// Reads the drawing model from an SVG document: the embedded model when
/// one is present, otherwise one derived from the raw shapes.
pub fn svg_to_model(text: &str) -> DesignResult<DesignModel> {
    let parsed = parse_svg(text)?;
    if let Some(json) = &parsed.embedded_model {
        match DesignModel::from_json(json) {
            Ok(model) => return Ok(model),
            Err(e) => warn!("Ignoring unreadable embedded model: {}", e),
        }
    }

    let mut combined = Path::new();
    for path in parsed.paths {
        combined.append(path);
    }
    model_from_paths(&[combined], parsed.attrib)
}

fn write_group<W: std::io::Write>(
    writer: &mut Writer<W>,
    id: &str,
    paths: &[String],
) -> FileFormatResult<()> {
    let mut group = BytesStart::new("g");
    group.push_attribute(("id", id));
    if paths.is_empty() {
        return writer.write_event(Event::Empty(group)).map_err(write_error);
    }
    writer.write_event(Event::Start(group)).map_err(write_error)?;
    for d in paths {
        let mut element = BytesStart::new("path");
        element.push_attribute(("d", d.as_str()));
        writer.write_event(Event::Empty(element)).map_err(write_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .map_err(write_error)
}

/// Writes `model` as an SVG document. `embedded` is serialized into the
/// metadata block so the design can be reopened for editing.
pub fn model_to_svg(model: &DesignModel, embedded: Option<&DesignModel>) -> DesignResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;

    let mut root = BytesStart::new("svg");
    for (key, value) in &model.attrib {
        root.push_attribute((key.as_str(), value.as_str()));
    }
    writer.write_event(Event::Start(root)).map_err(write_error)?;

    if let Some(source) = embedded {
        let json = source.to_json()?;
        writer
            .write_event(Event::Start(BytesStart::new("metadata")))
            .map_err(write_error)?;
        let mut element = BytesStart::new(MODEL_ELEMENT);
        element.push_attribute((MODEL_ATTRIBUTE, json.as_str()));
        writer.write_event(Event::Empty(element)).map_err(write_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("metadata")))
            .map_err(write_error)?;
    }

    for (name, entry) in &model.tree {
        match entry {
            TreeEntry::Face(face) => {
                let mut group = BytesStart::new("g");
                group.push_attribute(("id", name.as_str()));
                writer.write_event(Event::Start(group)).map_err(write_error)?;
                write_group(&mut writer, "Perimeter", &face.perimeter.paths)?;
                write_group(&mut writer, "Cuts", &face.cuts.paths)?;
                writer
                    .write_event(Event::End(BytesEnd::new("g")))
                    .map_err(write_error)?;
            }
            TreeEntry::Layer(layer) => write_group(&mut writer, name, &layer.paths)?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(write_error)?;
    let svg = String::from_utf8(writer.into_inner()).map_err(write_error)?;
    Ok(svg)
}

/// Reads an SVG file and returns its drawing model.
pub fn load_svg_file(path: &FsPath) -> DesignResult<DesignModel> {
    let text = std::fs::read_to_string(path)?;
    svg_to_model(&text)
}

/// Writes `model` to an SVG file.
pub fn save_svg_file(
    path: &FsPath,
    model: &DesignModel,
    embedded: Option<&DesignModel>,
) -> DesignResult<()> {
    std::fs::write(path, model_to_svg(model, embedded)?)?;
    Ok(())
}
