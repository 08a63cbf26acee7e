//! Path model and SVG path-data codec.
//!
//! A [`Path`] is a list of subpaths, each a start point followed by line,
//! quadratic, cubic and elliptical-arc segments. Every segment is stored in
//! absolute coordinates; relative commands, `H`/`V` and the smooth `S`/`T`
//! forms are resolved while parsing.

use std::fmt;
use std::str::FromStr;

use super::point::Point;
use crate::error::{GeometryError, Result};

/// One drawing command ending at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        to: Point,
    },
    Quadratic {
        ctrl: Point,
        to: Point,
    },
    Cubic {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// SVG elliptical arc; `x_rotation` is in degrees.
    Arc {
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
}

impl Segment {
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to }
            | Segment::Quadratic { to, .. }
            | Segment::Cubic { to, .. }
            | Segment::Arc { to, .. } => to,
        }
    }

    /// First point after `from` that gives the segment's initial direction.
    pub(crate) fn lead_point(&self, from: Point) -> Point {
        match *self {
            Segment::Quadratic { ctrl, to } if !ctrl.approx_eq(&from) => ctrl,
            Segment::Quadratic { to, .. } => to,
            Segment::Cubic { ctrl1, .. } if !ctrl1.approx_eq(&from) => ctrl1,
            Segment::Cubic { ctrl2, .. } if !ctrl2.approx_eq(&from) => ctrl2,
            _ => self.end(),
        }
    }
}

/// A connected run of segments starting at `start`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub start: Point,
    pub segments: Vec<Segment>,
    /// Set when the data carried an explicit `Z`.
    pub closed: bool,
}

impl Subpath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn line_to(mut self, to: Point) -> Self {
        self.segments.push(Segment::Line { to });
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: Point) -> Self {
        self.segments.push(Segment::Arc {
            rx: radius,
            ry: radius,
            x_rotation: 0.0,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// Explicitly closed, or ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.closed || (!self.segments.is_empty() && self.end().approx_eq(&self.start))
    }

    /// Start point of every segment, in order.
    pub fn segment_starts(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(Segment::end))
    }
}

/// A sequence of subpaths, the unit every joint generator produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_subpath(subpath: Subpath) -> Self {
        Self {
            subpaths: vec![subpath],
        }
    }

    /// Open or closed polyline through `points`.
    pub fn from_points(points: &[Point], closed: bool) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::new();
        };
        let mut subpath = rest
            .iter()
            .fold(Subpath::new(*first), |sp, p| sp.line_to(*p));
        subpath.closed = closed;
        Self::from_subpath(subpath)
    }

    /// Closed axis-aligned rectangle traced `(x0,y0) → (x0,y1) → (x1,y1) → (x1,y0)`.
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_points(
            &[
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
            ],
            true,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn push(&mut self, subpath: Subpath) {
        self.subpaths.push(subpath);
    }

    /// Moves every subpath of `other` onto the end of this path.
    pub fn append(&mut self, other: Path) {
        self.subpaths.extend(other.subpaths);
    }

    /// Each subpath as its own path.
    pub fn split_subpaths(&self) -> Vec<Path> {
        self.subpaths
            .iter()
            .cloned()
            .map(Path::from_subpath)
            .collect()
    }

    /// Parse SVG path data (`d` attribute).
    pub fn parse(data: &str) -> Result<Self> {
        PathParser::new(data).parse()
    }

    /// Serialize to SVG path data using absolute commands.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for subpath in &self.subpaths {
            push_command(&mut out, 'M', &[subpath.start.x, subpath.start.y]);
            for segment in &subpath.segments {
                match *segment {
                    Segment::Line { to } => push_command(&mut out, 'L', &[to.x, to.y]),
                    Segment::Quadratic { ctrl, to } => {
                        push_command(&mut out, 'Q', &[ctrl.x, ctrl.y, to.x, to.y])
                    }
                    Segment::Cubic { ctrl1, ctrl2, to } => push_command(
                        &mut out,
                        'C',
                        &[ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y],
                    ),
                    Segment::Arc {
                        rx,
                        ry,
                        x_rotation,
                        large_arc,
                        sweep,
                        to,
                    } => push_command(
                        &mut out,
                        'A',
                        &[
                            rx,
                            ry,
                            x_rotation,
                            f64::from(u8::from(large_arc)),
                            f64::from(u8::from(sweep)),
                            to.x,
                            to.y,
                        ],
                    ),
                }
            }
            if subpath.closed {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push('Z');
            }
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_data())
    }
}

impl FromStr for Path {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

fn push_command(out: &mut String, command: char, values: &[f64]) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push(command);
    for value in values {
        out.push(' ');
        out.push_str(&format_number(*value));
    }
}

/// Shortest round-trip decimal form; negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn tokenize_svg_path(path_data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current_token = String::new();

    for ch in path_data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current_token.is_empty() {
                    tokens.push(std::mem::take(&mut current_token));
                }
                tokens.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current_token.is_empty() {
                    tokens.push(std::mem::take(&mut current_token));
                }
            }
            '-' | '+' => {
                if current_token.is_empty()
                    || matches!(current_token.chars().last(), Some('e' | 'E'))
                {
                    current_token.push(ch);
                } else {
                    tokens.push(std::mem::take(&mut current_token));
                    current_token.push(ch);
                }
            }
            // "1.5.5" is two numbers
            '.' if current_token.contains('.') && !current_token.contains(['e', 'E']) => {
                tokens.push(std::mem::take(&mut current_token));
                current_token.push(ch);
            }
            _ => current_token.push(ch),
        }
    }

    if !current_token.is_empty() {
        tokens.push(current_token);
    }

    tokens
}

fn is_command_token(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() && c != 'e' && c != 'E' => Some(c),
        _ => None,
    }
}

struct PathParser {
    tokens: Vec<String>,
    index: usize,
    path: Path,
    current: Option<Subpath>,
    cursor: Point,
    subpath_start: Point,
    prev_cubic_ctrl: Option<Point>,
    prev_quad_ctrl: Option<Point>,
}

impl PathParser {
    fn new(data: &str) -> Self {
        Self {
            tokens: tokenize_svg_path(data),
            index: 0,
            path: Path::new(),
            current: None,
            cursor: Point::default(),
            subpath_start: Point::default(),
            prev_cubic_ctrl: None,
            prev_quad_ctrl: None,
        }
    }

    fn error(&self, reason: impl Into<String>) -> GeometryError {
        GeometryError::PathSyntax {
            position: self.index,
            reason: reason.into(),
        }
    }

    fn has_number(&self) -> bool {
        self.tokens
            .get(self.index)
            .is_some_and(|t| is_command_token(t).is_none())
    }

    fn number(&mut self) -> Result<f64> {
        let token = self
            .tokens
            .get(self.index)
            .ok_or_else(|| self.error("unexpected end of data"))?;
        let value = token
            .parse::<f64>()
            .map_err(|_| self.error(format!("expected number, found '{}'", token)))?;
        if !value.is_finite() {
            return Err(self.error(format!("non-finite number '{}'", token)));
        }
        self.index += 1;
        Ok(value)
    }

    fn flag(&mut self) -> Result<bool> {
        Ok(self.number()? != 0.0)
    }

    fn coords(&mut self, relative: bool) -> Result<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(if relative {
            Point::new(self.cursor.x + x, self.cursor.y + y)
        } else {
            Point::new(x, y)
        })
    }

    fn finish_subpath(&mut self) {
        if let Some(subpath) = self.current.take() {
            self.path.push(subpath);
        }
    }

    fn push_segment(&mut self, segment: Segment) {
        let start = self.cursor;
        self.current
            .get_or_insert_with(|| Subpath::new(start))
            .segments
            .push(segment);
        self.cursor = segment.end();
    }

    fn parse(mut self) -> Result<Path> {
        let mut command: Option<char> = None;

        while self.index < self.tokens.len() {
            if let Some(c) = is_command_token(&self.tokens[self.index]) {
                self.index += 1;
                command = Some(c);
                if matches!(c, 'Z' | 'z') {
                    if let Some(mut subpath) = self.current.take() {
                        subpath.closed = true;
                        self.path.push(subpath);
                    }
                    self.cursor = self.subpath_start;
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                    continue;
                }
                if !self.has_number() {
                    return Err(self.error(format!("command '{}' has no arguments", c)));
                }
            }

            let Some(c) = command else {
                return Err(self.error("path data must begin with a command"));
            };
            let relative = c.is_ascii_lowercase();

            match c.to_ascii_uppercase() {
                'M' => {
                    self.finish_subpath();
                    let to = self.coords(relative)?;
                    self.cursor = to;
                    self.subpath_start = to;
                    self.current = Some(Subpath::new(to));
                    // further pairs are implicit line-tos
                    command = Some(if relative { 'l' } else { 'L' });
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                }
                'L' => {
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Line { to });
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                }
                'H' => {
                    let x = self.number()?;
                    let to = Point::new(if relative { self.cursor.x + x } else { x }, self.cursor.y);
                    self.push_segment(Segment::Line { to });
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                }
                'V' => {
                    let y = self.number()?;
                    let to = Point::new(self.cursor.x, if relative { self.cursor.y + y } else { y });
                    self.push_segment(Segment::Line { to });
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                }
                'C' => {
                    let ctrl1 = self.coords(relative)?;
                    let ctrl2 = self.coords(relative)?;
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Cubic { ctrl1, ctrl2, to });
                    self.prev_cubic_ctrl = Some(ctrl2);
                    self.prev_quad_ctrl = None;
                }
                'S' => {
                    let ctrl1 = reflect(self.prev_cubic_ctrl, self.cursor);
                    let ctrl2 = self.coords(relative)?;
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Cubic { ctrl1, ctrl2, to });
                    self.prev_cubic_ctrl = Some(ctrl2);
                    self.prev_quad_ctrl = None;
                }
                'Q' => {
                    let ctrl = self.coords(relative)?;
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Quadratic { ctrl, to });
                    self.prev_quad_ctrl = Some(ctrl);
                    self.prev_cubic_ctrl = None;
                }
                'T' => {
                    let ctrl = reflect(self.prev_quad_ctrl, self.cursor);
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Quadratic { ctrl, to });
                    self.prev_quad_ctrl = Some(ctrl);
                    self.prev_cubic_ctrl = None;
                }
                'A' => {
                    let rx = self.number()?.abs();
                    let ry = self.number()?.abs();
                    let x_rotation = self.number()?;
                    let large_arc = self.flag()?;
                    let sweep = self.flag()?;
                    let to = self.coords(relative)?;
                    self.push_segment(Segment::Arc {
                        rx,
                        ry,
                        x_rotation,
                        large_arc,
                        sweep,
                        to,
                    });
                    self.prev_cubic_ctrl = None;
                    self.prev_quad_ctrl = None;
                }
                other => return Err(self.error(format!("unsupported command '{}'", other))),
            }
        }

        self.finish_subpath();
        Ok(self.path)
    }
}

fn reflect(ctrl: Option<Point>, around: Point) -> Point {
    match ctrl {
        Some(p) => Point::new(2.0 * around.x - p.x, 2.0 * around.y - p.y),
        None => around,
    }
}
