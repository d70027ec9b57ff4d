//! SVG glyph import.
//!
//! Reads one SVG file into a single [`kurbo::BezPath`] still in SVG
//! coordinates (y-down), together with the drawing box the outlines were
//! designed against. Geometry handled here: `path` data, the basic shape
//! elements, and `transform` attributes composed down the tree. Anything
//! fancier (strokes, clips, gradients) is out of scope for icon sources.

use crate::error::IconFontError;
use kurbo::{Affine, BezPath, Circle, Ellipse, Point, Rect, Shape};
use std::path::Path;

/// Flattening tolerance for converting circles and ellipses to beziers.
const SHAPE_TOLERANCE: f64 = 0.1;

/// A parsed SVG source: combined outline plus the drawing box.
#[derive(Debug, Clone)]
pub struct SvgSource {
    pub outline: BezPath,
    pub view_box: Rect,
}

/// Load and flatten one SVG file.
pub fn load(path: &Path) -> Result<SvgSource, IconFontError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text).map_err(|reason| IconFontError::BadSvg {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse(text: &str) -> Result<SvgSource, String> {
    let doc = roxmltree::Document::parse(text).map_err(|e| e.to_string())?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(format!("root element is <{}>, not <svg>", root.tag_name().name()));
    }

    let view_box = view_box(&root)?;
    let mut outline = BezPath::new();
    for child in root.children() {
        collect(child, Affine::IDENTITY, &mut outline)?;
    }
    Ok(SvgSource { outline, view_box })
}

fn view_box(root: &roxmltree::Node) -> Result<Rect, String> {
    if let Some(raw) = root.attribute("viewBox") {
        let parts: Vec<f64> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(parse_number)
            .collect::<Result<_, _>>()?;
        if parts.len() != 4 {
            return Err(format!("viewBox needs four numbers, got {:?}", raw));
        }
        return Ok(Rect::new(
            parts[0],
            parts[1],
            parts[0] + parts[2],
            parts[1] + parts[3],
        ));
    }
    match (root.attribute("width"), root.attribute("height")) {
        (Some(w), Some(h)) => Ok(Rect::new(0.0, 0.0, parse_length(w)?, parse_length(h)?)),
        _ => Err("missing viewBox and width/height".to_string()),
    }
}

fn collect(node: roxmltree::Node, transform: Affine, out: &mut BezPath) -> Result<(), String> {
    if !node.is_element() {
        return Ok(());
    }
    if node.attribute("display") == Some("none") || node.attribute("fill") == Some("none") {
        return Ok(());
    }
    let transform = match node.attribute("transform") {
        Some(raw) => transform * parse_transform(raw)?,
        None => transform,
    };

    let shape = match node.tag_name().name() {
        "path" => match node.attribute("d") {
            Some(d) => Some(BezPath::from_svg(d).map_err(|e| e.to_string())?),
            None => None,
        },
        "rect" => Some(rect_path(&node)?),
        "circle" => {
            let cx = attr_or_zero(&node, "cx")?;
            let cy = attr_or_zero(&node, "cy")?;
            let r = attr_or_zero(&node, "r")?;
            Some(Circle::new(Point::new(cx, cy), r).to_path(SHAPE_TOLERANCE))
        }
        "ellipse" => {
            let cx = attr_or_zero(&node, "cx")?;
            let cy = attr_or_zero(&node, "cy")?;
            let rx = attr_or_zero(&node, "rx")?;
            let ry = attr_or_zero(&node, "ry")?;
            Some(Ellipse::new(Point::new(cx, cy), (rx, ry), 0.0).to_path(SHAPE_TOLERANCE))
        }
        "line" => {
            let mut p = BezPath::new();
            p.move_to((attr_or_zero(&node, "x1")?, attr_or_zero(&node, "y1")?));
            p.line_to((attr_or_zero(&node, "x2")?, attr_or_zero(&node, "y2")?));
            Some(p)
        }
        "polygon" | "polyline" => {
            let closed = node.tag_name().name() == "polygon";
            node.attribute("points").map(|pts| poly_path(pts, closed)).transpose()?
        }
        _ => None,
    };

    if let Some(mut path) = shape {
        path.apply_affine(transform);
        for el in path.elements() {
            out.push(*el);
        }
    }

    for child in node.children() {
        collect(child, transform, out)?;
    }
    Ok(())
}

fn rect_path(node: &roxmltree::Node) -> Result<BezPath, String> {
    let x = attr_or_zero(node, "x")?;
    let y = attr_or_zero(node, "y")?;
    let w = attr_or_zero(node, "width")?;
    let h = attr_or_zero(node, "height")?;
    Ok(Rect::new(x, y, x + w, y + h).to_path(SHAPE_TOLERANCE))
}

fn poly_path(points: &str, closed: bool) -> Result<BezPath, String> {
    let coords: Vec<f64> = points
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect::<Result<_, _>>()?;
    if coords.len() < 4 || coords.len() % 2 != 0 {
        return Err(format!("bad points list {:?}", points));
    }
    let mut path = BezPath::new();
    path.move_to((coords[0], coords[1]));
    for pair in coords[2..].chunks(2) {
        path.line_to((pair[0], pair[1]));
    }
    if closed {
        path.close_path();
    }
    Ok(path)
}

/// Parse an SVG `transform` attribute into a single affine, composing the
/// listed functions left to right.
fn parse_transform(raw: &str) -> Result<Affine, String> {
    let mut result = Affine::IDENTITY;
    let mut rest = raw.trim();
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| format!("bad transform {:?}", raw))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| format!("bad transform {:?}", raw))?;
        let name = rest[..open].trim();
        let args: Vec<f64> = rest[open + 1..close]
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(parse_number)
            .collect::<Result<_, _>>()?;
        let affine = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
            ("translate", [tx]) => Affine::translate((*tx, 0.0)),
            ("translate", [tx, ty]) => Affine::translate((*tx, *ty)),
            ("scale", [s]) => Affine::scale(*s),
            ("scale", [sx, sy]) => Affine::scale_non_uniform(*sx, *sy),
            ("rotate", [deg]) => Affine::rotate(deg.to_radians()),
            ("rotate", [deg, cx, cy]) => {
                Affine::translate((*cx, *cy))
                    * Affine::rotate(deg.to_radians())
                    * Affine::translate((-*cx, -*cy))
            }
            ("skewX", [deg]) => Affine::skew(deg.to_radians().tan(), 0.0),
            ("skewY", [deg]) => Affine::skew(0.0, deg.to_radians().tan()),
            _ => return Err(format!("unsupported transform {:?}", name)),
        };
        result = result * affine;
        rest = rest[close + 1..].trim_start_matches([' ', ',', '\t', '\n']);
    }
    Ok(result)
}

fn attr_or_zero(node: &roxmltree::Node, name: &str) -> Result<f64, String> {
    node.attribute(name).map_or(Ok(0.0), parse_number)
}

fn parse_number(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| format!("bad number {:?}", s))
}

fn parse_length(s: &str) -> Result<f64, String> {
    parse_number(s.trim().trim_end_matches("px"))
}
