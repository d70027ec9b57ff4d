//! Assembles the TrueType rendition of the icon font with `write-fonts`.
//!
//! Layout: glyph 0 is `.notdef` (empty), then the manifest glyphs in order.
//! Outlines arrive as cubic bezier paths and are requantized to quadratics
//! before entering glyf.

use crate::{error::IconFontError, font::IconFont};
use kurbo::{BezPath, CubicBez, PathEl, Point, Rect, Shape};
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, Glyph as GlyfGlyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::{Os2, SelectionFlags},
        post::Post,
    },
    types::{FWord, GlyphId, LongDateTime, NameId, UfWord},
    FontBuilder,
};

/// Difference between the sfnt epoch (1904-01-01) and the Unix epoch.
const MACINTOSH_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Maximum deviation, in font units, when converting cubics to quadratics.
const QUAD_TOLERANCE: f64 = 1.0;

const WINDOWS_PLATFORM: u16 = 3;
const UNICODE_BMP_ENCODING: u16 = 1;
const ENGLISH_US: u16 = 0x409;

fn assembly<E: std::fmt::Display>(e: E) -> IconFontError {
    IconFontError::FontAssembly(e.to_string())
}

pub fn compile(font: &IconFont) -> Result<Vec<u8>, IconFontError> {
    let mut glyf_builder = GlyfLocaBuilder::new();
    glyf_builder.add_glyph(&GlyfGlyph::Empty).map_err(assembly)?;

    // .notdef gets a third of the em, matching common icon font output
    let mut metrics = vec![LongMetric {
        advance: font.units_per_em / 3,
        side_bearing: 0,
    }];
    let mut bounds: Option<Rect> = None;
    let mut max_points = 0u16;
    let mut max_contours = 0u16;

    for glyph in font.glyphs.iter() {
        let advance = glyph.advance.round().max(0.0) as u16;
        if glyph.outline.elements().is_empty() {
            glyf_builder.add_glyph(&GlyfGlyph::Empty).map_err(assembly)?;
            metrics.push(LongMetric {
                advance,
                side_bearing: 0,
            });
            continue;
        }
        let quadratic = to_quadratic(&glyph.outline, QUAD_TOLERANCE);
        let simple = SimpleGlyph::from_bezpath(&quadratic).map_err(|e| {
            IconFontError::BadOutline {
                glyph: glyph.name.clone(),
                reason: format!("{e:?}"),
            }
        })?;
        glyf_builder
            .add_glyph(&GlyfGlyph::Simple(simple))
            .map_err(assembly)?;

        let bbox = quadratic.bounding_box();
        bounds = Some(bounds.map_or(bbox, |b| b.union(bbox)));
        let (points, contours) = point_counts(&quadratic);
        max_points = max_points.max(points);
        max_contours = max_contours.max(contours);
        metrics.push(LongMetric {
            advance,
            side_bearing: bbox.x0.round() as i16,
        });
    }

    let (glyf, loca, loca_format) = glyf_builder.build();
    let num_glyphs = metrics.len() as u16;
    let bounds = bounds.unwrap_or(Rect::ZERO);

    let cmap = Cmap::from_mappings(
        font.cmap_mappings()
            .map(|(c, gid)| (c, GlyphId::new(gid as u32))),
    )
    .map_err(assembly)?;

    let created = LongDateTime::new(font.created.timestamp() + MACINTOSH_EPOCH_OFFSET);
    let head = Head {
        units_per_em: font.units_per_em,
        created,
        modified: created,
        x_min: bounds.x0.round() as i16,
        y_min: bounds.y0.round() as i16,
        x_max: bounds.x1.round() as i16,
        y_max: bounds.y1.round() as i16,
        lowest_rec_ppem: 8,
        index_to_loc_format: loca_format as i16,
        ..Default::default()
    };

    let max_advance = metrics.iter().map(|m| m.advance).max().unwrap_or(0);
    let min_lsb = metrics.iter().map(|m| m.side_bearing).min().unwrap_or(0);
    let hhea = Hhea {
        ascender: FWord::new(font.ascender),
        descender: FWord::new(font.descender),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(max_advance),
        min_left_side_bearing: FWord::new(min_lsb),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(bounds.x1.round() as i16),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
        ..Default::default()
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(max_points),
        max_contours: Some(max_contours),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
        ..Default::default()
    };

    let hmtx = Hmtx::new(metrics, vec![]);
    let name = name_table(&font.name);
    let os2 = os2_table(font);
    let mut glyph_names: Vec<&str> = vec![".notdef"];
    glyph_names.extend(font.glyphs.names());
    let post = Post::new_v2(glyph_names);

    let mut builder = FontBuilder::default();
    builder
        .add_table(&head)
        .map_err(assembly)?
        .add_table(&hhea)
        .map_err(assembly)?
        .add_table(&maxp)
        .map_err(assembly)?
        .add_table(&hmtx)
        .map_err(assembly)?
        .add_table(&cmap)
        .map_err(assembly)?
        .add_table(&glyf)
        .map_err(assembly)?
        .add_table(&loca)
        .map_err(assembly)?
        .add_table(&name)
        .map_err(assembly)?
        .add_table(&os2)
        .map_err(assembly)?
        .add_table(&post)
        .map_err(assembly)?;
    Ok(builder.build())
}

fn name_table(family: &str) -> Name {
    let entries = [
        (NameId::FAMILY_NAME, family.to_string()),
        (NameId::SUBFAMILY_NAME, "Regular".to_string()),
        (NameId::UNIQUE_ID, format!("{family} Regular")),
        (NameId::FULL_NAME, family.to_string()),
        (NameId::VERSION_STRING, "Version 1.0".to_string()),
        (NameId::POSTSCRIPT_NAME, family.replace(' ', "-")),
    ];
    Name::new(
        entries
            .into_iter()
            .map(|(id, value)| {
                NameRecord::new(
                    WINDOWS_PLATFORM,
                    UNICODE_BMP_ENCODING,
                    ENGLISH_US,
                    id,
                    value.into(),
                )
            })
            .collect(),
    )
}

fn os2_table(font: &IconFont) -> Os2 {
    let mut codepoints: Vec<u32> = font.glyphs.iter().map(|g| g.codepoint as u32).collect();
    codepoints.sort_unstable();
    let first = codepoints.first().copied().unwrap_or(0x20);
    let last = codepoints.last().copied().unwrap_or(0x20);
    Os2 {
        us_weight_class: 400,
        us_width_class: 5,
        s_typo_ascender: font.ascender,
        s_typo_descender: font.descender,
        s_typo_line_gap: 0,
        us_win_ascent: font.ascender.max(0) as u16,
        us_win_descent: font.descender.unsigned_abs(),
        us_first_char_index: first.min(0xFFFF) as u16,
        us_last_char_index: last.min(0xFFFF) as u16,
        fs_selection: SelectionFlags::REGULAR,
        ..Default::default()
    }
}

/// Replace every cubic segment with a quadratic spline within `tolerance`.
fn to_quadratic(path: &BezPath, tolerance: f64) -> BezPath {
    let mut out = BezPath::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                out.move_to(*p);
                start = *p;
                current = *p;
            }
            PathEl::LineTo(p) => {
                out.line_to(*p);
                current = *p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(*p1, *p2);
                current = *p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let cubic = CubicBez::new(current, *p1, *p2, *p3);
                for (_, _, quad) in cubic.to_quads(tolerance) {
                    out.quad_to(quad.p1, quad.p2);
                }
                current = *p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = start;
            }
        }
    }
    out
}

/// (max points per contour set, contour count) for maxp.
fn point_counts(path: &BezPath) -> (u16, u16) {
    let mut points = 0u16;
    let mut contours = 0u16;
    for el in path.elements() {
        match el {
            PathEl::MoveTo(_) => {
                contours = contours.saturating_add(1);
                points = points.saturating_add(1);
            }
            PathEl::LineTo(_) => points = points.saturating_add(1),
            PathEl::QuadTo(..) => points = points.saturating_add(2),
            PathEl::CurveTo(..) => points = points.saturating_add(3),
            PathEl::ClosePath => {}
        }
    }
    (points, contours)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::glyph::{Glyph, GlyphManifest};
    use write_fonts::read::{FontRef, TableProvider};

    fn font_with(glyphs: Vec<Glyph>) -> IconFont {
        IconFont::new("iconfont", 1000, glyphs.into_iter().collect())
    }

    fn triangle(name: &str, codepoint: char) -> Glyph {
        Glyph {
            name: name.to_string(),
            codepoint,
            source: format!("{name}.svg").into(),
            outline: BezPath::from_svg("M100 0 L900 0 L500 800 Z").unwrap(),
            advance: 1000.0,
        }
    }

    #[test]
    fn compiles_and_reads_back() {
        let font = font_with(vec![triangle("home", '\u{EA01}')]);
        let bytes = compile(&font).unwrap();
        let loaded = FontRef::new(&bytes).unwrap();
        assert_eq!(loaded.maxp().unwrap().num_glyphs(), 2);
        assert_eq!(loaded.head().unwrap().units_per_em(), 1000);
        let cmap = loaded.cmap().unwrap();
        assert_eq!(cmap.map_codepoint(0xEA01u32), Some(GlyphId::new(1)));
        assert_eq!(cmap.map_codepoint(0xEA02u32), None);
    }

    #[test]
    fn empty_glyph_set_still_compiles() {
        let font = font_with(vec![]);
        let bytes = compile(&font).unwrap();
        let loaded = FontRef::new(&bytes).unwrap();
        assert_eq!(loaded.maxp().unwrap().num_glyphs(), 1); // .notdef only
    }

    #[test]
    fn cubics_are_requantized() {
        let curvy = Glyph {
            name: "blob".to_string(),
            codepoint: '\u{EA01}',
            source: "blob.svg".into(),
            outline: BezPath::from_svg("M0 0 C100 400 900 400 1000 0 Z").unwrap(),
            advance: 1000.0,
        };
        let bytes = compile(&font_with(vec![curvy])).unwrap();
        assert!(FontRef::new(&bytes).is_ok());
    }

    #[test]
    fn quadratic_conversion_preserves_endpoints() {
        let path = BezPath::from_svg("M0 0 C100 400 900 400 1000 0").unwrap();
        let quad = to_quadratic(&path, 1.0);
        let last = quad.elements().last().unwrap();
        match last {
            PathEl::QuadTo(_, p) => assert!((p.x - 1000.0).abs() < 1e-6 && p.y.abs() < 1e-6),
            other => panic!("expected a quad, got {other:?}"),
        }
    }
}
