//! Geometric normalization: maps SVG drawing boxes (y-down) into the font's
//! em square (y-up, baseline at zero).

use crate::svg::SvgSource;
use kurbo::{Affine, BezPath, Shape};
use log::warn;

#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Rescale every glyph's drawing box to `font_height` individually.
    pub normalize: bool,
    /// Target em height in font units.
    pub font_height: u16,
    /// Center each outline horizontally within its advance width.
    pub center_horizontally: bool,
}

/// Per-glyph scale factors for a batch of sources.
///
/// With `normalize` on, each glyph is scaled so its own box height hits
/// `font_height`. With it off, one shared factor derived from the tallest
/// box is used, and differing heights are only warned about.
pub fn scales(sources: &[SvgSource], opts: &NormalizeOptions) -> Vec<f64> {
    let target = opts.font_height as f64;
    if opts.normalize {
        return sources
            .iter()
            .map(|s| target / s.view_box.height().max(1.0))
            .collect();
    }
    let max_height = sources
        .iter()
        .map(|s| s.view_box.height())
        .fold(0.0_f64, f64::max)
        .max(1.0);
    if sources
        .iter()
        .any(|s| (s.view_box.height() - max_height).abs() > f64::EPSILON)
    {
        warn!(
            "glyph drawing boxes differ in height but normalization is off; \
             scaling all glyphs by {:.3}",
            target / max_height
        );
    }
    vec![target / max_height; sources.len()]
}

/// Scale and flip one source into font units. Returns the outline and its
/// advance width.
pub fn fit(source: &SvgSource, scale: f64, opts: &NormalizeOptions) -> (BezPath, f64) {
    let vb = source.view_box;
    let advance = vb.width() * scale;
    // x' = (x - x0) * s, y' = (y1 - y) * s: box bottom lands on the baseline.
    let place = Affine::new([
        scale,
        0.0,
        0.0,
        -scale,
        -vb.x0 * scale,
        vb.y1 * scale,
    ]);
    let mut outline = source.outline.clone();
    outline.apply_affine(place);

    if opts.center_horizontally && !outline.elements().is_empty() {
        let bbox = outline.bounding_box();
        let shift = (advance - bbox.width()) / 2.0 - bbox.x0;
        outline.apply_affine(Affine::translate((shift, 0.0)));
    }
    (outline, advance)
}
