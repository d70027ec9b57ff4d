use crate::glyph::GlyphManifest;
use chrono::{DateTime, Utc};

/// The in-memory icon font handed to the format writers.
///
/// Vertical metrics follow the icon-font convention: the em spans from the
/// baseline (descender 0) to `units_per_em` (ascender), so icons sit on the
/// baseline and fill the line box.
#[derive(Debug, Clone)]
pub struct IconFont {
    pub name: String,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub glyphs: GlyphManifest,
    pub created: DateTime<Utc>,
}

impl IconFont {
    pub fn new(name: impl Into<String>, units_per_em: u16, glyphs: GlyphManifest) -> Self {
        IconFont {
            name: name.into(),
            units_per_em,
            ascender: units_per_em as i16,
            descender: 0,
            glyphs,
            created: Utc::now(),
        }
    }

    /// Codepoint-to-glyph-id mappings. Glyph id 0 is `.notdef`, so manifest
    /// entry `i` is glyph id `i + 1`.
    pub fn cmap_mappings(&self) -> impl Iterator<Item = (char, u16)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.codepoint, (i + 1) as u16))
    }
}
