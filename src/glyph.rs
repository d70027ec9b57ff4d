use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

/// One imported SVG glyph, with its assigned codepoint and scaled outline.
///
/// The outline lives in font units (y-up, baseline at zero) by the time a
/// `Glyph` lands in a [`GlyphManifest`]; only the name, codepoint and source
/// path are serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glyph {
    pub name: String,
    pub codepoint: char,
    pub source: PathBuf,
    #[serde(skip)]
    pub outline: BezPath,
    #[serde(skip)]
    pub advance: f64,
}

impl Glyph {
    /// The codepoint as lowercase hex, the way stylesheets want it
    /// (`content: "\ea01"`).
    pub fn codepoint_hex(&self) -> String {
        format!("{:x}", self.codepoint as u32)
    }

    /// The `uXXXX-name` marker form used for source file names.
    pub fn marker_file_name(&self) -> String {
        format!("u{:04X}-{}.svg", self.codepoint as u32, self.name)
    }
}

/// The finalized list of glyphs for one build invocation.
///
/// The manifest handed to stylesheet rendering is exactly the one produced
/// by font generation: same glyphs, same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphManifest(pub Vec<Glyph>);

impl GlyphManifest {
    pub fn get(&self, name: &str) -> Option<&Glyph> {
        self.0.iter().find(|&glyph| glyph.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|g| g.name.as_str())
    }
}

impl Deref for GlyphManifest {
    type Target = Vec<Glyph>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for GlyphManifest {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Glyph> for GlyphManifest {
    fn from_iter<T: IntoIterator<Item = Glyph>>(iter: T) -> Self {
        GlyphManifest(iter.into_iter().collect())
    }
}
