//! JSON sidecar written next to the font binaries so other tooling can map
//! icon names to codepoints without parsing the font.

use crate::{error::IconFontError, glyph::GlyphManifest};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFile {
    pub font_family: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestIcon {
    pub name: String,
    pub filename: String,
    /// Lowercase hex, no prefix, e.g. "ea01".
    pub codepoint: String,
}

impl ManifestFile {
    pub fn new(font_family: &str, glyphs: &GlyphManifest) -> Self {
        ManifestFile {
            font_family: font_family.to_string(),
            icons: glyphs
                .iter()
                .map(|g| ManifestIcon {
                    name: g.name.clone(),
                    filename: g.marker_file_name(),
                    codepoint: g.codepoint_hex(),
                })
                .collect(),
        }
    }

    pub fn write(&self, dir: &Path) -> Result<std::path::PathBuf, IconFontError> {
        let path = dir.join(format!("{}.json", self.font_family));
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
