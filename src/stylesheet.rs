//! Renders the companion stylesheet from a handlebars template once the font
//! binaries are on disk.
//!
//! The template sees exactly five keys: `glyphs`, `fontName`, `fontPath`,
//! `className` and `fontDate`. Each glyph entry carries `name`, `codepoint`
//! (bare hex) and `content` (a ready-to-paste CSS escape such as `\ea01`),
//! since `\{{codepoint}}` would be eaten by the handlebars lexer.

use crate::{error::IconFontError, glyph::GlyphManifest};
use handlebars::{no_escape, Handlebars};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylesheetFlavor {
    /// Sass partial, written as `_<fontName>.scss`.
    Scss,
    /// Plain CSS, written as `<fontName>.css`.
    Css,
}

impl StylesheetFlavor {
    pub fn file_name(&self, font_name: &str) -> String {
        match self {
            StylesheetFlavor::Scss => format!("_{font_name}.scss"),
            StylesheetFlavor::Css => format!("{font_name}.css"),
        }
    }
}

pub struct Stylesheet<'a> {
    pub font_name: &'a str,
    /// Relative URL prefix baked into the @font-face src, trailing slash
    /// included, e.g. "../iconfont/".
    pub font_path: &'a str,
    pub class_name: &'a str,
    pub glyphs: &'a GlyphManifest,
    /// Cache-busting token, milliseconds since the Unix epoch.
    pub font_date: i64,
}

impl Stylesheet<'_> {
    pub fn render(&self, template: &Path) -> Result<String, IconFontError> {
        if !template.is_file() {
            return Err(IconFontError::MissingTemplate {
                path: template.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(template)?;
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        let glyphs: Vec<_> = self
            .glyphs
            .iter()
            .map(|g| {
                json!({
                    "name": g.name,
                    "codepoint": g.codepoint_hex(),
                    "content": format!("\\{}", g.codepoint_hex()),
                })
            })
            .collect();
        let context = json!({
            "glyphs": glyphs,
            "fontName": self.font_name,
            "fontPath": self.font_path,
            "className": self.class_name,
            "fontDate": self.font_date,
        });
        Ok(registry.render_template(&source, &context)?)
    }

    pub fn write(
        &self,
        template: &Path,
        dir: &Path,
        flavor: StylesheetFlavor,
    ) -> Result<PathBuf, IconFontError> {
        let rendered = self.render(template)?;
        let path = dir.join(flavor.file_name(self.font_name));
        std::fs::write(&path, rendered)?;
        Ok(path)
    }
}
