//! The build pipeline: import SVG sources, assign codepoints, compile font
//! binaries, then render the stylesheet.
//!
//! Stylesheet rendering starts only after every font file is on disk; the
//! glyph manifest returned by the generation stage is the completion signal
//! and the stylesheet's only input, so the two always agree.

use crate::{
    codepoint::{split_marker, CodepointAllocator, DEFAULT_START_CODEPOINT},
    compile::{self, FontFormat},
    error::IconFontError,
    font::IconFont,
    glyph::{Glyph, GlyphManifest},
    manifest::ManifestFile,
    normalize::{self, NormalizeOptions},
    stylesheet::{Stylesheet, StylesheetFlavor},
    svg,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Font generation options. Serde field names match the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontConfig {
    pub font_name: String,
    pub formats: Vec<FontFormat>,
    /// Rename unpinned source files to the `uXXXX-name.svg` marker form so
    /// assigned codepoints survive later builds.
    pub append_codepoints: bool,
    /// Older name for the same renaming step; either flag turns it on.
    pub append_unicode: bool,
    pub normalize: bool,
    pub font_height: u16,
    pub center_horizontally: bool,
    pub start_codepoint: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            font_name: "iconfont".to_string(),
            formats: FontFormat::ALL.to_vec(),
            append_codepoints: true,
            append_unicode: false,
            normalize: true,
            font_height: 1000,
            center_horizontally: true,
            start_codepoint: DEFAULT_START_CODEPOINT,
        }
    }
}

impl FontConfig {
    fn renames_sources(&self) -> bool {
        self.append_codepoints || self.append_unicode
    }
}

/// One deployment: a source directory compiled into font binaries plus a
/// stylesheet rendered from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub source_dir: PathBuf,
    pub font_dir: PathBuf,
    pub stylesheet_dir: PathBuf,
    pub template: PathBuf,
    /// URL prefix from the stylesheet to the font files, trailing slash
    /// included.
    #[serde(default = "default_font_path")]
    pub font_path: String,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_flavor")]
    pub flavor: StylesheetFlavor,
    #[serde(default)]
    pub font: FontConfig,
}

fn default_font_path() -> String {
    "../iconfont/".to_string()
}

fn default_class_name() -> String {
    "icon".to_string()
}

fn default_flavor() -> StylesheetFlavor {
    StylesheetFlavor::Css
}

/// Everything one [`Pipeline::run`] produced.
#[derive(Debug)]
pub struct BuildReport {
    pub glyphs: GlyphManifest,
    pub font_files: Vec<PathBuf>,
    pub manifest_file: PathBuf,
    pub stylesheet_file: PathBuf,
}

impl Pipeline {
    pub fn run(&self) -> Result<BuildReport, IconFontError> {
        let (glyphs, font_files, manifest_file) = self.generate_fonts()?;
        let stylesheet_file = self.render_stylesheet(&glyphs)?;
        Ok(BuildReport {
            glyphs,
            font_files,
            manifest_file,
            stylesheet_file,
        })
    }

    /// Import sources, compile the requested formats and write them, plus the
    /// JSON manifest, under `font_dir`.
    fn generate_fonts(&self) -> Result<(GlyphManifest, Vec<PathBuf>, PathBuf), IconFontError> {
        let glyphs = self.import_glyphs()?;
        info!(
            "compiling {} with {} glyph(s)",
            self.font.font_name,
            glyphs.len()
        );

        let opts = NormalizeOptions {
            normalize: self.font.normalize,
            font_height: self.font.font_height,
            center_horizontally: self.font.center_horizontally,
        };
        let sources = glyphs
            .iter()
            .map(|g| svg::load(&g.source))
            .collect::<Result<Vec<_>, _>>()?;
        let scales = normalize::scales(&sources, &opts);
        let glyphs: GlyphManifest = glyphs
            .0
            .into_iter()
            .zip(sources.iter().zip(&scales))
            .map(|(mut glyph, (source, scale))| {
                let (outline, advance) = normalize::fit(source, *scale, &opts);
                glyph.outline = outline;
                glyph.advance = advance;
                glyph
            })
            .collect();

        let font = IconFont::new(&self.font.font_name, self.font.font_height, glyphs);
        let blobs = compile::compile(&font, &self.font.formats)?;

        std::fs::create_dir_all(&self.font_dir)?;
        let mut font_files = Vec::with_capacity(blobs.len());
        for (format, bytes) in blobs {
            let path = self
                .font_dir
                .join(format!("{}.{}", self.font.font_name, format.extension()));
            debug!("writing {} ({} bytes)", path.display(), bytes.len());
            std::fs::write(&path, bytes)?;
            font_files.push(path);
        }
        let manifest_file =
            ManifestFile::new(&self.font.font_name, &font.glyphs).write(&self.font_dir)?;
        Ok((font.glyphs, font_files, manifest_file))
    }

    /// Scan `source_dir` for SVG files, split markers, assign codepoints and
    /// optionally rename sources into marker form.
    fn import_glyphs(&self) -> Result<GlyphManifest, IconFontError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.source_dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| {
                p.extension().and_then(|e| e.to_str()) == Some("svg") && p.is_file()
            })
            .collect();
        // sorted order makes codepoint assignment deterministic
        paths.sort();

        let mut allocator = CodepointAllocator::new(self.font.start_codepoint);
        let mut owners = std::collections::HashMap::new();
        let mut pinned = Vec::with_capacity(paths.len());
        for path in &paths {
            let stem = file_stem(path);
            let marker = split_marker(stem).map(|(c, name)| (c, name.to_string()));
            if let Some((codepoint, name)) = &marker {
                allocator.reserve(*codepoint, name, &mut owners)?;
            }
            pinned.push(marker);
        }

        let mut glyphs = Vec::with_capacity(paths.len());
        for (path, marker) in paths.into_iter().zip(pinned) {
            let glyph = match marker {
                Some((codepoint, name)) => Glyph {
                    name,
                    codepoint,
                    source: path,
                    outline: Default::default(),
                    advance: 0.0,
                },
                None => {
                    let name = file_stem(&path).to_string();
                    let codepoint = allocator.allocate(&name)?;
                    let mut glyph = Glyph {
                        name,
                        codepoint,
                        source: path,
                        outline: Default::default(),
                        advance: 0.0,
                    };
                    if self.font.renames_sources() {
                        let renamed = self.source_dir.join(glyph.marker_file_name());
                        debug!(
                            "pinning {} as {}",
                            glyph.source.display(),
                            renamed.display()
                        );
                        std::fs::rename(&glyph.source, &renamed)?;
                        glyph.source = renamed;
                    }
                    glyph
                }
            };
            glyphs.push(glyph);
        }
        Ok(glyphs.into_iter().collect())
    }

    fn render_stylesheet(&self, glyphs: &GlyphManifest) -> Result<PathBuf, IconFontError> {
        std::fs::create_dir_all(&self.stylesheet_dir)?;
        let sheet = Stylesheet {
            font_name: &self.font.font_name,
            font_path: &self.font_path,
            class_name: &self.class_name,
            glyphs,
            font_date: chrono::Utc::now().timestamp_millis(),
        };
        let path = sheet.write(&self.template, &self.stylesheet_dir, self.flavor)?;
        info!("wrote stylesheet {}", path.display());
        Ok(path)
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
}
