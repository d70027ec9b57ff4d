#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod codepoint;
pub mod compile;
mod config;
mod error;
mod font;
mod glyph;
pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod stylesheet;
pub mod svg;

pub use crate::{
    compile::FontFormat,
    config::BuildConfig,
    error::IconFontError,
    font::IconFont,
    glyph::{Glyph, GlyphManifest},
    manifest::ManifestFile,
    pipeline::{BuildReport, FontConfig, Pipeline},
    stylesheet::{Stylesheet, StylesheetFlavor},
};
use std::path::PathBuf;

/// Run every pipeline in a config file, in order.
pub fn build(config: impl Into<PathBuf>) -> Result<Vec<BuildReport>, IconFontError> {
    let config = BuildConfig::load(&config.into())?;
    config.pipelines.iter().map(Pipeline::run).collect()
}
