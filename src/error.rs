use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconFontError {
    #[error("IO Error: {0}")]
    IO(#[from] io::Error),

    #[error("Error parsing SVG {path:?}: {reason}")]
    BadSvg { path: PathBuf, reason: String },

    #[error("Ill-constructed outline in glyph {glyph}: {reason}")]
    BadOutline { glyph: String, reason: String },

    #[error("Codepoint U+{codepoint:04X} claimed by both {first} and {second}")]
    DuplicateCodepoint {
        codepoint: u32,
        first: String,
        second: String,
    },

    #[error("Ran out of assignable codepoints after {last}")]
    CodepointsExhausted { last: String },

    #[error("Error assembling font tables: {0}")]
    FontAssembly(String),

    #[error("Could not find template file {path:?}")]
    MissingTemplate { path: PathBuf },

    #[error("Error rendering stylesheet template: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Error reading build config {path:?}: {reason}")]
    BadConfig { path: PathBuf, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
