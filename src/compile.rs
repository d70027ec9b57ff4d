//! Font binary writers. The TTF is the master rendition; the web containers
//! (EOT, WOFF, WOFF2) wrap or repackage its bytes.

pub mod eot;
pub mod ttf;
pub mod woff;
pub mod woff2;

use crate::{error::IconFontError, font::IconFont};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    Ttf,
    Eot,
    Woff,
    Woff2,
}

impl FontFormat {
    pub const ALL: [FontFormat; 4] = [
        FontFormat::Ttf,
        FontFormat::Eot,
        FontFormat::Woff,
        FontFormat::Woff2,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::Ttf => "ttf",
            FontFormat::Eot => "eot",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
        }
    }
}

impl std::fmt::Display for FontFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Compile the font once and emit one byte blob per requested format.
pub fn compile(
    font: &IconFont,
    formats: &[FontFormat],
) -> Result<Vec<(FontFormat, Vec<u8>)>, IconFontError> {
    let ttf = ttf::compile(font)?;
    let mut out = Vec::with_capacity(formats.len());
    for format in formats {
        let bytes = match format {
            FontFormat::Ttf => ttf.clone(),
            FontFormat::Eot => eot::wrap(font, &ttf)?,
            FontFormat::Woff => woff::wrap(&ttf)?,
            FontFormat::Woff2 => woff2::wrap(&ttf)?,
        };
        out.push((*format, bytes));
    }
    Ok(out)
}
