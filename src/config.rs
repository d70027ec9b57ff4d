//! Build configuration file: a JSON document listing the pipelines to run.
//!
//! Relative paths in the file are resolved against the directory the file
//! lives in, so a checked-in config works from any working directory.

use crate::{error::IconFontError, pipeline::Pipeline};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub pipelines: Vec<Pipeline>,
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self, IconFontError> {
        let text = std::fs::read_to_string(path).map_err(|e| IconFontError::BadConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut config: BuildConfig =
            serde_json::from_str(&text).map_err(|e| IconFontError::BadConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if let Some(base) = path.parent() {
            for pipeline in &mut config.pipelines {
                pipeline.source_dir = resolve(base, &pipeline.source_dir);
                pipeline.font_dir = resolve(base, &pipeline.font_dir);
                pipeline.stylesheet_dir = resolve(base, &pipeline.stylesheet_dir);
                pipeline.template = resolve(base, &pipeline.template);
            }
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{compile::FontFormat, stylesheet::StylesheetFlavor};
    use pretty_assertions::assert_eq;

    #[test]
    fn minimal_config_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iconfont.config.json");
        std::fs::write(
            &path,
            r#"{
                "pipelines": [{
                    "sourceDir": "svg",
                    "fontDir": "fonts",
                    "stylesheetDir": "css",
                    "template": "iconfont.hbs"
                }]
            }"#,
        )
        .unwrap();
        let config = BuildConfig::load(&path).unwrap();
        let p = &config.pipelines[0];
        assert_eq!(p.source_dir, dir.path().join("svg"));
        assert_eq!(p.font_path, "../iconfont/");
        assert_eq!(p.class_name, "icon");
        assert_eq!(p.flavor, StylesheetFlavor::Css);
        assert_eq!(p.font.font_name, "iconfont");
        assert_eq!(p.font.formats, FontFormat::ALL.to_vec());
        assert!(p.font.append_codepoints);
        assert!(!p.font.append_unicode);
        assert!(p.font.normalize);
        assert_eq!(p.font.font_height, 1000);
        assert!(p.font.center_horizontally);
    }

    #[test]
    fn camel_case_font_options_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iconfont.config.json");
        std::fs::write(
            &path,
            r#"{
                "pipelines": [{
                    "sourceDir": "svg",
                    "fontDir": "fonts",
                    "stylesheetDir": "scss",
                    "template": "iconfont.hbs",
                    "flavor": "scss",
                    "font": {
                        "fontName": "glyphs",
                        "formats": ["woff2"],
                        "appendCodepoints": false,
                        "fontHeight": 2048,
                        "centerHorizontally": false
                    }
                }]
            }"#,
        )
        .unwrap();
        let config = BuildConfig::load(&path).unwrap();
        let p = &config.pipelines[0];
        assert_eq!(p.flavor, StylesheetFlavor::Scss);
        assert_eq!(p.font.font_name, "glyphs");
        assert_eq!(p.font.formats, vec![FontFormat::Woff2]);
        assert!(!p.font.append_codepoints);
        assert_eq!(p.font.font_height, 2048);
        assert!(!p.font.center_horizontally);
        // untouched options keep their defaults
        assert!(p.font.normalize);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iconfont.config.json");
        std::fs::write(&path, "{ pipelines: ").unwrap();
        let err = BuildConfig::load(&path).unwrap_err();
        assert!(matches!(err, IconFontError::BadConfig { .. }));
    }
}
