//! End-to-end builds against a temporary project tree, using the templates
//! shipped with the crate.

use iconfont::{BuildConfig, FontConfig, Pipeline, StylesheetFlavor};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use write_fonts::read::{FontRef, TableProvider};

const HOME_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
  <path d="M256 64 L448 224 V448 H304 V320 H208 V448 H64 V224 Z"/>
</svg>"#;

const SEARCH_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
  <circle cx="208" cy="208" r="144"/>
  <path d="M320 320 L448 448 L416 480 L288 352 Z"/>
</svg>"#;

fn shipped_template(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(name)
}

fn pipeline_in(root: &Path, flavor: StylesheetFlavor) -> Pipeline {
    let template = match flavor {
        StylesheetFlavor::Css => shipped_template("iconfont.css.hbs"),
        StylesheetFlavor::Scss => shipped_template("iconfont.scss.hbs"),
    };
    Pipeline {
        source_dir: root.join("svg"),
        font_dir: root.join("fonts"),
        stylesheet_dir: root.join("css"),
        template,
        font_path: "../fonts/".to_string(),
        class_name: "icon".to_string(),
        flavor,
        font: FontConfig::default(),
    }
}

#[test]
fn single_icon_build_produces_fonts_and_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_in(dir.path(), StylesheetFlavor::Css);
    std::fs::create_dir_all(&pipeline.source_dir).unwrap();
    std::fs::write(pipeline.source_dir.join("home.svg"), HOME_SVG).unwrap();

    let report = pipeline.run().unwrap();

    for ext in ["ttf", "eot", "woff", "woff2"] {
        let path = pipeline.font_dir.join(format!("iconfont.{ext}"));
        assert!(path.exists(), "missing {}", path.display());
    }
    assert_eq!(report.font_files.len(), 4);

    let css = std::fs::read_to_string(&report.stylesheet_file).unwrap();
    assert!(css.contains(".icon-home:before"));
    assert!(css.contains("content: \"\\ea01\";"));
    assert!(css.contains("font-family: \"iconfont\""));
    assert!(css.contains("url(\"../fonts/iconfont.woff2?"));

    // the source was renamed to pin its codepoint
    assert!(pipeline.source_dir.join("uEA01-home.svg").exists());

    let ttf = std::fs::read(pipeline.font_dir.join("iconfont.ttf")).unwrap();
    let font = FontRef::new(&ttf).unwrap();
    assert_eq!(font.maxp().unwrap().num_glyphs(), 2); // .notdef + home
    assert_eq!(font.head().unwrap().units_per_em(), 1000);
    assert!(font.cmap().unwrap().map_codepoint(0xEA01u32).is_some());
}

#[test]
fn stylesheet_classes_match_the_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_in(dir.path(), StylesheetFlavor::Css);
    std::fs::create_dir_all(&pipeline.source_dir).unwrap();
    std::fs::write(pipeline.source_dir.join("home.svg"), HOME_SVG).unwrap();
    std::fs::write(pipeline.source_dir.join("search.svg"), SEARCH_SVG).unwrap();

    let report = pipeline.run().unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report.manifest_file).unwrap()).unwrap();
    let manifest_names: BTreeSet<String> = manifest["icons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|icon| icon["name"].as_str().unwrap().to_string())
        .collect();

    let css = std::fs::read_to_string(&report.stylesheet_file).unwrap();
    let stylesheet_names: BTreeSet<String> = css
        .lines()
        .filter_map(|line| {
            line.strip_prefix(".icon-")
                .and_then(|rest| rest.split_once(":before"))
                .map(|(name, _)| name.to_string())
        })
        .collect();

    assert_eq!(manifest_names, stylesheet_names);
    assert_eq!(
        manifest_names,
        BTreeSet::from(["home".to_string(), "search".to_string()])
    );
}

#[test]
fn empty_source_dir_still_builds() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_in(dir.path(), StylesheetFlavor::Css);
    std::fs::create_dir_all(&pipeline.source_dir).unwrap();

    let report = pipeline.run().unwrap();
    assert!(report.glyphs.is_empty());
    assert_eq!(report.font_files.len(), 4);

    let ttf = std::fs::read(pipeline.font_dir.join("iconfont.ttf")).unwrap();
    let font = FontRef::new(&ttf).unwrap();
    assert_eq!(font.maxp().unwrap().num_glyphs(), 1); // .notdef only

    let css = std::fs::read_to_string(&report.stylesheet_file).unwrap();
    assert!(css.contains("@font-face"));
    assert!(!css.contains(":before"));
}

#[test]
fn rebuild_keeps_codepoints_stable() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_in(dir.path(), StylesheetFlavor::Css);
    std::fs::create_dir_all(&pipeline.source_dir).unwrap();
    std::fs::write(pipeline.source_dir.join("home.svg"), HOME_SVG).unwrap();
    std::fs::write(pipeline.source_dir.join("search.svg"), SEARCH_SVG).unwrap();

    let first = pipeline.run().unwrap();
    // a later icon sorts before the renamed markers, but must not steal
    // their codepoints
    std::fs::write(pipeline.source_dir.join("alarm.svg"), HOME_SVG).unwrap();
    let second = pipeline.run().unwrap();

    let point = |report: &iconfont::BuildReport, name: &str| {
        report.glyphs.get(name).unwrap().codepoint
    };
    assert_eq!(point(&first, "home"), point(&second, "home"));
    assert_eq!(point(&first, "search"), point(&second, "search"));
    assert_ne!(point(&second, "alarm"), point(&second, "home"));
    assert_ne!(point(&second, "alarm"), point(&second, "search"));
}

#[test]
fn scss_flavor_writes_a_partial() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_in(dir.path(), StylesheetFlavor::Scss);
    std::fs::create_dir_all(&pipeline.source_dir).unwrap();
    std::fs::write(pipeline.source_dir.join("home.svg"), HOME_SVG).unwrap();

    let report = pipeline.run().unwrap();
    assert_eq!(
        report.stylesheet_file.file_name().unwrap(),
        "_iconfont.scss"
    );
    let scss = std::fs::read_to_string(&report.stylesheet_file).unwrap();
    assert!(scss.contains("@extend %icon;"));
    assert!(scss.contains("content: \"\\ea01\";"));
}

#[test]
fn config_file_drives_both_deployments() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("svg")).unwrap();
    std::fs::write(root.join("svg/home.svg"), HOME_SVG).unwrap();
    std::fs::copy(
        shipped_template("iconfont.css.hbs"),
        root.join("iconfont.css.hbs"),
    )
    .unwrap();
    std::fs::copy(
        shipped_template("iconfont.scss.hbs"),
        root.join("iconfont.scss.hbs"),
    )
    .unwrap();
    let config_path = root.join("iconfont.config.json");
    std::fs::write(
        &config_path,
        r#"{
            "pipelines": [
                {
                    "sourceDir": "svg",
                    "fontDir": "fonts",
                    "stylesheetDir": "scss",
                    "template": "iconfont.scss.hbs",
                    "fontPath": "../fonts/",
                    "flavor": "scss"
                },
                {
                    "sourceDir": "svg",
                    "fontDir": "fonts",
                    "stylesheetDir": "css",
                    "template": "iconfont.css.hbs",
                    "fontPath": "../fonts/",
                    "flavor": "css"
                }
            ]
        }"#,
    )
    .unwrap();

    let config = BuildConfig::load(&config_path).unwrap();
    let reports: Vec<_> = config
        .pipelines
        .iter()
        .map(|p| p.run().unwrap())
        .collect();

    assert!(root.join("scss/_iconfont.scss").exists());
    assert!(root.join("css/iconfont.css").exists());
    assert!(root.join("fonts/iconfont.woff2").exists());
    assert!(root.join("fonts/iconfont.json").exists());
    // both deployments saw the same glyph set
    assert_eq!(reports[0].glyphs.len(), reports[1].glyphs.len());
}
