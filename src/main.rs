use clap::Command;

fn main() {
    let args = Command::new("iconfont")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiles SVG icons into web fonts and stylesheets")
        .arg(
            clap::Arg::new("config")
                .help("Path to the build config file")
                .default_value("iconfont.config.json")
                .index(1),
        )
        .arg(
            clap::Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .action(clap::ArgAction::Count),
        )
        .get_matches();

    env_logger::Builder::new()
        .filter_level(match args.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let config = args
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("iconfont.config.json");
    match iconfont::build(config) {
        Ok(reports) => {
            for report in &reports {
                log::info!(
                    "built {} glyph(s) into {} font file(s)",
                    report.glyphs.len(),
                    report.font_files.len()
                );
            }
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
