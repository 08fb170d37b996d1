use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use env_logger::{Builder, Env, Target};
use log::info;

use oscar_universe::{
    app::{App, Layout},
    assets::AssetReport,
    catalog::Catalog,
    config::AppConfig,
    universe::Universe,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const RUN_USAGE: &str = "oscar-universe run <movies.json>";
const CHECK_USAGE: &str = "oscar-universe check <movies.json>";
const LOG_ENV: &str = "OSCAR_UNIVERSE_LOG";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("run") => {
            let path = args.next().context(RUN_USAGE)?;
            session(Path::new(&path))
        }
        Some("check") => {
            let path = args.next().context(CHECK_USAGE)?;
            check(Path::new(&path))
        }
        _ => bail!(
            "OscarUniverse: Oscar-winning films on a ring around the statuette\n\nUsage:\n  {RUN_USAGE}\n  {CHECK_USAGE}"
        ),
    }
}

/// The terminal is the canvas, so the log goes to a file.
fn init_file_logger(catalog: &Path) -> Result<PathBuf> {
    let path = std::env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Catalog::asset_root(catalog).join("oscar-universe.log"));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn session(path: &Path) -> Result<()> {
    let log_path = init_file_logger(path)?;
    let config = AppConfig::load();
    let catalog = Catalog::load(path)?;
    let root = Catalog::asset_root(path);

    let (term_w, term_h) = crossterm::terminal::size().context("Failed to query terminal size")?;
    let viewport = Layout::compute(term_w, term_h).viewport();
    let (universe, _reports) =
        Universe::from_catalog(&catalog, &root, config.universe, config.settings, viewport);
    info!("logging to {}", log_path.display());

    let mut app = App::new(universe, config.key_bindings);
    app.run()
}

fn check(path: &Path) -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("error"))
        .target(Target::Stderr)
        .init();
    let catalog = Catalog::load(path)?;
    let root = Catalog::asset_root(path);
    let config = AppConfig::load();
    let viewport = Layout::compute(120, 40).viewport();
    let (_, reports) =
        Universe::from_catalog(&catalog, &root, config.universe, config.settings, viewport);

    for report in &reports {
        print_report(report);
    }
    let incomplete = reports.iter().filter(|r| !r.is_complete()).count();
    if incomplete > 0 {
        bail!("{incomplete} of {} films have missing assets", reports.len());
    }
    println!("All {} films complete", reports.len());
    Ok(())
}

fn print_report(report: &AssetReport) {
    let status = if report.is_complete() { "ok" } else { "MISSING" };
    println!("{} [{status}]", report.id);
    for (kind, path) in &report.resolved {
        println!("  {kind:<12} {}", path.display());
    }
    for err in &report.errors {
        println!("  ! {err}");
    }
}
