//! The `tilekit` binary.

use clap::Parser;
use tilekit_app::platform::PlatformDirs;
use tilekit_app::{AppError, classify_world, load_catalog, map};
use tilekit_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("tilekit: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    tilekit_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!("Config directory: {}", dirs.config_dir.display());

    let catalog = load_catalog(&config)?;
    let output = classify_world(&config, &catalog)?;

    print!("{}", output.summary.histogram());
    if let Some(path) = &config.output.summary_path {
        output.summary.write_json(path)?;
    }
    if let Some(path) = &config.output.map_path {
        map::write_label_map(
            path,
            &output.planet.shape,
            &output.planet.grid,
            catalog.water_label(),
        )?;
    }
    Ok(())
}
