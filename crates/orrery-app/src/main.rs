//! Binary entry point: parse the CLI, load config, set up logging, run.

use clap::Parser;
use orrery_config::{CliArgs, Config, default_config_dir};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Failed to load config from {}: {e}; using defaults",
                config_dir.display()
            );
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    orrery_app::run_with_config(config);
}
