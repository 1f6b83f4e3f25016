mod app;
mod assets;
mod cli;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod name_entry;
mod render;
mod util;
use crate::app::App;
use crate::assets::Assets;
use crate::cli::{Arguments, USAGE};
use crate::config::Config;
use crate::logging::init_logging;
use anyhow::Context;
use log::{error, info};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Arguments::from_parser(lexopt::Parser::from_env()) {
        Ok(Arguments::Run { config }) => config,
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}: {e}\n\n{USAGE}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let assets = match setup(config) {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(assets).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Read the configuration, start logging, and load the sprites
fn setup(config_path: Option<PathBuf>) -> anyhow::Result<Assets> {
    let (config, path) = match config_path {
        Some(path) => (
            Config::load(&path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            Some(path),
        ),
        None => match Config::default_path() {
            Ok(path) => (
                Config::load(&path, true).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })?,
                Some(path),
            ),
            Err(_) => (Config::default(), None),
        },
    };
    init_logging(&config.logging)?;
    info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    match path {
        Some(p) => info!("Using configuration file {}", p.display()),
        None => info!("Could not determine configuration directory; using defaults"),
    }
    Ok(Assets::load(&config.assets))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal I/O failed: {e}");
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
