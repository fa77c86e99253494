// ABOUTME: Main entry point for the loom command-line launcher

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{shim_args, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse_from(shim_args(std::env::args().collect()));
    setup_logging(cli.global.debug);
    setup_panic_handler();

    cli::run(cli)
}

fn setup_logging(debug: bool) {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let stderr_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "loom=warn".into()));

    // --debug additionally records every executed command in ~/.cache/loom.log
    let file_layer = debug
        .then(|| {
            let log_dir = dirs::home_dir()?.join(".cache");
            std::fs::create_dir_all(&log_dir).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join("loom.log"))
                .ok()
        })
        .flatten()
        .map(|file| {
            fmt::layer()
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_ansi(false) // No ANSI colors in log file
                .with_filter(EnvFilter::new("loom=debug"))
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("loom panicked: {}", panic_info);
        default_hook(panic_info);
    }));
}
