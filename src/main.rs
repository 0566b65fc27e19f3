use clap::Parser;
use log::info;

use noto::{seed_notebook, App, Cli, Notebook};

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    let notebook = if cli.demo {
        seed_notebook()
    } else {
        Notebook::new()
    };

    let mut app = App::new(notebook);
    if let Err(e) = app.run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    info!("Application shutting down");
}
