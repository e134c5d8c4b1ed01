use clap::Parser;
use todolist::cli::commands::Cli;
use todolist::cli::handlers;
use todolist::io::config_io;
use todolist::logging;
use todolist::store::TaskStore;
use todolist::tui::{self, theme::Theme};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let loaded = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let data_file = loaded.data_file(cli.file.as_deref(), &cwd);

    // The TUI owns the terminal, so only the CLI echoes log warnings
    let tui_mode = cli.command.is_none();
    if let Err(e) = logging::init_logging(
        loaded.log_level(),
        &loaded.log_dir(&data_file),
        !tui_mode,
    ) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let mut store = TaskStore::open(data_file);
    match cli.command {
        // No subcommand → launch TUI
        None => tui::run(store, Theme::from_config(&loaded.config.ui)),
        Some(command) => handlers::dispatch(command, &mut store, cli.json),
    }
}
