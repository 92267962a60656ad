use clap::{Parser, Subcommand};
use timebox_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "timebox-cli", version, about = "Timebox CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Single-level state of a container and its countdown line
    Resolve(commands::resolve::ResolveArgs),
    /// Deep search for the running or next leaf task
    Scan(commands::scan::ScanArgs),
    /// Indented tree with per-node status
    Outline(commands::outline::OutlineArgs),
    /// Live display driven by the wall clock
    Watch(commands::watch::WatchArgs),
    /// Check a snapshot for duplicate ids, cycles and dangling references
    Validate(commands::validate::ValidateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();

    let _logger = match logging::init(&config.logging.level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: {e}");
            None
        }
    };

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Outline(args) => commands::outline::run(args, &config),
        Commands::Watch(args) => commands::watch::run(args, &config),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
