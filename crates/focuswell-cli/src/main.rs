use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "focuswell-cli", version, about = "FocusWell CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live wellness session in the terminal
    Run(commands::run::RunArgs),
    /// Focus timer control
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Hydration tracking
    Hydration {
        #[command(subcommand)]
        action: commands::hydration::HydrationAction,
    },
    /// Task planner
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Hydration { action } => commands::hydration::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
