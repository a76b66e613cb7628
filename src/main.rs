use clap::Parser;
use tracing_subscriber::EnvFilter;

use dotp::cli::commands::{add::AddArgs, edit::EditArgs};
use dotp::cli::{Cli, Commands, PasswordSource};

/// Environment variable controlling log verbosity (`tracing` filter syntax).
const LOG_ENV: &str = "DOTP_LOG";

fn main() {
    // Logs go to stderr so `dotp get` output stays pipeable.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let passwords = PasswordSource::from_env();

    let result = match cli.command {
        Commands::Init => dotp::cli::commands::init::execute(&cli, &passwords),
        Commands::Add {
            ref label,
            ref secret,
            digits,
            ref algorithm,
            period,
        } => dotp::cli::commands::add::execute(
            &cli,
            &passwords,
            AddArgs {
                label: label.as_deref(),
                secret: secret.as_deref(),
                digits,
                algorithm: algorithm.as_str(),
                period,
            },
        ),
        Commands::List => dotp::cli::commands::list::execute(&cli, &passwords),
        Commands::Get { ref label, copy } => {
            dotp::cli::commands::get::execute(&cli, &passwords, label, copy)
        }
        Commands::Search { ref query } => {
            dotp::cli::commands::search::execute(&cli, &passwords, query)
        }
        Commands::Remove { ref label, force } => {
            dotp::cli::commands::remove::execute(&cli, &passwords, label, force)
        }
        Commands::Edit {
            ref label,
            ref new_label,
            secret,
            digits,
            ref algorithm,
            period,
        } => dotp::cli::commands::edit::execute(
            &cli,
            &passwords,
            label,
            EditArgs {
                new_label: new_label.as_deref(),
                new_secret: secret,
                digits,
                algorithm: algorithm.as_deref(),
                period,
            },
        ),
        Commands::Import { ref file, aegis } => {
            dotp::cli::commands::import_cmd::execute(&cli, &passwords, file, aegis)
        }
        Commands::Export { ref file, aegis } => {
            dotp::cli::commands::export::execute(&cli, &passwords, file, aegis)
        }
        Commands::Completions { shell } => dotp::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        dotp::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
