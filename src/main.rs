mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};
use crate::core::errors::KeyboxError;

fn main() {
    let args = Cli::parse();

    cli::context::init(args.home.as_deref());
    cli::output::configure(args.verbose, args.quiet);

    let result = match &args.command {
        Commands::Delete { name, yes, force } => {
            cli::commands::delete::execute(name, *yes, *force, args.legacy)
        }
        Commands::List => cli::commands::list::execute(args.legacy),
        Commands::Show { name } => cli::commands::show::execute(name, args.legacy),
        Commands::Log { last } => cli::commands::log::execute(*last),
    };

    if let Err(e) = result {
        match &e {
            KeyboxError::Aborted => cli::output::notice(&e.to_string()),
            _ => cli::output::error(&format!("Error: {e}")),
        }
        std::process::exit(e.exit_code());
    }
}
