mod cli;
mod data;
mod error;
mod export;
mod init;
mod logging;
mod scopes;
mod ui;
mod view;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use logging::Verbosity;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            data,
            force,
            logging,
        } => {
            configure_output(logging.into());
            init::execute(data, force)
        }
        Commands::Scopes {
            data,
            format,
            logging,
        } => {
            configure_output(logging.into());
            scopes::execute(data, format)
        }
        Commands::Summary { view: args } => {
            configure_output(Verbosity::from(args.logging));
            view::execute(args, None, view::Layout::Summary)
        }
        Commands::View { view: args, select } => {
            configure_output(Verbosity::from(args.logging));
            view::execute(args, select, view::Layout::Full)
        }
        Commands::Export { view: args, output } => {
            configure_output(Verbosity::from(args.logging));
            export::execute(args, output)
        }
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}

fn configure_output(verbosity: Verbosity) {
    logging::init_subscriber(verbosity);
    ui::set_quiet(verbosity == Verbosity::Quiet);
}
