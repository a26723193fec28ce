use clap::Parser;
use log::LevelFilter;

use snippy::{
    cli::{Cli, run},
    errors::SnippyError,
    utils::print_error,
};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    if let Err(error) = run(cli) {
        match &error {
            SnippyError::UserCancelled => println!("\nSay Good bye to snippy. Bye Bye!"),
            SnippyError::CommitFailed { .. } => print_error("Commit failed", &error.to_string()),
            SnippyError::NothingStaged => {}
            other => print_error("snippy failed", &other.to_string()),
        }

        std::process::exit(error.exit_code());
    }
}
