use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::{
    commit_flow::{CommitFlow, CommitOutcome},
    config::{ConfigStore, DocumentStore, Settings},
    configure::Configurator,
    emoji::EmojiResolver,
    errors::{Result, SnippyError},
    git::{GitCli, find_git_root},
    prompt::InquirePrompter,
    update::{
        Homebrew, VersionCache, notify_if_outdated, refresh_in_background,
        resolve_installed_version, run_update,
    },
    utils::print_success,
};

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactively edit the commit template and the commit types.
    #[command(name = "config")]
    Config,

    /// Restore the default template and commit types.
    #[command(name = "reset")]
    Reset,

    /// Check Homebrew for a newer snippy and offer to upgrade.
    #[command(name = "update")]
    Update,

    /// Print a shell completion script.
    #[command(name = "completion")]
    Completion {
        /// Shell to generate the script for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
#[command(about = "Templatize your git commit messages.\n\
\t- Run without a command to write and commit a message.\n\
\t- Run 'snippy config' to customize the template and commit types.")]
#[command(help_template = "{about}\n\nUSAGE:\n{usage}\n\n{all-args}\n")]
#[command(name = "snippy", disable_version_flag = true)]
pub struct Cli {
    /// Commands
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the installed snippy version.
    #[arg(short = 'V', long = "version", default_value_t = false)]
    pub version: bool,

    /// Verbose
    /// Print debug logs about config, git and brew operations.
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,
}

/// # `run`
/// Runs the parsed command line.
///
/// ## Errors
/// * If the settings or the configuration cannot be read
/// * If the user cancels a prompt
/// * If committing fails
pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    let cache = VersionCache::new(settings.data_dir()?, settings.cache_ttl_secs);

    if cli.version {
        println!("snippy {}", resolve_installed_version(&cache, &Homebrew));
        return Ok(());
    }

    let store = ConfigStore::new(&settings)?;
    let resolver = EmojiResolver::new();
    let mut prompter = InquirePrompter;

    match cli.command {
        None => {
            find_git_root()?;
            refresh_in_background(cache.clone(), Homebrew);

            let outcome = CommitFlow::new(&store, &mut prompter, &GitCli, &resolver).run()?;
            committed(outcome)?;

            notify_if_outdated(&cache, &Homebrew, &mut prompter)?;
        }
        Some(Commands::Config) => {
            refresh_in_background(cache.clone(), Homebrew);

            let doc = store.load()?;
            Configurator::new(doc, &store, &mut prompter, &resolver).run()?;
        }
        Some(Commands::Reset) => {
            store.reset()?;
            print_success(
                "Configuration reset to defaults.",
                &store.config_file_path().display().to_string(),
            );
        }
        Some(Commands::Update) => {
            run_update(&cache, &Homebrew, &mut prompter)?;
        }
        Some(Commands::Completion { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "snippy", &mut io::stdout());
        }
    }

    Ok(())
}

/// Turns a commit that did not happen into an error so the process exits
/// non-zero.
fn committed(outcome: CommitOutcome) -> Result<String> {
    match outcome {
        CommitOutcome::Committed { message } => Ok(message),
        CommitOutcome::NothingStaged { .. } => Err(SnippyError::NothingStaged),
    }
}
