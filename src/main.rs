//! RagSnip CLI
//!
//! Command-line interface for curating the snippet store and its
//! markdown digest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use ragsnip::{
    AssumeYes, ConsolePrompt, Prompt, Store, StoreConfig, StoreError, Toggled, watch,
};

#[derive(Parser)]
#[command(name = "ragsnip")]
#[command(
    author,
    version,
    about = "Curate a folder of snippet symlinks and keep a markdown digest in sync"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Store directory (default: ~/rag-snippet)
    #[arg(long, global = true, env = "RAGSNIP_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link files into the snippet store
    Add {
        /// Files to add
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Overwrite colliding entries without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove an entry from the store (interactive picker when omitted)
    Remove {
        /// Entry name or path of the original file
        name: Option<String>,
    },

    /// Add files not yet in the store, remove the ones that are
    Toggle {
        /// Files to toggle
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Overwrite colliding entries without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// List entry names
    List,

    /// Regenerate the markdown digest
    Generate,

    /// Symlink the digest into a project directory
    Link {
        /// Target directory (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// File name for the link (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing file without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Watch the store and regenerate the digest on changes
    Watch {
        /// Debounce window in seconds
        #[arg(long, default_value_t = 2)]
        debounce: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = StoreConfig::resolve(cli.store)?;
    let store = Store::open(config)
        .context("Failed to create the snippet store directory")?;

    match cli.command {
        Commands::Add { files, yes } => {
            let prompt = make_prompt(yes);
            for file in files {
                match store.add(&file, prompt.as_ref()) {
                    Ok(name) => {
                        println!("  {} Added {} to RAG snippets", "✔".green(), name.bold());
                    }
                    Err(e) => report_skip(&file.display().to_string(), e),
                }
            }
        }

        Commands::Remove { name } => match name {
            Some(name) => match store.remove(PathBuf::from(&name).as_path()) {
                Ok(name) => {
                    println!(
                        "  {} Removed {} from RAG snippets",
                        "✔".green(),
                        name.bold()
                    );
                }
                Err(e) => report_skip(&name, e),
            },
            None => remove_interactive(&store)?,
        },

        Commands::Toggle { files, yes } => {
            let prompt = make_prompt(yes);
            for file in files {
                let name = file.display().to_string();
                match store.toggle(&file, prompt.as_ref()) {
                    Ok(Toggled::Added) => {
                        println!("  {} Added {} to RAG snippets", "✔".green(), name.bold());
                    }
                    Ok(Toggled::Removed) => {
                        println!(
                            "  {} Removed {} from RAG snippets",
                            "✔".green(),
                            name.bold()
                        );
                    }
                    Err(e) => report_skip(&name, e),
                }
            }
        }

        Commands::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("{}", "No snippets found in the RAG folder".yellow());
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }

        Commands::Generate => {
            store.generate().context("Failed to generate the digest")?;
            println!(
                "  {} Generated {}",
                "✔".green(),
                store.artifact_path().display()
            );
        }

        Commands::Link { dir, name, yes } => {
            let target_dir = match dir {
                Some(dir) => dir,
                None => env::current_dir().context("Could not determine current directory")?,
            };
            let prompt = make_prompt(yes);

            let file_name = match name {
                Some(name) => name,
                None => match prompt.input(
                    "Name for the markdown file in your project",
                    ragsnip::config::ARTIFACT_FILE_NAME,
                ) {
                    Some(name) => name,
                    None => return Ok(()),
                },
            };

            match store.link_artifact(&target_dir, &file_name, prompt.as_ref()) {
                Ok(target) => {
                    println!(
                        "  {} Linked RAG markdown file to {} in your project",
                        "✔".green(),
                        target.display()
                    );
                }
                Err(StoreError::Cancelled) => {}
                Err(e) => {
                    eprintln!("  {} Error linking markdown file: {}", "✘".red(), e);
                    return Err(e.into());
                }
            }
        }

        Commands::Watch { debounce } => {
            watch::run(&store, Duration::from_secs(debounce))?;
        }
    }

    Ok(())
}

fn make_prompt(yes: bool) -> Box<dyn Prompt> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsolePrompt)
    }
}

/// Interactive removal: pick an entry, confirm, remove.
fn remove_interactive(store: &Store) -> Result<()> {
    let names = store.list()?;
    if names.is_empty() {
        println!("{}", "No snippets found in the RAG folder".yellow());
        return Ok(());
    }

    let prompt = ConsolePrompt;
    let index = match prompt.pick("Select a snippet to remove", &names) {
        Some(index) => index,
        None => return Ok(()),
    };

    let name = &names[index];
    let question = format!("Remove '{name}' from RAG snippets?");
    if prompt.confirm(&question) != Some(true) {
        return Ok(());
    }

    match store.remove(PathBuf::from(name).as_path()) {
        Ok(name) => {
            println!(
                "  {} Removed {} from RAG snippets",
                "✔".green(),
                name.bold()
            );
        }
        Err(e) => report_skip(name, e),
    }

    Ok(())
}

/// Mutating operations never fail the process: expected no-ops stay
/// quiet, real I/O trouble goes to the diagnostic channel.
fn report_skip(what: &str, error: StoreError) {
    if !error.is_silent() {
        tracing::warn!(target_file = %what, error = %error, "Store operation failed");
    }

    match &error {
        StoreError::SourceMissing(path) => {
            println!(
                "  {} Source does not exist: {}",
                "!".yellow(),
                path.display()
            );
        }
        StoreError::EntryMissing(name) => {
            println!("  {} {} is not in the store", "!".yellow(), name);
        }
        StoreError::Cancelled => {
            println!("  {} Skipped {}", "○".yellow(), what.dimmed());
        }
        StoreError::Io(_) => {
            println!("  {} Could not update {}", "!".yellow(), what);
        }
    }
}
