//! Transact command-line entry point.
//!
//! Loads the snapshot, starts the shutdown listener and runs the request
//! loop on stdin/stdout. The global store is saved when a termination
//! signal arrives or stdin is closed.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use parking_lot::Mutex;

use transact::{persist, shutdown, CommitPolicy, Options, Repl, Store, TransactionManager};

/// Interactive key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "transact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Snapshot file holding the global store
    #[arg(short, long, default_value = "data.json")]
    data_file: PathBuf,

    /// Start with an empty store instead of loading the snapshot
    #[arg(long)]
    no_load: bool,

    /// Do not save the global store on exit
    #[arg(long)]
    no_save: bool,

    /// Make COMMIT remove keys that were deleted inside the scope
    #[arg(long)]
    propagate_deletes: bool,

    /// Prompt shown before each command
    #[arg(long, default_value = "> ")]
    prompt: String,
}

impl Cli {
    fn options(&self) -> Options {
        let policy = if self.propagate_deletes {
            CommitPolicy::PropagateDeletes
        } else {
            CommitPolicy::MergePresent
        };

        Options::new()
            .data_file(self.data_file.clone())
            .load_on_start(!self.no_load)
            .save_on_exit(!self.no_save)
            .commit_policy(policy)
            .prompt(self.prompt.clone())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.options();
    options.validate().context("invalid options")?;

    let global =
        if options.load_on_start { persist::load_or_empty(&options.data_file) } else { Store::new() };
    let manager = Arc::new(Mutex::new(
        TransactionManager::new(global).with_commit_policy(options.commit_policy),
    ));

    shutdown::spawn_listener(Arc::clone(&manager), options.clone())
        .context("failed to start shutdown listener")?;

    let repl = Repl::new(Arc::clone(&manager), options.clone());
    repl.run(io::stdin().lock(), io::stdout()).context("request loop failed")?;

    if let Err(e) = shutdown::persist_global(&manager, &options) {
        log::error!("Failed to save {:?}: {}", options.data_file, e);
        eprintln!("ERROR: Saving data failed: {}", e);
    }

    Ok(())
}
