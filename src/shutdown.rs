//! Snapshot-on-exit handling.
//!
//! A dedicated thread waits for Ctrl+C (and SIGTERM on unix). When one
//! arrives it takes the manager lock, which waits out any command in
//! flight, saves the global store and exits the process.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::{persist, Options, Result, TransactionManager};

/// Saves the global store of `manager` if `options.save_on_exit` is set.
///
/// Open scopes are not saved.
///
/// # Errors
///
/// Returns the save error. Callers report it; it is never a panic.
pub fn persist_global(manager: &Mutex<TransactionManager>, options: &Options) -> Result<()> {
    if !options.save_on_exit {
        log::debug!("Saving on exit is disabled");
        return Ok(());
    }

    let tm = manager.lock();
    if tm.in_transaction() {
        log::warn!("Discarding {} uncommitted transaction(s) on exit", tm.depth());
    }
    persist::save_store(tm.global_store(), &options.data_file)
}

/// Starts the shutdown listener thread.
///
/// # Errors
///
/// Returns an error if the thread or its signal runtime cannot be created.
pub fn spawn_listener(
    manager: Arc<Mutex<TransactionManager>>,
    options: Options,
) -> io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    thread::Builder::new().name("shutdown-listener".to_string()).spawn(move || {
        runtime.block_on(wait_for_signal());

        println!("\nSaving data and exiting...");
        let code = match persist_global(&manager, &options) {
            Ok(()) => 0,
            Err(e) => {
                log::error!("Failed to save {:?}: {}", options.data_file, e);
                eprintln!("ERROR: Saving data failed: {}", e);
                1
            }
        };
        std::process::exit(code);
    })
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Unable to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Unable to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
