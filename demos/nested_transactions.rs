//! Nested transactions example for Transact
//!
//! This example demonstrates:
//! - Writing to the global store
//! - Opening nested scopes
//! - Committing one level at a time
//! - Rolling back a scope
//! - Saving and reloading a snapshot

use transact::{persist, Store, TransactionManager, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut tm = TransactionManager::new(Store::new());

    println!("Writing to the global store...");
    tm.set("balance", Value::Integer(100));
    tm.set("owner", Value::parse("alice"));

    println!("Opening two nested scopes...");
    tm.push_transaction();
    tm.set("balance", Value::Integer(80));
    tm.push_transaction();
    tm.set("balance", Value::Integer(50));
    println!("depth = {}, balance = {:?}", tm.depth(), tm.get("balance"));

    // Commit the inner scope: only the outer scope sees it
    tm.commit()?;
    println!("after inner COMMIT: balance = {:?}", tm.get("balance"));
    println!("global balance = {:?}", tm.global_store().get("balance"));

    // Roll back the outer scope: everything since the first BEGIN is gone
    tm.rollback()?;
    println!("after outer ROLLBACK: balance = {:?}", tm.get("balance"));

    // Stack underflow is reported, not fatal
    if let Err(e) = tm.commit() {
        println!("stray COMMIT: {}", e);
    }

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data.json");
    persist::save_store(tm.global_store(), &path)?;
    let reloaded = persist::load_store(&path)?;
    println!("reloaded {} keys from {:?}", reloaded.len(), path);

    Ok(())
}
