//! # Transact - An Interactive Key-Value Store with Nested Transactions
//!
//! Transact keeps a mutable mapping from string keys to integer or text
//! values and lets a single user open nested transaction scopes over it.
//! Writes made inside a scope stay isolated until the scope is committed
//! into its parent or rolled back.
//!
//! ## Architecture
//!
//! - **Store**: key to value mapping with point reads/writes and count-by-value
//! - **TransactionManager**: the global store plus a stack of scopes, each
//!   holding a full copy of the store that was active when it opened
//! - **Command / operations**: the `SET`/`GET`/`DELETE`/`COUNT`/`BEGIN`/
//!   `COMMIT`/`ROLLBACK` vocabulary and its rendering
//! - **Persist**: JSON snapshot of the global store, loaded on start and
//!   saved on shutdown
//!
//! ## Example Usage
//!
//! ```rust
//! use transact::{Store, TransactionManager, Value};
//!
//! # fn main() -> Result<(), transact::Error> {
//! let mut tm = TransactionManager::new(Store::new());
//! tm.set("a", Value::Integer(10));
//!
//! tm.push_transaction();
//! tm.set("a", Value::Text("hello".to_string()));
//! assert_eq!(tm.get("a"), Some(&Value::Text("hello".to_string())));
//!
//! tm.rollback()?;
//! assert_eq!(tm.get("a"), Some(&Value::Integer(10)));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod command;
pub mod config;
pub mod error;
pub mod operations;
pub mod persist;
pub mod repl;
pub mod shutdown;
pub mod store;
pub mod transaction;
pub mod value;

// Re-exports
pub use command::Command;
pub use config::{CommitPolicy, Options};
pub use error::{Error, Result};
pub use operations::Reply;
pub use repl::Repl;
pub use store::{Key, Store};
pub use transaction::TransactionManager;
pub use value::Value;
