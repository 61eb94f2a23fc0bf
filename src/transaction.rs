//! Nested transaction scopes over a global store.
//!
//! The [`TransactionManager`] owns the global store and a stack of open
//! scopes. Every read and write goes to exactly one store: the innermost
//! scope's snapshot if a scope is open, otherwise the global store.
//!
//! # Architecture
//!
//! ```text
//! BEGIN     push a scope holding a full copy of the active store
//! COMMIT    merge the top scope into the store below it, then pop
//! ROLLBACK  pop the top scope, discarding its snapshot
//!
//!   scopes[n-1]  <- active store while n > 0
//!   scopes[n-2]  <- receives scopes[n-1] on COMMIT
//!   ...
//!   scopes[0]
//!   global       <- receives scopes[0] on COMMIT, active when n == 0
//! ```
//!
//! Commit only moves writes one level outward. Committing a scope nested
//! three deep into the global store takes three COMMITs.

use std::collections::HashSet;

use crate::config::CommitPolicy;
use crate::store::Key;
use crate::{Error, Result, Store, Value};

/// One open scope.
///
/// The snapshot is a copy of the active store taken when the scope was
/// opened. Only the manager touches it, and only while this scope is the
/// innermost one.
#[derive(Debug, Clone)]
struct Transaction {
    snapshot: Store,

    /// Keys deleted in this scope and not set again since.
    /// Only tracked under `CommitPolicy::PropagateDeletes`.
    tombstones: HashSet<Key>,
}

impl Transaction {
    fn new(snapshot: Store) -> Self {
        Self { snapshot, tombstones: HashSet::new() }
    }
}

/// Routes operations to the active store and manages the scope stack.
///
/// # Example
///
/// ```
/// use transact::{Store, TransactionManager, Value};
///
/// # fn main() -> Result<(), transact::Error> {
/// let mut tm = TransactionManager::new(Store::new());
/// tm.set("k", Value::Integer(1));
///
/// tm.push_transaction();
/// tm.set("k", Value::Integer(2));
/// tm.rollback()?;
///
/// assert_eq!(tm.get("k"), Some(&Value::Integer(1)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransactionManager {
    global: Store,
    scopes: Vec<Transaction>,
    policy: CommitPolicy,
}

impl TransactionManager {
    /// Creates a manager over `global` with no open scopes.
    pub fn new(global: Store) -> Self {
        Self { global, scopes: Vec::new(), policy: CommitPolicy::default() }
    }

    /// Sets the commit policy.
    pub fn with_commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the commit policy in use.
    pub fn commit_policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Returns the number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns true if at least one scope is open.
    pub fn in_transaction(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// Returns the global store.
    pub fn global_store(&self) -> &Store {
        &self.global
    }

    /// Consumes the manager, discarding open scopes, and returns the global store.
    pub fn into_global_store(self) -> Store {
        self.global
    }

    /// Returns the store that currently receives reads and writes.
    pub fn active_store(&self) -> &Store {
        match self.scopes.last() {
            Some(txn) => &txn.snapshot,
            None => &self.global,
        }
    }

    fn active_store_mut(&mut self) -> &mut Store {
        match self.scopes.last_mut() {
            Some(txn) => &mut txn.snapshot,
            None => &mut self.global,
        }
    }

    /// Opens a new scope holding a full copy of the active store.
    pub fn push_transaction(&mut self) {
        let snapshot = self.active_store().clone();
        self.scopes.push(Transaction::new(snapshot));
        log::debug!("BEGIN: depth {}", self.depth());
    }

    /// Merges the innermost scope into the next store out and pops it.
    ///
    /// Every key present in the scope overwrites the parent's entry; keys
    /// the scope does not hold are left alone in the parent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoTransaction` if no scope is open. Nothing changes.
    pub fn commit(&mut self) -> Result<()> {
        let Some(txn) = self.scopes.pop() else {
            log::warn!("COMMIT with no open transaction");
            return Err(Error::NoTransaction("commit"));
        };

        let propagate_deletes = self.policy == CommitPolicy::PropagateDeletes;
        let (target, parent_tombstones) = match self.scopes.last_mut() {
            Some(parent) => (&mut parent.snapshot, Some(&mut parent.tombstones)),
            None => (&mut self.global, None),
        };

        if propagate_deletes {
            for key in &txn.tombstones {
                target.delete(key);
            }
            if let Some(parent_tombstones) = parent_tombstones {
                parent_tombstones.extend(txn.tombstones.iter().cloned());
            }
        }

        let mut merged = 0usize;
        for (key, value) in txn.snapshot.into_entries() {
            target.set(key, value);
            merged += 1;
        }

        log::debug!("COMMIT: merged {} keys, depth {}", merged, self.depth());
        Ok(())
    }

    /// Discards the innermost scope and pops it.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoTransaction` if no scope is open. Nothing changes.
    pub fn rollback(&mut self) -> Result<()> {
        if self.scopes.pop().is_none() {
            log::warn!("ROLLBACK with no open transaction");
            return Err(Error::NoTransaction("rollback"));
        }
        log::debug!("ROLLBACK: depth {}", self.depth());
        Ok(())
    }

    /// Writes `value` under `key` in the active store.
    ///
    /// Returns true if the key already existed there (an update), false if
    /// it was added.
    pub fn set(&mut self, key: impl Into<Key>, value: Value) -> bool {
        let key = key.into();
        if self.policy == CommitPolicy::PropagateDeletes {
            if let Some(txn) = self.scopes.last_mut() {
                txn.tombstones.remove(&key);
            }
        }
        let store = self.active_store_mut();
        let updated = store.contains_key(&key);
        store.set(key, value);
        updated
    }

    /// Looks up `key` in the active store.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.active_store().get(key)
    }

    /// Removes `key` from the active store.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the key is absent. Nothing changes.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        if !self.active_store_mut().delete(key) {
            return Err(Error::not_found(key));
        }
        if self.policy == CommitPolicy::PropagateDeletes {
            if let Some(txn) = self.scopes.last_mut() {
                txn.tombstones.insert(key.to_string());
            }
        }
        Ok(())
    }

    /// Counts keys in the active store whose value equals `value`.
    pub fn count(&self, value: &Value) -> usize {
        self.active_store().count(value)
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new(Store::new())
    }
}
