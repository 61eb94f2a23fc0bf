//! Executes parsed commands against a [`TransactionManager`] and renders
//! their outcome for the user.

use std::fmt;

use crate::{Command, Result, TransactionManager, Value};

/// The successful outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// SET wrote a new key.
    Added,
    /// SET overwrote an existing key.
    Updated,
    /// GET found a value.
    Value(Value),
    /// GET found nothing.
    NotFound,
    /// DELETE removed the key.
    Deleted,
    /// COUNT result.
    Count(usize),
    /// BEGIN, COMMIT or ROLLBACK succeeded. Prints nothing.
    Done,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Added => f.write_str("Added"),
            Reply::Updated => f.write_str("Updated"),
            Reply::Value(value) => write!(f, "{}", value),
            Reply::NotFound => f.write_str("Not found"),
            Reply::Deleted => f.write_str("Deleted"),
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Done => Ok(()),
        }
    }
}

/// Runs `command` against `tm`.
///
/// # Errors
///
/// Propagates `Error::NotFound` from DELETE and `Error::NoTransaction`
/// from COMMIT/ROLLBACK. The manager is left unchanged in both cases.
///
/// # Example
///
/// ```
/// use transact::operations::{execute, Reply};
/// use transact::{Command, TransactionManager};
///
/// # fn main() -> Result<(), transact::Error> {
/// let mut tm = TransactionManager::default();
/// let reply = execute(&mut tm, Command::parse("SET a 10")?)?;
/// assert_eq!(reply, Reply::Added);
/// # Ok(())
/// # }
/// ```
pub fn execute(tm: &mut TransactionManager, command: Command) -> Result<Reply> {
    let reply = match command {
        Command::Set { key, value } => {
            if tm.set(key, value) {
                Reply::Updated
            } else {
                Reply::Added
            }
        }
        Command::Get { key } => match tm.get(&key) {
            Some(value) => Reply::Value(value.clone()),
            None => Reply::NotFound,
        },
        Command::Delete { key } => {
            tm.delete(&key)?;
            Reply::Deleted
        }
        Command::Count { value } => Reply::Count(tm.count(&value)),
        Command::Begin => {
            tm.push_transaction();
            Reply::Done
        }
        Command::Commit => {
            tm.commit()?;
            Reply::Done
        }
        Command::Rollback => {
            tm.rollback()?;
            Reply::Done
        }
    };
    Ok(reply)
}

/// Renders an outcome as the line shown to the user, or `None` if the
/// command prints nothing.
pub fn render(outcome: &Result<Reply>) -> Option<String> {
    match outcome {
        Ok(Reply::Done) => None,
        Ok(reply) => Some(reply.to_string()),
        Err(err) => Some(format!("ERROR: {}", err)),
    }
}
