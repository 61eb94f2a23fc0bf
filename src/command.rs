//! Line-oriented command parsing.
//!
//! A command line is split on whitespace. The first token names the
//! operation (case-sensitive) and the rest are its arguments. Extra
//! arguments beyond what an operation needs are ignored.

use crate::{Error, Result, Value};

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Key to write
        key: String,
        /// Parsed value literal
        value: Value,
    },
    /// `GET key`
    Get {
        /// Key to read
        key: String,
    },
    /// `DELETE key`
    Delete {
        /// Key to remove
        key: String,
    },
    /// `COUNT value`
    Count {
        /// Parsed value literal to match
        value: Value,
    },
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
}

impl Command {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if the line holds no tokens
    /// - `Error::UnknownOperation` if the first token is not an operation
    /// - `Error::InsufficientArguments` if required arguments are missing
    ///
    /// # Example
    ///
    /// ```
    /// use transact::{Command, Value};
    ///
    /// let cmd = Command::parse("SET a 10").unwrap();
    /// assert_eq!(cmd, Command::Set { key: "a".into(), value: Value::Integer(10) });
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let op = tokens.next().ok_or(Error::EmptyInput)?;
        let args: Vec<&str> = tokens.collect();

        let command = match op {
            "SET" => {
                require("SET", &args, 2)?;
                Command::Set { key: args[0].to_string(), value: Value::parse(args[1]) }
            }
            "GET" => {
                require("GET", &args, 1)?;
                Command::Get { key: args[0].to_string() }
            }
            "DELETE" => {
                require("DELETE", &args, 1)?;
                Command::Delete { key: args[0].to_string() }
            }
            "COUNT" => {
                require("COUNT", &args, 1)?;
                Command::Count { value: Value::parse(args[0]) }
            }
            "BEGIN" => Command::Begin,
            "COMMIT" => Command::Commit,
            "ROLLBACK" => Command::Rollback,
            other => return Err(Error::UnknownOperation(other.to_string())),
        };

        Ok(command)
    }

    /// Returns the operation name as typed by the user.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Delete { .. } => "DELETE",
            Command::Count { .. } => "COUNT",
            Command::Begin => "BEGIN",
            Command::Commit => "COMMIT",
            Command::Rollback => "ROLLBACK",
        }
    }
}

fn require(operation: &'static str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() < expected {
        return Err(Error::InsufficientArguments { operation, expected, actual: args.len() });
    }
    Ok(())
}
