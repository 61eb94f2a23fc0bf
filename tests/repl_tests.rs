// End-to-end REPL tests for Transact
// A whole session is fed through an in-memory reader and the written transcript is checked

use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use transact::{CommitPolicy, Options, Repl, TransactionManager, Value};

fn session(input: &str, options: Options) -> (String, Arc<Mutex<TransactionManager>>) {
    let manager = Arc::new(Mutex::new(
        TransactionManager::default().with_commit_policy(options.commit_policy),
    ));
    let repl = Repl::new(Arc::clone(&manager), options.prompt(""));

    let mut output = Vec::new();
    repl.run(Cursor::new(input.to_string()), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), manager)
}

/// Test the full reference transcript
#[test]
fn test_e2e_reference_transcript() {
    let input = "\
SET a 10
SET a 20
GET a
BEGIN
SET a hello
GET a
ROLLBACK
GET a
";
    let (output, manager) = session(input, Options::default());

    assert_eq!(
        output,
        "Added\nUpdated\n(integer) 20\nUpdated\n(string) hello\n(integer) 20\n"
    );
    assert_eq!(manager.lock().depth(), 0);
}

/// Errors are reported and the loop keeps going
#[test]
fn test_e2e_errors_do_not_stop_loop() {
    let input = "\
FLY away
SET lonely
GET
COMMIT
ROLLBACK
DELETE ghost

SET after 1
";
    let (output, manager) = session(input, Options::default());

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ERROR: Unknown operation",
            "ERROR: Insufficient arguments",
            "ERROR: Insufficient arguments",
            "ERROR: No transactions to commit",
            "ERROR: No transactions to rollback",
            "ERROR: Not found",
            "Added",
        ]
    );
    assert_eq!(manager.lock().get("after"), Some(&Value::Integer(1)));
    assert!(manager.lock().get("lonely").is_none());
}

/// Nested scopes through the REPL
#[test]
fn test_e2e_nested_commit() {
    let input = "\
SET k 1
BEGIN
SET k 2
BEGIN
SET k 3
COMMIT
GET k
COMMIT
GET k
COUNT 3
";
    let (output, manager) = session(input, Options::default());

    assert_eq!(output, "Added\nUpdated\nUpdated\n(integer) 3\n(integer) 3\n1\n");
    assert_eq!(manager.lock().global_store().get("k"), Some(&Value::Integer(3)));
}

/// The delete policy is honoured end to end
#[test]
fn test_e2e_delete_policies() {
    let input = "SET k 1\nBEGIN\nDELETE k\nCOMMIT\nGET k\n";

    let (output, _) = session(input, Options::default());
    assert_eq!(output, "Added\nDeleted\n(integer) 1\n");

    let (output, _) =
        session(input, Options::default().commit_policy(CommitPolicy::PropagateDeletes));
    assert_eq!(output, "Added\nDeleted\nNot found\n");
}

/// A reader of the manager only ever sees state between whole commands
#[test]
fn test_e2e_lock_held_per_command() {
    let manager = Arc::new(Mutex::new(TransactionManager::default()));
    let repl = Repl::new(Arc::clone(&manager), Options::default().prompt(""));

    let mut input = String::new();
    for i in 0..500 {
        input.push_str(&format!("BEGIN\nSET k{} {}\nCOMMIT\n", i, i));
    }

    let observer = {
        let manager = Arc::clone(&manager);
        thread::spawn(move || {
            for _ in 0..200 {
                let tm = manager.lock();
                assert!(tm.depth() <= 1);
            }
        })
    };

    let mut output = Vec::new();
    repl.run(Cursor::new(input), &mut output).unwrap();
    observer.join().unwrap();

    let tm = manager.lock();
    assert_eq!(tm.depth(), 0);
    assert_eq!(tm.global_store().len(), 500);
}
