// Property-based tests for Transact
// Random command sequences are checked against a plain HashMap model

use std::collections::HashMap;

use proptest::prelude::*;
use transact::{TransactionManager, Value};

#[derive(Debug, Clone)]
enum Op {
    Set(String, Value),
    Delete(String),
}

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(str::to_string)
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-3i64..3).prop_map(Value::Integer),
        prop::sample::select(vec!["x", "y", "0"]).prop_map(|s| Value::Text(s.to_string())),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key(), value()).prop_map(|(k, v)| Op::Set(k, v)),
        1 => key().prop_map(Op::Delete),
    ]
}

fn apply(tm: &mut TransactionManager, model: &mut HashMap<String, Value>, op: &Op) {
    match op {
        Op::Set(k, v) => {
            let updated = tm.set(k.clone(), v.clone());
            assert_eq!(updated, model.insert(k.clone(), v.clone()).is_some());
        }
        Op::Delete(k) => {
            let deleted = tm.delete(k).is_ok();
            assert_eq!(deleted, model.remove(k).is_some());
        }
    }
}

proptest! {
    /// COUNT equals the number of keys whose latest value matches
    #[test]
    fn prop_count_matches_model(
        ops in prop::collection::vec(op(), 0..60),
        probe in value(),
        in_scope in any::<bool>(),
    ) {
        let mut tm = TransactionManager::default();
        if in_scope {
            tm.push_transaction();
        }

        let mut model = HashMap::new();
        for op in &ops {
            apply(&mut tm, &mut model, op);
        }

        let expected = model.values().filter(|v| **v == probe).count();
        prop_assert_eq!(tm.count(&probe), expected);
    }

    /// Anything done inside a rolled back scope leaves no trace
    #[test]
    fn prop_rollback_restores_state(
        before in prop::collection::vec(op(), 0..30),
        inside in prop::collection::vec(op(), 0..30),
    ) {
        let mut tm = TransactionManager::default();
        let mut model = HashMap::new();
        for op in &before {
            apply(&mut tm, &mut model, op);
        }
        let snapshot = tm.global_store().clone();

        tm.push_transaction();
        let mut scratch = model.clone();
        for op in &inside {
            apply(&mut tm, &mut scratch, op);
        }
        tm.rollback().unwrap();

        prop_assert_eq!(tm.global_store(), &snapshot);
        prop_assert_eq!(tm.depth(), 0);
    }

    /// Committing a scope without deletes equals applying its writes directly
    #[test]
    fn prop_commit_equals_direct_writes(
        before in prop::collection::vec(op(), 0..30),
        writes in prop::collection::vec((key(), value()), 0..30),
    ) {
        let mut direct = TransactionManager::default();
        let mut scoped = TransactionManager::default();
        let mut model = HashMap::new();
        for op in &before {
            apply(&mut direct, &mut model.clone(), op);
            apply(&mut scoped, &mut model, op);
        }

        scoped.push_transaction();
        for (k, v) in &writes {
            direct.set(k.clone(), v.clone());
            scoped.set(k.clone(), v.clone());
        }
        scoped.commit().unwrap();

        prop_assert_eq!(scoped.global_store(), direct.global_store());
    }
}
