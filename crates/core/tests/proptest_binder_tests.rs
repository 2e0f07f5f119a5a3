//! Property-based tests for binder invariants.
//!
//! These tests verify the behavioral contracts of `bind`:
//! - Interpreter order always matches catalog order
//! - No interpreter holds two environments with the same name
//! - Every environment lands in exactly one bucket, or none without a fallback
//! - Bucket contents follow encounter order

use proptest::prelude::*;
use std::collections::HashSet;
use tox2travis_core::{EnvironmentRecord, Interpreter, InterpreterRegistry, bind};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Basepythons drawn from the built-in catalog plus a few unknown ones.
fn basepython_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("python2.7".to_string()),
        Just("python3.6".to_string()),
        Just("pypy3".to_string()),
        Just("python3.7".to_string()),
        Just("python".to_string()),
        Just("python3.11".to_string()),
    ]
}

fn environment_strategy() -> impl Strategy<Value = EnvironmentRecord> {
    ("[a-z][a-z0-9]{0,6}", basepython_strategy())
        .prop_map(|(name, basepython)| EnvironmentRecord::new(name, basepython))
}

fn environments_strategy() -> impl Strategy<Value = Vec<EnvironmentRecord>> {
    proptest::collection::vec(environment_strategy(), 0..24)
}

/// Environments with distinct names, in random order.
fn unique_environments_strategy() -> impl Strategy<Value = Vec<EnvironmentRecord>> {
    proptest::collection::btree_map("[a-z][a-z0-9]{0,6}", basepython_strategy(), 0..24)
        .prop_map(|named| {
            named
                .into_iter()
                .map(|(name, basepython)| EnvironmentRecord::new(name, basepython))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn fallback_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("python2.7".to_string()),
        Just("python3.6".to_string()),
        Just("pypy".to_string()),
    ])
}

fn sources(interpreters: &[Interpreter]) -> Vec<&str> {
    interpreters.iter().map(Interpreter::source).collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_catalog_order_is_preserved(
        environments in environments_strategy(),
        fallback in fallback_strategy(),
    ) {
        let registry = InterpreterRegistry::builtin();
        let bound = bind(registry.interpreters(), &environments, fallback.as_deref()).unwrap();

        prop_assert_eq!(sources(&bound), sources(registry.interpreters()));
    }

    #[test]
    fn prop_no_duplicate_names_per_interpreter(
        environments in environments_strategy(),
        fallback in fallback_strategy(),
    ) {
        let registry = InterpreterRegistry::builtin();
        let bound = bind(registry.interpreters(), &environments, fallback.as_deref()).unwrap();

        for interpreter in &bound {
            let mut seen = HashSet::new();
            for environment in interpreter.environments() {
                prop_assert!(seen.insert(environment.name()));
            }
        }
    }

    #[test]
    fn prop_every_record_is_placed_once_or_dropped(
        environments in unique_environments_strategy(),
        fallback in fallback_strategy(),
    ) {
        let registry = InterpreterRegistry::builtin();
        let bound = bind(registry.interpreters(), &environments, fallback.as_deref()).unwrap();

        let mut placed = 0usize;
        for environment in &environments {
            let holders: Vec<&str> = bound
                .iter()
                .filter(|i| i.environments().contains(environment))
                .map(Interpreter::source)
                .collect();

            let home = if registry.contains(environment.basepython()) {
                Some(environment.basepython())
            } else {
                fallback.as_deref()
            };
            match home {
                Some(source) => {
                    prop_assert_eq!(holders, vec![source]);
                    placed += 1;
                }
                None => prop_assert!(holders.is_empty()),
            }
        }

        let total: usize = bound.iter().map(|i| i.environments().len()).sum();
        prop_assert_eq!(total, placed);
    }

    #[test]
    fn prop_bucket_follows_encounter_order(
        environments in environments_strategy(),
    ) {
        let registry = InterpreterRegistry::builtin();
        let bound = bind(registry.interpreters(), &environments, None).unwrap();

        for interpreter in &bound {
            let mut expected: Vec<&str> = Vec::new();
            for environment in &environments {
                if environment.basepython() == interpreter.source()
                    && !expected.contains(&environment.name())
                {
                    expected.push(environment.name());
                }
            }
            let actual: Vec<&str> = interpreter.environments().iter().map(|e| e.name()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_binding_twice_equals_binding_once(
        environments in environments_strategy(),
        fallback in fallback_strategy(),
    ) {
        let registry = InterpreterRegistry::builtin();
        let doubled: Vec<EnvironmentRecord> =
            environments.iter().chain(environments.iter()).cloned().collect();

        let once = bind(registry.interpreters(), &environments, fallback.as_deref()).unwrap();
        let twice = bind(registry.interpreters(), &doubled, fallback.as_deref()).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_unknown_fallback_always_fails(
        environments in environments_strategy(),
        fallback in "[a-z]{3,8}[0-9]{2}",
    ) {
        let registry = InterpreterRegistry::builtin();
        prop_assume!(!registry.contains(&fallback));

        let result = bind(registry.interpreters(), &environments, Some(fallback.as_str()));
        match result {
            Err(tox2travis_core::Error::UnknownFallback { basepython }) => {
                prop_assert_eq!(basepython, fallback);
            }
            other => prop_assert!(false, "expected UnknownFallback, got {:?}", other),
        }
    }
}
