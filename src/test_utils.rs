//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid target name (lowercase alphanumeric with hyphens)
    pub fn target_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a relative directory name
    pub fn relative_dir() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,15}"
    }

    /// Generate a non-empty npm argument
    pub fn npm_arg() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("--production".to_string()),
            Just("--legacy-peer-deps".to_string()),
            Just("--no-audit".to_string()),
            "--[a-z-]{2,12}",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::manifest::RawProjectSpec;
    use crate::core::spec;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_target_name_generator(name in target_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_unique_targets_validate_in_input_order(
            targets in proptest::collection::hash_set(target_name(), 1..6),
            args in proptest::collection::vec(npm_arg(), 0..3),
        ) {
            let root = tempfile::TempDir::new().unwrap();
            let source = root.path().join("webapp");
            std::fs::create_dir_all(&source).unwrap();
            std::fs::write(source.join("package.json"), "{}").unwrap();

            let targets: Vec<String> = targets.into_iter().collect();
            let raw: Vec<RawProjectSpec> = targets
                .iter()
                .map(|target| RawProjectSpec {
                    target: target.clone(),
                    source_dir: "webapp".to_string(),
                    args: args.clone(),
                    ..RawProjectSpec::default()
                })
                .collect();

            let specs = spec::validate(root.path(), &raw).unwrap();
            prop_assert_eq!(specs.len(), targets.len());
            for (spec, target) in specs.iter().zip(&targets) {
                prop_assert_eq!(&spec.target, target);
            }

            let outputs: HashSet<_> = specs.iter().map(|s| s.output_dir.clone()).collect();
            prop_assert_eq!(outputs.len(), specs.len());
        }

        #[test]
        fn test_duplicate_target_always_rejected(target in target_name()) {
            let root = tempfile::TempDir::new().unwrap();
            let source = root.path().join("webapp");
            std::fs::create_dir_all(&source).unwrap();
            std::fs::write(source.join("package.json"), "{}").unwrap();

            let entry = RawProjectSpec {
                target: target.clone(),
                source_dir: "webapp".to_string(),
                ..RawProjectSpec::default()
            };
            let mut second = entry.clone();
            second.output_dir = Some("elsewhere".to_string());

            let result = spec::validate(root.path(), &[entry, second]);
            prop_assert!(result.is_err());
        }
    }
}
