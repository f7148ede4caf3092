// ABOUTME: Integration tests for the resolved client configuration and its builder.
// ABOUTME: Covers validation, immutability of snapshots, and environment-only equality.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use stevedore::client::*;

fn hash_of(config: &ClientConfiguration) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

fn env_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[A-Z_][A-Z0-9_]{0,8}", "[ -~]{0,12}", 0..8)
}

mod builder {
    use super::*;

    #[test]
    fn none_environment_is_absent() {
        let config = ClientConfiguration::builder()
            .environment(None::<BTreeMap<String, String>>)
            .unwrap()
            .build();
        assert!(config.environment().is_none());
    }

    #[test]
    fn executable_is_stored_verbatim() {
        let config = ClientConfiguration::builder()
            .executable(Some("/does/not/exist/docker"))
            .build();
        assert_eq!(
            config.executable(),
            Some(Path::new("/does/not/exist/docker"))
        );
    }

    #[test]
    fn key_with_equals_is_rejected() {
        let err = ClientConfiguration::builder()
            .environment(Some([("A=B", "1")]))
            .unwrap_err();
        assert!(matches!(err, InvalidConfiguration::KeyContainsEquals(_)));
        assert!(err.to_string().contains("A=B"));
    }

    #[test]
    fn value_with_nul_is_rejected() {
        let err = ClientConfiguration::builder()
            .environment(Some([("A", "bad\0value")]))
            .unwrap_err();
        assert_eq!(err, InvalidConfiguration::ValueContainsNul("A".to_string()));
    }

    #[test]
    fn snapshots_are_independent() {
        let mut builder = ClientConfiguration::builder();
        builder.environment(Some([("A", "1")])).unwrap();
        let first = builder.build();

        builder.environment(Some([("A", "2")])).unwrap();
        let second = builder.build();

        assert_eq!(first.environment().unwrap()["A"], "1");
        assert_eq!(second.environment().unwrap()["A"], "2");
        assert_ne!(first, second);
    }
}

mod equality {
    use super::*;

    #[test]
    fn absent_equals_absent_regardless_of_executable() {
        let a = ClientConfiguration::builder()
            .executable(Some("docker"))
            .build();
        let b = ClientConfiguration::builder().build();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn usable_as_set_key() {
        let mut seen = std::collections::HashSet::new();
        for exe in ["docker", "podman", "/usr/bin/docker"] {
            seen.insert(
                ClientConfiguration::builder()
                    .environment(Some([("DOCKER_HOST", "unix:///run/docker.sock")]))
                    .unwrap()
                    .executable(Some(exe))
                    .build(),
            );
        }
        assert_eq!(seen.len(), 1);
    }
}

proptest! {
    #[test]
    fn valid_map_round_trips(map in env_map()) {
        let config = ClientConfiguration::builder()
            .environment(Some(map.clone()))
            .unwrap()
            .build();
        prop_assert_eq!(config.environment(), Some(&map));
    }

    #[test]
    fn invalid_entry_leaves_builder_unchanged(before in env_map(), mut after in env_map()) {
        let mut builder = ClientConfiguration::builder();
        builder.environment(Some(before.clone())).unwrap();

        after.insert(String::new(), "x".to_string());
        prop_assert_eq!(
            builder.environment(Some(after)).unwrap_err(),
            InvalidConfiguration::EmptyKey
        );
        let built = builder.build();
        prop_assert_eq!(built.environment(), Some(&before));
    }

    #[test]
    fn equality_ignores_executable(map in env_map(), a in "[a-z/]{1,20}", b in "[a-z/]{1,20}") {
        let x = ClientConfiguration::builder()
            .environment(Some(map.clone()))
            .unwrap()
            .executable(Some(a))
            .build();
        let y = ClientConfiguration::builder()
            .environment(Some(map))
            .unwrap()
            .executable(Some(b))
            .build();
        prop_assert_eq!(&x, &y);
        prop_assert_eq!(hash_of(&x), hash_of(&y));
    }

    #[test]
    fn different_environments_are_never_equal(
        a in env_map(),
        b in env_map(),
        exe in "[a-z/]{1,20}",
    ) {
        prop_assume!(a != b);
        let x = ClientConfiguration::builder()
            .environment(Some(a))
            .unwrap()
            .executable(Some(exe.clone()))
            .build();
        let y = ClientConfiguration::builder()
            .environment(Some(b))
            .unwrap()
            .executable(Some(exe))
            .build();
        prop_assert_ne!(x, y);
    }
}
