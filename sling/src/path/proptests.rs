//! Property-based tests for path handling.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use super::{Parameters, PathParser};
use crate::provider::{InMemoryResourceProvider, ProviderInfo, ResourceProviderTracker};

// Strategy for a clean absolute path without dots or separators inside segments
fn base_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 1..5)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

// Strategy for a well-formed parameter block with distinct names
fn block_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 1..4)
}

fn render(block: &BTreeMap<String, String>) -> String {
    block.iter().map(|(k, v)| format!(";{k}={v}")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Removing a block and putting it back at the same offset restores the input
    #[test]
    fn block_before_extension_round_trips(
        base in base_path_strategy(),
        ext in "[a-z]{1,4}",
        suffix in prop::option::of("/[a-z]{1,6}"),
        block in block_strategy(),
    ) {
        let tail = format!(".{ext}{}", suffix.unwrap_or_default());
        let input = format!("{base}{}{tail}", render(&block));

        let parsed = PathParser::parse(&input);
        prop_assert_eq!(parsed.path(), format!("{base}{tail}"));

        let expected: Parameters = block.into_iter().collect();
        prop_assert_eq!(parsed.parameters(), &expected);

        let restored = format!("{base}{}{tail}", parsed.parameters());
        prop_assert_eq!(restored, input);
    }

    #[test]
    fn block_after_extension_round_trips(
        base in base_path_strategy(),
        ext in "[a-z]{1,4}",
        suffix in prop::option::of("/[a-z]{1,6}"),
        block in block_strategy(),
    ) {
        let head = format!("{base}.{ext}");
        let suffix = suffix.unwrap_or_default();
        let input = format!("{head}{}{suffix}", render(&block));

        let parsed = PathParser::parse(&input);
        prop_assert_eq!(parsed.path(), format!("{head}{suffix}"));
        prop_assert_eq!(parsed.parameters().len(), block.len());

        let restored = format!("{head}{}{suffix}", parsed.parameters());
        prop_assert_eq!(restored, input);
    }

    // A stripped path carries no further parameters
    #[test]
    fn parse_is_idempotent(input in "[a-z/.;='-]{0,24}") {
        let once = PathParser::parse(&input);
        let twice = PathParser::parse(once.path());
        if !once.parameters().is_empty() {
            prop_assert!(twice.parameters().is_empty());
            prop_assert_eq!(twice.path(), once.path());
        }
    }

    // Either a block was removed or the input comes back untouched
    #[test]
    fn parameters_iff_path_changed(input in "[a-z/.;='-]{0,24}") {
        let parsed = PathParser::parse(&input);
        prop_assert_eq!(parsed.parameters().is_empty(), parsed.path() == input);
        prop_assert!(parsed.path().len() <= input.len());
    }

    // The deeper of two nested mounts always serves paths below it
    #[test]
    fn best_match_prefers_deeper_mount(
        outer in "[a-z]{1,5}",
        inner in "[a-z]{1,5}",
        leaf in "[a-z]{1,5}",
        inner_first in any::<bool>(),
    ) {
        let outer_root = format!("/{outer}");
        let inner_root = format!("{outer_root}/{inner}");
        let tracker = ResourceProviderTracker::new();
        let mut roots = vec![outer_root.clone(), inner_root.clone()];
        if inner_first {
            roots.reverse();
        }
        for root in roots {
            tracker
                .register(ProviderInfo::new(root), Arc::new(InMemoryResourceProvider::new()))
                .unwrap();
        }
        let storage = tracker.storage();

        let below = format!("{inner_root}/{leaf}");
        prop_assert_eq!(storage.find_best_match(&below).unwrap().info().root(), inner_root.as_str());

        let sibling = format!("{inner_root}{leaf}");
        prop_assert_eq!(storage.find_best_match(&sibling).unwrap().info().root(), outer_root.as_str());
        prop_assert!(storage.is_intermediate_path(&outer_root));
    }
}
