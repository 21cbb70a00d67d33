use super::record_at;
use crate::LocationMap;

use lg_core::Identity;

use proptest::prelude::*;

fn id(value: &str) -> Identity {
    Identity::parse(value).unwrap()
}

#[test]
fn given_empty_map_when_replaced_then_all_joined() {
    let mut map = LocationMap::new();

    let change = map.replace_with(vec![record_at("a", "Alice", 1.0, 1.0), record_at("b", "Bob", 2.0, 2.0)]);

    assert_eq!(change.joined, vec![id("a"), id("b")]);
    assert!(change.left.is_empty());
    assert_eq!(map.len(), 2);
}

#[test]
fn given_existing_members_when_replaced_then_absent_records_removed() {
    let mut map = LocationMap::new();
    map.replace_with(vec![record_at("a", "Alice", 1.0, 1.0), record_at("b", "Bob", 2.0, 2.0)]);

    let change = map.replace_with(vec![record_at("b", "Bob", 2.5, 2.5), record_at("c", "Carol", 3.0, 3.0)]);

    assert_eq!(change.joined, vec![id("c")]);
    assert_eq!(change.left, vec![id("a")]);
    assert!(!map.contains(&id("a")));
    assert_eq!(map.get(&id("b")).unwrap().latitude, 2.5);
}

#[test]
fn given_same_membership_when_replaced_then_change_empty() {
    let mut map = LocationMap::new();
    map.replace_with(vec![record_at("a", "Alice", 1.0, 1.0)]);

    let change = map.replace_with(vec![record_at("a", "Alice", 1.5, 1.0)]);

    assert!(change.is_empty());
    assert_eq!(map.len(), 1);
}

#[test]
fn given_duplicate_ids_when_replaced_then_last_record_kept() {
    let mut map = LocationMap::new();

    map.replace_with(vec![record_at("a", "Alice", 1.0, 1.0), record_at("a", "Alice", 4.0, 4.0)]);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&id("a")).unwrap().latitude, 4.0);
}

proptest! {
    #[test]
    fn given_any_snapshot_when_replaced_then_keys_equal_snapshot_ids(
        before in prop::collection::btree_set("[a-f]{1,3}", 0..8),
        after in prop::collection::btree_set("[a-f]{1,3}", 0..8),
    ) {
        let mut map = LocationMap::new();
        map.replace_with(before.iter().map(|key| record_at(key, "x", 0.0, 0.0)));

        map.replace_with(after.iter().map(|key| record_at(key, "x", 0.0, 0.0)));

        let keys: Vec<String> = map.keys().map(|key| key.to_string()).collect();
        let expected: Vec<String> = after.into_iter().collect();
        prop_assert_eq!(keys, expected);
    }
}
