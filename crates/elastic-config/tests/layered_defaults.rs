//! End-to-end behavior of the store through its public API.

use elastic_config::{Configuration, ElasticStore, StoreError, StoredValue, canonicalize};

fn sample() -> ElasticStore<String> {
    let mut store = ElasticStore::new();
    for (config, value) in [
        (vec![("lang", "es")], "es"),
        (vec![("lang", "en")], "en"),
        (vec![("lang", "en"), ("sector", "construction")], "en-construction"),
        (vec![("lang", "en"), ("sector", "consulting")], "en-consulting"),
        (vec![("lang", "en"), ("company", "comp")], "en-comp"),
        (
            vec![("lang", "en"), ("company", "comp"), ("sector", "construction")],
            "en-comp-construction",
        ),
    ] {
        store.set(config, value.to_string());
    }
    store
}

fn single(value: &StoredValue<String>) -> &str {
    value.as_single().map(String::as_str).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn specificity_is_monotonic() {
    let store = sample();
    let a = [("lang", "en")];
    let b = [("lang", "en"), ("company", "comp")];
    let c = [("lang", "en"), ("company", "comp"), ("sector", "construction")];

    assert_eq!(single(store.get(a).unwrap()), "en");
    assert_eq!(single(store.get(b).unwrap()), "en-comp");
    assert_eq!(single(store.get(c).unwrap()), "en-comp-construction");
}

#[test]
fn query_missing_a_required_attribute_is_not_found() {
    let store = sample();
    match store.get([("sector", "retail")]) {
        Err(StoreError::NotFound { query }) => {
            assert_eq!(query, canonicalize([("sector", "retail")]));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(store.get([("lang", "ca")]).is_err());
}

#[test]
fn elastic_versus_exact_containment() {
    let store = sample();
    let retail = [("lang", "en"), ("sector", "retail")];
    assert!(store.elastic_contains(retail));
    assert!(!store.has_exact(retail));
    assert!(store.has_exact([("sector", "construction"), ("lang", "en")]));
}

#[test]
fn append_accumulates_and_aggregates() {
    let mut store = sample();
    let construction = [("lang", "en"), ("sector", "construction")];
    let retail = [("lang", "en"), ("sector", "retail")];

    assert_eq!(
        store.append(construction, "en-const-appended".to_string()),
        strings(&["en-construction", "en-const-appended"]).as_slice()
    );
    assert_eq!(
        store.get(construction).unwrap(),
        &StoredValue::List(strings(&["en-construction", "en-const-appended"]))
    );

    assert_eq!(
        store.append(retail, "en-retail".to_string()),
        strings(&["en-retail"]).as_slice()
    );
    assert_eq!(
        store.append(retail, "en-ret-appended".to_string()),
        strings(&["en-retail", "en-ret-appended"]).as_slice()
    );

    assert_eq!(store.all([("lang", "en")]).len(), 8);
    assert_eq!(store.all(Configuration::new()).len(), 9);

    let construction_values: Vec<&str> = store
        .all(construction)
        .into_iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        construction_values,
        vec!["en-construction", "en-const-appended", "en-comp-construction"]
    );
}

#[test]
fn add_is_idempotent_and_bag_deduplicates() {
    let mut store: ElasticStore<String> = ElasticStore::new();
    let es = [("lang", "es")];

    assert_eq!(store.add(es, "es1".to_string()).len(), 1);
    assert_eq!(store.add(es, "es1".to_string()).len(), 1);
    assert_eq!(store.add(es, "es2".to_string()).len(), 2);

    let bag = store.bag(es);
    assert_eq!(bag.len(), 2);
    assert!(bag.contains(&"es1".to_string()));
    assert!(bag.contains(&"es2".to_string()));
}

#[test]
fn appending_duplicates_then_bagging() {
    let mut store: ElasticStore<String> = ElasticStore::new();
    let es = [("lang", "es")];
    store.append(es, "es1".to_string());
    assert_eq!(store.append(es, "es1".to_string()).len(), 2);
    assert_eq!(store.bag(es).len(), 1);
}

#[test]
fn aggregation_scope() {
    let mut store: ElasticStore<&str> = ElasticStore::new();
    store.set([("lang", "en")], "en");
    store.set([("lang", "en"), ("sector", "construction")], "en-c");
    store.set([("lang", "es")], "es");

    let en = store.all([("lang", "en")]);
    assert!(en.contains(&&"en"));
    assert!(en.contains(&&"en-c"));
    assert!(!en.contains(&&"es"));

    let construction = store.bag([("lang", "en"), ("sector", "construction")]);
    assert!(construction.contains(&"en-c"));
    assert!(!construction.contains(&"en"));
}

#[test]
fn set_then_get_round_trips() {
    let mut store = ElasticStore::new();
    let config = Configuration::new().with("region", "north").with("tier", "gold");
    store.set(&config, 42_u32);
    assert_eq!(store.get(&config).unwrap(), &StoredValue::Single(42));
    assert_eq!(store.resolve_key(&config), Some(&canonicalize(&config)));
}

#[test]
fn equally_specific_matches_resolve_deterministically() {
    let mut forward: ElasticStore<&str> = ElasticStore::new();
    forward.set([("lang", "en"), ("sector", "construction")], "by-sector");
    forward.set([("lang", "en"), ("company", "comp")], "by-company");

    let mut backward: ElasticStore<&str> = ElasticStore::new();
    backward.set([("lang", "en"), ("company", "comp")], "by-company");
    backward.set([("lang", "en"), ("sector", "construction")], "by-sector");

    let query = [("lang", "en"), ("sector", "construction"), ("company", "other")];
    // Only the sector entry qualifies here.
    assert_eq!(forward.get(query).unwrap(), &StoredValue::Single("by-sector"));

    let query = [("lang", "en"), ("sector", "construction"), ("company", "comp"), ("x", "y")];
    assert_eq!(forward.get(query).unwrap(), backward.get(query).unwrap());
    assert_eq!(forward.get(query).unwrap(), &StoredValue::Single("by-company"));
    assert_eq!(backward.get(query).unwrap(), &StoredValue::Single("by-company"));
}
