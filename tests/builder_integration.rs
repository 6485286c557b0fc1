//! Integration tests for the fluent builder
//!
//! Drives the public API end to end: builder calls, compilation, request
//! assembly, execution through a transport and hydration.

use serde_json::{json, Value};
use squidex_builder::query::ClauseKind;
use squidex_builder::testing::{MemoryRecordStore, RecordingTransport, RequestKind};
use squidex_builder::{
    BuilderError, Connector, Hit, IndexTarget, ResultPage, ScopeRegistry, SearchBuilder,
    SearchSettings,
};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: u64,
    name: &'static str,
}

fn users() -> SearchBuilder {
    SearchBuilder::new(IndexTarget::new("users"))
}

fn compiled(builder: &SearchBuilder) -> Option<Value> {
    builder.compile().map(|q| q.to_json())
}

fn user_store() -> MemoryRecordStore<User> {
    MemoryRecordStore::new(|u: &User| u.id.to_string()).with_records(vec![
        User { id: 2, name: "bea" },
        User { id: 5, name: "eve" },
        User { id: 7, name: "gus" },
        User { id: 9, name: "ida" },
    ])
}

fn ranked_hits(ids: &[&str], total: u64) -> RecordingTransport {
    RecordingTransport::new().with_page(ResultPage::new(
        ids.iter().map(|id| Hit::new(*id)).collect(),
        total,
    ))
}

#[test]
fn test_two_argument_where_is_term_must() {
    let builder = users().where_eq("status", "active");

    let clause = &builder.clauses()[0];
    assert_eq!(clause.connector, Connector::Must);
    assert!(matches!(
        &clause.kind,
        ClauseKind::Term { field, value } if field == "status" && value == &json!("active")
    ));
    assert_eq!(compiled(&builder), Some(json!({ "term": { "status": "active" } })));
}

#[test]
fn test_comparison_operator_is_range() {
    let builder = users().where_op("age", ">", 18).unwrap();
    assert_eq!(
        compiled(&builder),
        Some(json!({ "range": { "age": { "gt": 18 } } }))
    );
}

#[test]
fn test_not_equal_forces_must_not() {
    let builder = users().where_op("age", "!=", 18).unwrap();
    assert_eq!(builder.clauses()[0].connector, Connector::MustNot);
    assert_eq!(
        compiled(&builder),
        Some(json!({ "bool": { "must_not": [ { "term": { "age": 18 } } ] } }))
    );
}

#[test]
fn test_where_then_or_where_becomes_should() {
    let builder = users().where_eq("a", 1).or_where_eq("b", 2);
    assert_eq!(
        compiled(&builder),
        Some(json!({
            "bool": { "should": [ { "term": { "a": 1 } }, { "term": { "b": 2 } } ] }
        }))
    );
}

#[test]
fn test_tie_break_only_for_two_clauses() {
    let builder = users()
        .where_eq("a", 1)
        .where_eq("b", 2)
        .or_where_eq("c", 3);
    assert_eq!(
        compiled(&builder),
        Some(json!({
            "bool": {
                "must": [ { "term": { "a": 1 } }, { "term": { "b": 2 } } ],
                "should": [ { "term": { "c": 3 } } ]
            }
        }))
    );
}

#[test]
fn test_single_clause_passthrough() {
    assert_eq!(compiled(&users().where_eq("a", 1)), Some(json!({ "term": { "a": 1 } })));
}

#[test]
fn test_empty_nested_group_is_noop() {
    let plain = users().where_eq("a", 1);
    let with_empty = users().where_eq("a", 1).where_nested(|q| q);

    assert_eq!(with_empty.clauses().len(), 1);
    assert_eq!(compiled(&plain), compiled(&with_empty));
}

#[test]
fn test_compile_is_idempotent() {
    let builder = users()
        .where_eq("a", 1)
        .or_where_nested(|q| q.where_not_null("b").where_between("c", 1, 5))
        .where_null("d");

    let first = compiled(&builder);
    let second = compiled(&builder);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn test_for_page_window() {
    let second = users().for_page(2, 15);
    assert_eq!(second.offset_value(), Some(15));
    assert_eq!(second.limit_value(), Some(15));

    let first = users().for_page(1, 15);
    assert_eq!(first.offset_value(), Some(0));
    assert_eq!(first.limit_value(), Some(15));
}

#[test]
fn test_hydration_keeps_hit_order() {
    let transport = ranked_hits(&["5", "2", "9"], 3);
    let store = user_store();

    let records = users()
        .where_eq("active", true)
        .get_records(&transport, &store, &[])
        .unwrap();

    let ids: Vec<u64> = records.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![5, 2, 9]);
    assert_eq!(store.bulk_lookups(), 1);
}

#[test]
fn test_hydration_through_cache_keeps_hit_order() {
    let transport = ranked_hits(&["9", "5", "2"], 3);
    let store = user_store().with_cache();

    let records = users().get_records(&transport, &store, &[]).unwrap();
    let names: Vec<&str> = records.iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["ida", "eve", "bea"]);
    assert_eq!(store.cache_lookups(), 1);
    assert_eq!(store.bulk_lookups(), 0);
}

#[test]
fn test_hydration_drops_unknown_ids() {
    let transport = ranked_hits(&["5", "404", "2"], 3);
    let records = users().get_records(&transport, &user_store(), &[]).unwrap();
    let ids: Vec<u64> = records.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![5, 2]);
    assert_eq!(records.total(), 3);
}

#[test]
fn test_custom_id_resolver() {
    let transport = ranked_hits(&["user-7", "user-2"], 2);

    let builder = users().with_id_resolver(|hit: &Hit| {
        hit.id.trim_start_matches("user-").to_string()
    });

    let records = builder.get_records(&transport, &user_store(), &[]).unwrap();
    let ids: Vec<u64> = records.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![7, 2]);
}

#[test]
fn test_paginate_hits() {
    let transport = ranked_hits(&["7", "9"], 17);
    let page = users()
        .order_by("name", "asc")
        .paginate(&transport, Some(5), 4, &["name".to_string()])
        .unwrap();

    assert_eq!(page.current_page, 4);
    assert_eq!(page.last_page(), 4);
    assert!(!page.has_more_pages());
    assert_eq!(page.first_item(), Some(16));

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.kind, RequestKind::Search);
    assert_eq!(
        sent.body,
        json!({
            "sort": [ { "name": "asc" } ],
            "from": 15,
            "size": 5,
            "_source": ["name"]
        })
    );
}

#[test]
fn test_builder_from_settings() {
    let settings = SearchSettings::new("users").with_per_page(20);
    let transport = ranked_hits(&[], 0);

    let builder = SearchBuilder::from_settings(&settings).for_page(3, settings.per_page);
    builder.get(&transport, &settings.columns).unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.target.path(), "users/_doc");
    assert_eq!(sent.body["from"], 40);
    assert_eq!(sent.body["size"], 20);

    let settings = settings.with_page_name("p");
    let page = SearchBuilder::from_settings(&settings)
        .paginate(&transport, None, 3, &[])
        .unwrap();
    assert_eq!(page.page_name, "p");
    assert_eq!(page.per_page, 20);
    assert_eq!(transport.last_request().unwrap().body["_source"], json!(["*"]));
}

#[test]
fn test_scopes_inside_nested_groups() {
    let scopes = Arc::new(
        ScopeRegistry::new()
            .register("adults", |q, _| q.where_op("age", ">=", 18))
            .register("named", |q, args| {
                let name = args.first().cloned().unwrap_or(Value::Null);
                Ok(q.where_eq("name", name))
            }),
    );

    let builder = users()
        .with_scopes(scopes)
        .scope("adults", &[])
        .unwrap()
        .try_where_nested(|q| {
            Ok(q.scope("named", &[json!("eve")])?
                .or_where_eq("name", "ida"))
        })
        .unwrap();

    assert_eq!(
        compiled(&builder),
        Some(json!({
            "bool": {
                "must": [
                    { "range": { "age": { "gte": 18 } } },
                    { "bool": { "should": [
                        { "term": { "name": "eve" } },
                        { "term": { "name": "ida" } }
                    ] } }
                ]
            }
        }))
    );
}

#[test]
fn test_unknown_scope_is_reported() {
    let err = users().scope("popular", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Call to undefined search scope: popular()");
    assert!(matches!(err, BuilderError::UnknownOperation { .. }));
}

#[test]
fn test_missing_value_rejected() {
    let err = users().where_op("age", ">", Value::Null).unwrap_err();
    assert!(matches!(err, BuilderError::InvalidArgument(_)));
    assert!(err.is_caller_error());
}

#[test]
fn test_count_and_search_share_query() {
    let transport = RecordingTransport::new().with_count(12);
    let builder = users().where_text("bio", "rust developer").unwrap().take(3);

    assert_eq!(builder.count(&transport).unwrap(), 12);
    builder.get(&transport, &[]).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].kind, RequestKind::Count);
    assert_eq!(requests[0].body["query"], requests[1].body["query"]);
    assert_eq!(
        requests[0].body["query"],
        json!({ "match_phrase": { "bio": "rust developer" } })
    );
}

#[test]
fn test_concurrent_builders_share_transport() {
    let transport = Arc::new(ranked_hits(&["2"], 1));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transport = Arc::clone(&transport);
            std::thread::spawn(move || {
                users()
                    .where_eq("shard", i)
                    .get(transport.as_ref(), &[])
                    .map(|page| page.total_hits)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
    assert_eq!(transport.request_count(), 4);
}
