use jotdb::collection::{merge, replace};
use jotdb::common::Value;
use jotdb::doc;
use jotdb::errors::JotResult;
use jotdb::query::{all, any_of, by_id, matching, predicate};
use jotdb_int_test::test_util::{create_test_collection, create_test_context};

#[test]
fn test_update_by_fields_updates_all_matches() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 1, "a": "b" }])?;

    let updated = test.update(&matching(doc! { "b": 1 }), &doc! { "a": "c" })?;
    assert_eq!(updated.len(), 2);

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("a"), Some(Value::from("c")));
    // merge keeps the untouched fields
    assert_eq!(data[0].get("b"), Some(Value::I64(1)));
    Ok(())
}

#[test]
fn test_update_by_fields_identical_replaces() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 1, "a": "b" }])?;

    test.update_with_options(&matching(doc! { "b": 1 }), &doc! { "a": "c" }, &replace())?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("b"), None);
    // ids survive wholesale replacement
    assert_eq!(data[0].id(), Some(1));
    assert_eq!(data[1].id(), Some(2));
    Ok(())
}

#[test]
fn test_update_by_id_merges() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(doc! { "b": 1, "a": "a" })?;

    let updated = test.update(&by_id(1), &doc! { "a": "c" })?;
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].get("a"), Some(Value::from("c")));

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[0].get("b"), Some(Value::I64(1)));
    Ok(())
}

#[test]
fn test_update_by_id_identical() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(doc! { "b": 1, "a": "a" })?;

    test.update_with_options(&by_id(1), &doc! { "a": "c" }, &replace())?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[0].id(), Some(1));
    assert_eq!(data[0].get("b"), None);
    Ok(())
}

#[test]
fn test_update_by_predicate() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 1, "a": "b" }])?;

    test.update(
        &predicate(|doc| doc.get("b") == Some(Value::I64(1))),
        &doc! { "a": "c" },
    )?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("a"), Some(Value::from("c")));
    Ok(())
}

#[test]
fn test_update_by_predicate_identical() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 1, "a": "b" }])?;

    test.update_with_options(
        &predicate(|doc| doc.get("b") == Some(Value::I64(1))),
        &doc! { "a": "c" },
        &replace(),
    )?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("b"), None);
    Ok(())
}

#[test]
fn test_update_any_of_field_specs() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 2, "a": "b" }])?;

    test.update(
        &any_of(vec![matching(doc! { "b": 1 }), matching(doc! { "b": 2 })]),
        &doc! { "a": "c" },
    )?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("b"), Some(Value::I64(2)));
    Ok(())
}

#[test]
fn test_update_any_of_ids() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 2, "a": "b" }])?;

    test.update(&any_of(vec![by_id(1), by_id(2)]), &doc! { "a": "c" })?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[1].get("a"), Some(Value::from("c")));
    Ok(())
}

#[test]
fn test_update_any_of_identical() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "b": 1, "a": "a" }, doc! { "b": 2, "a": "b" }])?;

    test.update_with_options(
        &any_of(vec![matching(doc! { "b": 1 }), matching(doc! { "b": 2 })]),
        &doc! { "a": "c" },
        &replace(),
    )?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("b"), None);
    assert_eq!(data[1].get("b"), None);
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    Ok(())
}

#[test]
fn test_update_no_match_returns_empty() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(doc! { "a": "a" })?;

    let updated = test.update(&by_id(42), &doc! { "a": "c" })?;
    assert!(updated.is_empty());

    let updated = test.update(&matching(doc! { "missing": 1 }), &doc! { "a": "c" })?;
    assert!(updated.is_empty());

    // nothing changed
    let data = test.find(&all())?;
    assert_eq!(data[0].get("a"), Some(Value::from("a")));
    Ok(())
}

#[test]
fn test_update_deferred_flush() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(doc! { "a": "a" })?;

    test.update_with_options(&by_id(1), &doc! { "a": "c" }, &merge().defer_flush())?;

    // the in-memory copy moved, the file did not
    assert_eq!(
        test.find_one(&by_id(1))?.unwrap().get("a"),
        Some(Value::from("c"))
    );
    let reopened = create_test_collection(&ctx)?;
    assert_eq!(
        reopened.find_one(&by_id(1))?.unwrap().get("a"),
        Some(Value::from("a"))
    );

    // the explicit escape hatch persists it
    test.write()?;
    let reopened = create_test_collection(&ctx)?;
    assert_eq!(
        reopened.find_one(&by_id(1))?.unwrap().get("a"),
        Some(Value::from("c"))
    );
    Ok(())
}
