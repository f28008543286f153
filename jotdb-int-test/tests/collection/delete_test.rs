use jotdb::common::Value;
use jotdb::doc;
use jotdb::errors::JotResult;
use jotdb::query::{all, any_of, by_id, matching, predicate};
use jotdb_int_test::test_util::{create_test_collection, create_test_context};

#[test]
fn test_delete_by_fields_removes_all_matches() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![
        doc! { "a": "b", "b": 1 },
        doc! { "a": "c", "b": 1 },
        doc! { "a": "d", "b": 1 },
        doc! { "a": "e", "b": 2 },
    ])?;

    let removed = test.delete(&matching(doc! { "b": 1 }))?;
    assert_eq!(removed.len(), 3);

    let data = test.find(&all())?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("a"), Some(Value::from("e")));
    Ok(())
}

#[test]
fn test_delete_by_id_returns_removed_document() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "a": "b" }, doc! { "a": "c" }])?;

    let removed = test.delete(&by_id(2))?;
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].get("a"), Some(Value::from("c")));

    let data = test.find(&all())?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("a"), Some(Value::from("b")));
    Ok(())
}

#[test]
fn test_delete_by_ids_keeps_relative_order() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "a": "b" }, doc! { "a": "c" }, doc! { "a": "d" }])?;

    test.delete(&any_of(vec![by_id(1), by_id(3)]))?;

    let data = test.find(&all())?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    assert_eq!(data[0].id(), Some(2));
    Ok(())
}

#[test]
fn test_delete_by_mixed_specs() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![
        doc! { "a": "b", "b": "a" },
        doc! { "a": "c" },
        doc! { "a": "d" },
    ])?;

    test.delete(&any_of(vec![
        matching(doc! { "b": "a" }),
        matching(doc! { "a": "d" }),
    ]))?;

    let data = test.find(&all())?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("a"), Some(Value::from("c")));
    Ok(())
}

#[test]
fn test_delete_by_predicate() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "a": "b" }, doc! { "b": "c" }, doc! { "a": "d" }])?;

    test.delete(&predicate(|doc| {
        doc.get("a") == Some(Value::from("b")) || doc.get("a") == Some(Value::from("d"))
    }))?;

    let data = test.find(&all())?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("b"), Some(Value::from("c")));
    Ok(())
}

#[test]
fn test_delete_nothing_is_success() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(doc! { "a": "b" })?;

    let removed = test.delete(&by_id(99))?;
    assert!(removed.is_empty());

    let removed = test.delete(&matching(doc! { "missing": 1 }))?;
    assert!(removed.is_empty());
    assert_eq!(test.find(&all())?.len(), 1);
    Ok(())
}

#[test]
fn test_ids_are_not_reused_after_delete() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;
    test.create(vec![doc! { "a": 1 }, doc! { "a": 2 }, doc! { "a": 3 }])?;

    test.delete(&by_id(3))?;
    assert_eq!(test.last_insert_id()?, 3);

    let created = test.create(doc! { "a": 4 })?;
    assert_eq!(created[0].id(), Some(4));
    assert_eq!(test.last_insert_id()?, 4);
    Ok(())
}
