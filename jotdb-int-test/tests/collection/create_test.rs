use jotdb::common::Value;
use jotdb::doc;
use jotdb::errors::JotResult;
use jotdb::query::all;
use jotdb_int_test::test_util::{create_test_collection, create_test_context};

#[test]
fn test_constructor_seeds_settings_and_data() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;

    assert!(matches!(
        test.get_prop("settings"),
        Some(Value::Document(_))
    ));
    assert_eq!(test.get_prop("settings.ai"), Some(Value::I64(1)));
    assert_eq!(test.get_prop("data"), Some(Value::Array(Vec::new())));
    Ok(())
}

#[test]
fn test_create_one() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;

    let created = test.create(doc! { "foo": "bar", "bar": "foo" })?;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].get("bar"), Some(Value::from("foo")));
    assert_eq!(created[0].id(), Some(1));

    let data = test.find(&all())?;
    assert_eq!(data[0].get("bar"), Some(Value::from("foo")));
    assert_eq!(test.get_prop("settings.ai"), Some(Value::I64(2)));
    Ok(())
}

#[test]
fn test_create_many() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;

    let created = test.create(vec![doc! { "foo": "bar" }, doc! { "foo": "foo" }])?;
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].id(), Some(1));
    assert_eq!(created[1].id(), Some(2));

    let data = test.find(&all())?;
    assert_eq!(data[0].get("foo"), Some(Value::from("bar")));
    assert_eq!(data[1].get("foo"), Some(Value::from("foo")));
    Ok(())
}

#[test]
fn test_create_with_producer() -> JotResult<()> {
    let ctx = create_test_context()?;
    let test = create_test_collection(&ctx)?;

    test.create_with(|| doc! { "foo": "bar" })?;
    test.create_with(|| vec![doc! { "bar": "foo" }, doc! { "far": "boo" }])?;

    let data = test.find(&all())?;
    assert_eq!(data[0].get("foo"), Some(Value::from("bar")));
    assert_eq!(data[1].get("bar"), Some(Value::from("foo")));
    assert_eq!(data[2].get("far"), Some(Value::from("boo")));
    Ok(())
}

#[test]
fn test_ids_survive_reopen() -> JotResult<()> {
    let ctx = create_test_context()?;
    {
        let test = create_test_collection(&ctx)?;
        test.create(vec![doc! { "a": "b" }, doc! { "a": "c" }])?;
    }

    let test = create_test_collection(&ctx)?;
    let created = test.create(doc! { "a": "d" })?;
    assert_eq!(created[0].id(), Some(3));
    assert_eq!(test.last_insert_id()?, 3);
    Ok(())
}
