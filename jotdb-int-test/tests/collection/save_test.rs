use jotdb::collection::replace;
use jotdb::common::Value;
use jotdb::doc;
use jotdb::errors::JotResult;
use jotdb::query::{all, matching};
use jotdb_int_test::test_util::{create_test_collection, create_test_context};

#[test]
fn test_save_creates_new_documents() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;

    let saved = people.save(vec![
        doc! { "name": "Henry", "age": 22, "active": false },
        doc! { "name": "Renato", "age": 20, "active": true },
        doc! { "name": "Frank", "age": 14, "active": true },
    ])?;
    assert_eq!(saved.len(), 3);

    assert_eq!(people.find(&all())?.len(), 3);
    let renato = people.find_one(&matching(doc! { "name": "Renato" }))?.unwrap();
    assert_eq!(renato.get("age"), Some(Value::I64(20)));
    assert_eq!(renato.id(), Some(2));
    Ok(())
}

#[test]
fn test_save_updates_existing_ids() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;
    people.save(vec![
        doc! { "name": "Henry", "age": 22, "active": false },
        doc! { "name": "Renato", "age": 20, "active": true },
        doc! { "name": "Frank", "age": 14, "active": true },
    ])?;

    people.save(vec![
        doc! { "id": 1, "name": "Oswald" },
        doc! { "id": 2, "age": 40 },
        doc! { "id": 3, "active": false },
    ])?;

    assert_eq!(people.find(&all())?.len(), 3);
    let renato = people.find_one(&matching(doc! { "name": "Renato" }))?.unwrap();
    assert_eq!(renato.get("age"), Some(Value::I64(40)));
    Ok(())
}

#[test]
fn test_save_identical_replaces() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;
    people.save(vec![
        doc! { "name": "Henry", "age": 22, "active": false },
        doc! { "name": "Renato", "age": 20, "active": true },
        doc! { "name": "Frank", "age": 14, "active": true },
    ])?;

    people.save_with_options(
        vec![
            doc! { "id": 1, "name": "Oswald" },
            doc! { "id": 2, "age": 40 },
            doc! { "id": 3, "active": false },
        ],
        &replace(),
    )?;

    assert_eq!(people.find(&all())?.len(), 3);
    let oswald = people.find_one(&matching(doc! { "name": "Oswald" }))?.unwrap();
    assert_eq!(oswald.get("age"), None);
    assert_eq!(oswald.id(), Some(1));
    Ok(())
}

#[test]
fn test_save_with_unknown_id_creates() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;

    // id 42 does not exist, so this is a create and the id is reassigned
    let saved = people.save(doc! { "id": 42, "name": "Ghost" })?;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id(), Some(1));
    assert_eq!(people.find(&all())?.len(), 1);
    Ok(())
}

#[test]
fn test_save_without_id_assigns_one() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;

    let saved = people.save(doc! { "name": "Renato", "age": 20 })?;
    assert_eq!(saved[0].id(), Some(1));
    assert_eq!(saved[0].get("age"), Some(Value::I64(20)));
    Ok(())
}

#[test]
fn test_get_last_insert_id_ignores_deletes() -> JotResult<()> {
    let ctx = create_test_context()?;
    let people = create_test_collection(&ctx)?;
    people.save(vec![
        doc! { "name": "Henry", "age": 22, "active": false },
        doc! { "name": "Pascal", "age": 50, "active": true },
    ])?;

    people.delete(&matching(doc! { "name": "Pascal" }))?;
    assert_eq!(people.last_insert_id()?, 2);
    Ok(())
}
