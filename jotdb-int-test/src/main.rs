use jotdb::collection::JotCollection;
use jotdb::config::JotConfig;
use jotdb::doc;
use jotdb::errors::JotResult;
use jotdb::query::matching;
use jotdb_int_test::test_util::create_test_context;

fn main() -> JotResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;
    let records = JotCollection::open(ctx.db_path("stress"), JotConfig::new())?;

    let count = 10_000;
    let mut batch = Vec::with_capacity(count);
    for i in 0..count {
        let bucket = (i % 16) as i64;
        batch.push(doc! {
            "name": (format!("record-{}", i)),
            "processed": false,
            "bucket": bucket,
        });
    }

    let start = std::time::Instant::now();
    records.create(batch)?;
    let elapsed = start.elapsed();
    println!("Inserted {} records in {:?}", count, elapsed);

    let start = std::time::Instant::now();
    let found = records.find(&matching(doc! { "processed": false }))?;
    let elapsed = start.elapsed();
    println!("Scanned {} records in {:?}", found.len(), elapsed);

    let start = std::time::Instant::now();
    records.update(&matching(doc! { "bucket": 3 }), &doc! { "processed": true })?;
    let elapsed = start.elapsed();
    println!("Updated bucket 3 in {:?}", elapsed);

    Ok(())
}
