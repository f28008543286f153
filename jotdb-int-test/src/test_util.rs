use jotdb::collection::JotCollection;
use jotdb::config::JotConfig;
use jotdb::errors::JotResult;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory for one test.
///
/// Every database a test opens lives under its own temporary directory, which
/// is removed when the context is dropped.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Resolves a database name inside the scratch directory.
    pub fn db_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Creates a fresh scratch directory for a test.
pub fn create_test_context() -> JotResult<TestContext> {
    let dir = tempfile::tempdir()?;
    Ok(TestContext { dir })
}

/// Opens a default-configured collection named `test` inside the context.
pub fn create_test_collection(ctx: &TestContext) -> JotResult<JotCollection> {
    JotCollection::open(ctx.db_path("test"), JotConfig::new())
}
