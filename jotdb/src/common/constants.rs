// doc constants
pub const DOC_ID: &str = "id";

// root constants
pub const SETTINGS_FIELD: &str = "settings";
pub const DATA_FIELD: &str = "data";
pub const AUTO_INCREMENT_FIELD: &str = "ai";
pub const AUTO_INCREMENT_PATH: &str = "settings.ai";
pub const INITIAL_AUTO_INCREMENT: u64 = 1;

// file constants
pub const JSON_EXTENSION: &str = ".json";
pub const DEFAULT_DB_NAME: &str = "index";

// field separator for embedded field access
pub const FIELD_SEPARATOR: char = '.';

pub const JOTDB_VERSION: &str = env!("CARGO_PKG_VERSION");
