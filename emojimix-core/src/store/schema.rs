use rusqlite::{params, Connection, Result as SqlResult};

/// Schema version for the mix table layout.
pub const SCHEMA_VERSION: i32 = 1;

/// Table holding one row per mix; the row hook filters on this name.
pub const MIX_TABLE: &str = "mixes";

/// Create all tables if missing and record the schema version.
pub fn create_tables(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        params![SCHEMA_VERSION],
    )?;
    Ok(())
}

// Columns stay nullable; rows that fail to decode surface as corrupt on read.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS mixes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    symbols TEXT,
    color_hex TEXT
);

CREATE INDEX IF NOT EXISTS mixes_by_symbols ON mixes (symbols, id);
";
