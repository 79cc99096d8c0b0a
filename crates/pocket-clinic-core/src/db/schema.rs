//! SQLite schema definition.

/// Complete database schema for pocket-clinic.
///
/// Every collection lives under its own key as a JSON document, so the schema
/// is a single key-value table.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Store
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON document or plain string
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
