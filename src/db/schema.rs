//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `quotes` table (write-behind cache of live quotations, one (quote_text, quote_author) per row)
/// - `saved_quotes` table (user-saved quote + background + font selections)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Quotation cache
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    quote_text TEXT NOT NULL,
    quote_author TEXT NOT NULL,
    saved_at TEXT NOT NULL, -- RFC3339
    UNIQUE(quote_text, quote_author)
);

-- ---------------------------------------------------------------------------
-- Saved selections
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS saved_quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    quote_text TEXT NOT NULL,
    quote_author TEXT NOT NULL,
    background_url TEXT NOT NULL,
    font_family TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_saved_quotes_created_at ON saved_quotes(created_at);
"#;
