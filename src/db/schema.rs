//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `reminders` table (one reminder per row, `status` 0 = pending, 1 = sent)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    remind_time TEXT NOT NULL, -- RFC3339
    status INTEGER NOT NULL DEFAULT 0,
    cron_job_id TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    sent_at TEXT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_reminders_status ON reminders(status);
"#;
