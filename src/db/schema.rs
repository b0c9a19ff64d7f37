//! SQL DDL for the `users` and `leads` tables.
//!
//! Date columns on `leads` are free-form TEXT; callers may store any string.

/// SQLite schema with:
/// - `users.id` TEXT PRIMARY KEY, generated by the application (UUID v4)
/// - `users.username` UNIQUE
/// - `leads.lead_id` TEXT PRIMARY KEY, supplied by the caller
/// - `leads.priority` / `leads.status` defaulting to `Medium` / `new`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS leads (
    lead_id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    age INTEGER NULL,
    source TEXT NULL,
    campaign TEXT NULL,
    utm_source TEXT NULL,
    utm_medium TEXT NULL,
    utm_campaign TEXT NULL,
    inquiry_type TEXT NULL,
    priority TEXT NOT NULL DEFAULT 'Medium',
    status TEXT NOT NULL DEFAULT 'new',
    assigned_to TEXT NULL,
    clinic_id TEXT NULL,
    notes TEXT NULL,
    last_contact_date TEXT NULL,
    next_follow_up_date TEXT NULL,
    converted_date TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status);
"#;
