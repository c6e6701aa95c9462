//! Database schema and migrations for CloudDrop.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL,
    password    TEXT NOT NULL,           -- Argon2 hash (legacy rows: plaintext)
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

-- The unique index, not application logic, arbitrates concurrent
-- registrations of the same email.
CREATE UNIQUE INDEX idx_users_email ON users(email);
"#,
    // v2: Uploads ledger
    r#"
-- One row per stored blob, binding it to its owner
CREATE TABLE uploads (
    id            TEXT PRIMARY KEY,      -- uuid v4
    owner_email   TEXT NOT NULL,
    original_name TEXT NOT NULL,
    stored_name   TEXT NOT NULL,
    storage_path  TEXT NOT NULL UNIQUE,  -- {namespace}/{stored_name}
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_uploads_owner_created ON uploads(owner_email, created_at DESC);
"#,
];
