//! Persistent SQLite store for usage counters and user records.

use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// Aggregate action counters. A single fixed row in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub users_served: u64,
    pub forms_sent: u64,
    pub contacts_requested: u64,
}

impl Counters {
    pub fn total(&self) -> u64 {
        self.users_served + self.forms_sent + self.contacts_requested
    }
}

/// A registered user. Created on /start, never deleted.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub first_seen: String,
    pub last_seen: String,
    pub message_count: u32,
}

/// SQLite-backed store. All writes happen from the sequential handler
/// context; the mutex only guards the connection handle.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
        let db = Self { conn: Mutex::new(conn) };
        db.init_schema();
        db
    }

    /// Open (or create) the store at the given path.
    pub fn load_or_new(path: &Path) -> Self {
        let conn = Connection::open(path).expect("Failed to open database");
        let db = Self { conn: Mutex::new(conn) };
        db.init_schema();

        let counters = db.counters();
        info!(
            "Loaded database from {:?} ({} users served, {} forms, {} contacts)",
            path, counters.users_served, counters.forms_sent, counters.contacts_requested
        );
        db
    }

    fn init_schema(&self) {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS counters (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                users_served INTEGER NOT NULL DEFAULT 0,
                forms_sent INTEGER NOT NULL DEFAULT 0,
                contacts_requested INTEGER NOT NULL DEFAULT 0
            );

            INSERT OR IGNORE INTO counters (id) VALUES (1);

            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT NOT NULL,
                first_seen TEXT NOT NULL,
                last_seen TEXT NOT NULL,
                message_count INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
        "#,
        )
        .expect("Failed to initialize database schema");
    }

    // ==================== COUNTER METHODS ====================

    fn bump(&self, sql: &str) {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(sql, []).unwrap_or_else(|e| {
            warn!("Failed to bump counter: {e}");
            0
        });
    }

    /// Count one served user (a /start).
    pub fn add_user_served(&self) {
        self.bump("UPDATE counters SET users_served = users_served + 1 WHERE id = 1");
    }

    /// Count one lead form sent.
    pub fn add_form_sent(&self) {
        self.bump("UPDATE counters SET forms_sent = forms_sent + 1 WHERE id = 1");
    }

    /// Count one agent-contact request.
    pub fn add_contact_requested(&self) {
        self.bump("UPDATE counters SET contacts_requested = contacts_requested + 1 WHERE id = 1");
    }

    /// Read all three counters.
    pub fn counters(&self) -> Counters {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.query_row(
            "SELECT users_served, forms_sent, contacts_requested FROM counters WHERE id = 1",
            [],
            |row| {
                Ok(Counters {
                    users_served: row.get::<_, i64>(0)? as u64,
                    forms_sent: row.get::<_, i64>(1)? as u64,
                    contacts_requested: row.get::<_, i64>(2)? as u64,
                })
            },
        )
        .unwrap_or_else(|e| {
            warn!("Failed to read counters: {e}");
            Counters::default()
        })
    }

    /// Zero all three counters in one step.
    pub fn reset_counters(&self) {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "UPDATE counters SET users_served = 0, forms_sent = 0, contacts_requested = 0 WHERE id = 1",
            [],
        )
        .unwrap_or_else(|e| {
            warn!("Failed to reset counters: {e}");
            0
        });
        info!("🧹 Counters reset");
    }

    // ==================== USER METHODS ====================

    /// Upsert a user on /start. New users get first_seen = last_seen = now;
    /// returning users keep first_seen and advance last_seen.
    pub fn upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: &str,
        timestamp: &str,
    ) {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO users (user_id, username, first_name, first_seen, last_seen, message_count)
             VALUES (?1, ?2, ?3, ?4, ?4, 1)
             ON CONFLICT(user_id) DO UPDATE SET
                username = COALESCE(?2, username),
                first_name = ?3,
                last_seen = ?4,
                message_count = message_count + 1",
            params![user_id, username, first_name, timestamp],
        )
        .unwrap_or_else(|e| {
            warn!("Failed to upsert user: {e}");
            0
        });
    }

    /// Advance last_seen and the message count for an already-known user.
    /// Unknown users are left alone; only /start registers.
    pub fn touch_user(&self, user_id: i64, timestamp: &str) {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "UPDATE users SET last_seen = ?2, message_count = message_count + 1 WHERE user_id = ?1",
            params![user_id, timestamp],
        )
        .unwrap_or_else(|e| {
            warn!("Failed to touch user: {e}");
            0
        });
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, i64>(0))
            .unwrap_or(0) as usize
    }

    /// Look up a single user record.
    pub fn get_user(&self, user_id: i64) -> Option<UserRecord> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.query_row(
            "SELECT user_id, username, first_name, first_seen, last_seen, message_count
             FROM users WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok(UserRecord {
                    user_id: row.get(0)?,
                    username: row.get(1)?,
                    first_name: row.get(2)?,
                    first_seen: row.get(3)?,
                    last_seen: row.get(4)?,
                    message_count: row.get::<_, i64>(5)? as u32,
                })
            },
        )
        .ok()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
