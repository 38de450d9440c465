//! Record values mirroring the application tables
//!
//! Each table has a plain struct, and [`RecordCodecs`] maps a [`TableId`] to
//! the function that decodes one of its rows.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::models::TableId;

/// A row of the `User` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Stored password
    pub password: String,
}

/// A row of the `Thread` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Primary key
    pub id: i64,
    /// Unique thread title
    pub name: String,
    /// User who opened the thread
    pub creator_id: i64,
}

/// A row of the `ThreadMessage` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Primary key
    pub id: i64,
    /// Thread the message belongs to
    pub thread_id: i64,
    /// Author
    pub user_id: i64,
    /// Message body
    pub content: String,
}

/// A row from any application table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "table")]
pub enum Record {
    /// `User` row
    User(User),
    /// `Thread` row
    Thread(Thread),
    /// `ThreadMessage` row
    Message(Message),
}

impl Record {
    /// Table this record belongs to
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        match self {
            Self::User(_) => TableId::User,
            Self::Thread(_) => TableId::Thread,
            Self::Message(_) => TableId::ThreadMessage,
        }
    }

    /// Column values in table declaration order
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::User(u) => vec![
                Value::Integer(u.id),
                Value::Text(u.name.clone()),
                Value::Text(u.email.clone()),
                Value::Text(u.password.clone()),
            ],
            Self::Thread(t) => vec![
                Value::Integer(t.id),
                Value::Text(t.name.clone()),
                Value::Integer(t.creator_id),
            ],
            Self::Message(m) => vec![
                Value::Integer(m.id),
                Value::Integer(m.thread_id),
                Value::Integer(m.user_id),
                Value::Text(m.content.clone()),
            ],
        }
    }
}

/// Decodes one row of a specific table
pub type RowDecoder = fn(&Row<'_>) -> rusqlite::Result<Record>;

/// Row decoders keyed by table
#[derive(Debug, Clone)]
pub struct RecordCodecs {
    decoders: HashMap<TableId, RowDecoder>,
}

impl Default for RecordCodecs {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordCodecs {
    /// Register the decoders for every application table
    #[must_use]
    pub fn new() -> Self {
        let mut decoders: HashMap<TableId, RowDecoder> = HashMap::new();
        decoders.insert(TableId::User, decode_user);
        decoders.insert(TableId::Thread, decode_thread);
        decoders.insert(TableId::ThreadMessage, decode_message);
        Self { decoders }
    }

    /// Decoder for `table`, if one is registered
    #[must_use]
    pub fn decoder(&self, table: TableId) -> Option<RowDecoder> {
        self.decoders.get(&table).copied()
    }
}

fn decode_user(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record::User(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password: row.get("password")?,
    }))
}

fn decode_thread(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record::Thread(Thread {
        id: row.get("id")?,
        name: row.get("name")?,
        creator_id: row.get("creator_id")?,
    }))
}

fn decode_message(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record::Message(Message {
        id: row.get("id")?,
        thread_id: row.get("thread_id")?,
        user_id: row.get("user_id")?,
        content: row.get("content")?,
    }))
}

/// Seed data: one admin user, one thread, two messages
#[must_use]
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::User(User {
            id: 1,
            name: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin".to_string(),
        }),
        Record::Thread(Thread {
            id: 1,
            name: "test".to_string(),
            creator_id: 1,
        }),
        Record::Message(Message {
            id: 1,
            thread_id: 1,
            user_id: 1,
            content: "first message".to_string(),
        }),
        Record::Message(Message {
            id: 2,
            thread_id: 1,
            user_id: 1,
            content: "second message".to_string(),
        }),
    ]
}
