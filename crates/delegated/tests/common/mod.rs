#![allow(dead_code)]

//! Shared models for the integration suites: the entry/message/comment
//! scenario plus a two-role record.

use delegated::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Entry
///

#[derive(Clone, Debug, Default, Delegated, Deserialize, Record, Serialize)]
#[delegated(role = "entryable", types(Message, Comment))]
pub struct Entry {
    pub id: RecordKey,
    pub entryable: Option<DelegateRef>,
    pub updated_at: Timestamp,
}

///
/// Message
///

#[derive(Clone, Debug, Default, Delegate, Deserialize, Record, Serialize)]
#[delegate(role = "entryable", owner = Entry, touch)]
pub struct Message {
    pub id: RecordKey,
    pub subject: String,
}

impl Message {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            id: RecordKey::UNSAVED,
            subject: subject.into(),
        }
    }
}

///
/// Comment
///

#[derive(Clone, Debug, Default, Delegate, Deserialize, Record, Serialize)]
#[delegate(role = "entryable", owner = Entry)]
pub struct Comment {
    pub id: RecordKey,
    pub body: String,
}

impl Comment {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: RecordKey::UNSAVED,
            body: body.into(),
        }
    }
}

///
/// Job
/// Two independent roles on one record.
///

#[derive(Clone, Debug, Default, Delegated, Deserialize, Record, Serialize)]
#[delegated(role = "attachable", types(Photo))]
#[delegated(role = "payable", types(Invoice))]
pub struct Job {
    pub id: RecordKey,
    pub attachable: Option<DelegateRef>,
    pub payable: Option<DelegateRef>,
}

///
/// Photo
///

#[derive(Clone, Debug, Default, Delegate, Deserialize, Record, Serialize)]
#[delegate(role = "attachable", owner = Job)]
pub struct Photo {
    pub id: RecordKey,
    pub url: String,
}

///
/// Invoice
///

#[derive(Clone, Debug, Default, Delegate, Deserialize, Record, Serialize)]
#[delegate(role = "payable", owner = Job)]
pub struct Invoice {
    pub id: RecordKey,
    pub amount: u64,
}

/// One entry attached to a message, one to a comment.
pub fn seeded() -> (Database, Entry, Entry) {
    let mut db = Database::new();

    let mut entry = Entry::default();
    entry
        .attach_entryable(&mut db, Message::new("Hello world!"))
        .unwrap();
    let key = db.insert(entry).unwrap();
    let with_message = db.get::<Entry>(key).unwrap().clone();

    let mut entry = Entry::default();
    entry
        .attach_entryable(&mut db, Comment::new("First comment"))
        .unwrap();
    let key = db.insert(entry).unwrap();
    let with_comment = db.get::<Entry>(key).unwrap().clone();

    (db, with_message, with_comment)
}
