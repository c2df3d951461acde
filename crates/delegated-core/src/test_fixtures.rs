//! Hand-built fixture records for core tests.
//!
//! These implement the capability traits directly, bypassing the derive
//! macros; the generated path is exercised by the facade's integration
//! suite. Prefer these when a test needs to bend the rules (unregistered
//! discriminators, hand-rolled metadata).

use crate::{
    model::{DelegateModel, RoleModel},
    reference::DelegateRef,
    traits::{Delegate, Delegated, Path, Record},
    types::{RecordKey, Timestamp},
};
use serde::{Deserialize, Serialize};

///
/// Entry
/// Base record with one `entryable` role over { Message, Comment }.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Entry {
    pub id: RecordKey,
    pub entryable: Option<DelegateRef>,
    pub updated_at: Timestamp,
}

impl Entry {
    pub(crate) const ENTRYABLE_VARIANTS: [DelegateModel; 2] = [
        DelegateModel {
            path: Message::PATH,
            type_name: "message",
            scope_name: "messages",
        },
        DelegateModel {
            path: Comment::PATH,
            type_name: "comment",
            scope_name: "comments",
        },
    ];

    pub(crate) const ENTRYABLE_ROLE: RoleModel = RoleModel {
        role: "entryable",
        id_column: "entryable_id",
        type_column: "entryable_type",
        variants: &Self::ENTRYABLE_VARIANTS,
    };

    pub(crate) fn entryable(&self) -> Option<&DelegateRef> {
        self.entryable.as_ref()
    }
}

impl Path for Entry {
    const PATH: &'static str = "test_fixtures::Entry";
}

impl Record for Entry {
    const RECORD_NAME: &'static str = "Entry";

    fn key(&self) -> RecordKey {
        self.id
    }

    fn set_key(&mut self, key: RecordKey) {
        self.id = key;
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }
}

impl Delegated for Entry {
    const ROLES: &'static [&'static RoleModel] = &[&Self::ENTRYABLE_ROLE];
}

///
/// Message
/// Delegate with `touch` declared, so saves bump the owning entry.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Message {
    pub id: RecordKey,
    pub subject: String,
}

impl Message {
    pub(crate) fn new(subject: impl Into<String>) -> Self {
        Self {
            id: RecordKey::UNSAVED,
            subject: subject.into(),
        }
    }
}

impl Path for Message {
    const PATH: &'static str = "test_fixtures::Message";
}

impl Record for Message {
    const RECORD_NAME: &'static str = "Message";

    fn key(&self) -> RecordKey {
        self.id
    }

    fn set_key(&mut self, key: RecordKey) {
        self.id = key;
    }
}

impl Delegate for Message {
    type Owner = Entry;

    const TYPE_NAME: &'static str = "message";
    const ROLE: &'static str = "entryable";
    const TOUCH: bool = true;
}

///
/// Comment
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Comment {
    pub id: RecordKey,
    pub body: String,
}

impl Comment {
    pub(crate) fn new(body: impl Into<String>) -> Self {
        Self {
            id: RecordKey::UNSAVED,
            body: body.into(),
        }
    }
}

impl Path for Comment {
    const PATH: &'static str = "test_fixtures::Comment";
}

impl Record for Comment {
    const RECORD_NAME: &'static str = "Comment";

    fn key(&self) -> RecordKey {
        self.id
    }

    fn set_key(&mut self, key: RecordKey) {
        self.id = key;
    }
}

impl Delegate for Comment {
    type Owner = Entry;

    const TYPE_NAME: &'static str = "comment";
    const ROLE: &'static str = "entryable";
}
