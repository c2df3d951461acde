use crate::{traits::Delegate, types::RecordKey};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// DelegateRef
///
/// The stored polymorphic reference: discriminator plus foreign key,
/// always present together. A base record keeps one `Option<DelegateRef>`
/// per role, so "both set or both absent" holds structurally.
///
/// Serializes as `{"type": <name>, "id": <key>}` under the role's field.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DelegateRef {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(rename = "id")]
    key: RecordKey,
}

impl DelegateRef {
    #[must_use]
    pub fn new(type_name: impl Into<String>, key: RecordKey) -> Self {
        Self {
            type_name: type_name.into(),
            key,
        }
    }

    /// Build a reference to an already-persisted delegate row.
    #[must_use]
    pub fn to<D: Delegate>(row: &D) -> Self {
        Self::new(D::TYPE_NAME, row.key())
    }

    /// The stored discriminator string.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The stored foreign key.
    #[must_use]
    pub const fn key(&self) -> RecordKey {
        self.key
    }

    /// Returns true if the discriminator names `D` exactly.
    #[must_use]
    pub fn points_to<D: Delegate>(&self) -> bool {
        self.type_name == D::TYPE_NAME
    }

    /// The foreign key, narrowed to `D`: `Some` iff the discriminator
    /// matches, the routine absent value otherwise.
    #[must_use]
    pub fn key_for<D: Delegate>(&self) -> Option<RecordKey> {
        self.points_to::<D>().then_some(self.key)
    }
}

impl fmt::Display for DelegateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{Comment, Message};

    #[test]
    fn narrowing_follows_the_discriminator() {
        let reference = DelegateRef::new("message", RecordKey::new(7));

        assert!(reference.points_to::<Message>());
        assert!(!reference.points_to::<Comment>());
        assert_eq!(reference.key_for::<Message>(), Some(RecordKey::new(7)));
        assert_eq!(reference.key_for::<Comment>(), None);
    }

    #[test]
    fn discriminator_match_is_case_sensitive() {
        let reference = DelegateRef::new("Message", RecordKey::new(1));

        assert!(!reference.points_to::<Message>());
    }

    #[test]
    fn serializes_as_type_and_id_columns() {
        let reference = DelegateRef::new("comment", RecordKey::new(3));
        let json = serde_json::to_value(&reference).unwrap();

        assert_eq!(json, serde_json::json!({"type": "comment", "id": 3}));

        let back: DelegateRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn to_references_a_saved_row() {
        let mut message = Message::new("saved");
        message.id = RecordKey::new(4);

        let reference = DelegateRef::to(&message);
        assert_eq!(reference.type_name(), "message");
        assert_eq!(reference.key(), RecordKey::new(4));
    }

    #[test]
    fn displays_as_name_and_key() {
        let reference = DelegateRef::new("message", RecordKey::new(12));

        assert_eq!(reference.to_string(), "message#12");
    }
}
