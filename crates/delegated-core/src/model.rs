use thiserror::Error as ThisError;

///
/// ConfigError
///
/// Malformed role registration. The derive rejects these shapes at
/// declaration time with compile errors; this enum backs `validate` for
/// hand-built metadata and name parsing on generated kind enums.
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("role '{role}' must register at least one delegate type")]
    EmptyDelegateSet { role: &'static str },

    #[error("role '{role}' registers type name '{name}' more than once")]
    DuplicateTypeName { role: &'static str, name: String },

    #[error("role '{role}' derives scope name '{name}' more than once")]
    DuplicateScopeName { role: &'static str, name: String },

    #[error("role '{role}' has no registered type named '{name}'")]
    UnknownTypeName { role: &'static str, name: String },
}

///
/// DelegateModel
/// Registered variant descriptor for one permitted delegate type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DelegateModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Lower-cased type name stored as the discriminator.
    pub type_name: &'static str,
    /// Pluralized scope name generated on the base record.
    pub scope_name: &'static str,
}

///
/// RoleModel
///
/// Minimal, macro-generated registration metadata for one polymorphic
/// role. Written once at compile time and shared read-only by every
/// instance of the base record.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RoleModel {
    /// Role name; also the base record field holding the reference.
    pub role: &'static str,
    /// Foreign key column name (`<role>_id`).
    pub id_column: &'static str,
    /// Discriminator column name (`<role>_type`).
    pub type_column: &'static str,
    /// Ordered registered variants (order is declaration order).
    pub variants: &'static [DelegateModel],
}

impl RoleModel {
    /// The registered variant at a declaration index. Generated kind
    /// enums resolve their descriptors through this.
    #[must_use]
    pub const fn variant(&self, index: usize) -> &'static DelegateModel {
        &self.variants[index]
    }

    /// Look up the registered variant for a stored discriminator.
    /// Comparison is exact and case-sensitive.
    #[must_use]
    pub fn variant_for_name(&self, name: &str) -> Option<&'static DelegateModel> {
        self.variants.iter().find(|v| v.type_name == name)
    }

    /// Returns true if `name` is a registered discriminator for this role.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variant_for_name(name).is_some()
    }

    ///
    /// validate
    ///
    /// Structural checks for hand-built metadata: a non-empty variant set
    /// with distinct type names and distinct scope names. The derive
    /// enforces the same shape at declaration time.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variants.is_empty() {
            return Err(ConfigError::EmptyDelegateSet { role: self.role });
        }

        for (index, variant) in self.variants.iter().enumerate() {
            let earlier = &self.variants[..index];

            if earlier.iter().any(|v| v.type_name == variant.type_name) {
                return Err(ConfigError::DuplicateTypeName {
                    role: self.role,
                    name: variant.type_name.to_string(),
                });
            }
            if earlier.iter().any(|v| v.scope_name == variant.scope_name) {
                return Err(ConfigError::DuplicateScopeName {
                    role: self.role,
                    name: variant.scope_name.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: DelegateModel = DelegateModel {
        path: "fixtures::Message",
        type_name: "message",
        scope_name: "messages",
    };
    const COMMENT: DelegateModel = DelegateModel {
        path: "fixtures::Comment",
        type_name: "comment",
        scope_name: "comments",
    };

    const fn role_over(variants: &'static [DelegateModel]) -> RoleModel {
        RoleModel {
            role: "entryable",
            id_column: "entryable_id",
            type_column: "entryable_type",
            variants,
        }
    }

    #[test]
    fn valid_role_passes_validation() {
        role_over(&[MESSAGE, COMMENT]).validate().unwrap();
    }

    #[test]
    fn empty_delegate_set_is_rejected() {
        let err = role_over(&[]).validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::EmptyDelegateSet { role: "entryable" }
        ));
    }

    #[test]
    fn duplicate_type_name_is_rejected() {
        let err = role_over(&[MESSAGE, MESSAGE]).validate().unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateTypeName { name, .. } if name == "message"));
    }

    #[test]
    fn duplicate_scope_name_is_rejected() {
        const CLASH: DelegateModel = DelegateModel {
            path: "fixtures::OtherMessage",
            type_name: "other_message",
            scope_name: "messages",
        };

        let err = role_over(&[MESSAGE, CLASH]).validate().unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateScopeName { name, .. } if name == "messages"));
    }

    #[test]
    fn variant_lookup_is_exact_and_case_sensitive() {
        let role = role_over(&[MESSAGE, COMMENT]);

        assert_eq!(role.variant_for_name("message"), Some(&MESSAGE));
        assert!(role.variant_for_name("Message").is_none());
        assert!(role.variant_for_name("messages").is_none());
        assert!(!role.contains("post"));
    }
}
