//! Domain enumerations.
//!
//! Every enumeration is declared once through [`seed_enum!`], which acts as
//! the ordinal table: the integer written next to each variant is the value
//! stored in the database lookup tables, and the string is its canonical name.
//! Conversions in both directions are derived from that single table, so an
//! unknown name or ordinal is an error instead of a silent default.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for enumeration conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
    /// No variant carries the given ordinal
    #[error("Unknown {enum_name} id: {id}")]
    UnknownId { enum_name: &'static str, id: i32 },

    /// No variant carries the given name
    #[error("Unknown {enum_name} name: '{name}'")]
    UnknownName {
        enum_name: &'static str,
        name: String,
    },
}

// ============================================================================
// Shared Behaviour
// ============================================================================

/// Behaviour shared by every domain enumeration.
pub trait SeedEnum: Copy + Eq + 'static {
    /// Name of the enumeration, used in error messages.
    const NAME: &'static str;

    /// All variants, ordered by ordinal.
    fn variants() -> &'static [Self];

    /// Canonical string form.
    fn as_str(&self) -> &'static str;

    /// Stable 1-based ordinal used as the database foreign-key value.
    fn id(&self) -> i32;

    /// Look up a variant by ordinal.
    fn from_id(id: i32) -> Result<Self, EnumError> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.id() == id)
            .ok_or(EnumError::UnknownId {
                enum_name: Self::NAME,
                id,
            })
    }

    /// Look up a variant by canonical name.
    fn from_name(name: &str) -> Result<Self, EnumError> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.as_str() == name)
            .ok_or_else(|| EnumError::UnknownName {
                enum_name: Self::NAME,
                name: name.to_string(),
            })
    }
}

macro_rules! seed_enum {
    (
        $(#[$meta:meta])*
        $name:ident = $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($id:literal, $text:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants, ordered by ordinal.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl SeedEnum for $name {
            const NAME: &'static str = $label;

            fn variants() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn id(&self) -> i32 {
                match self {
                    $( $name::$variant => $id ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = EnumError;

            fn try_from(id: i32) -> Result<Self, Self::Error> {
                Self::from_id(id)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                Self::from_name(&name).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ============================================================================
// Ordinal Tables
// ============================================================================

seed_enum! {
    /// Site-wide role of an account.
    AccountRole = "account role" {
        User => (1, "user"),
        Moderator => (2, "moderator"),
        Admin => (3, "admin"),
        Super => (4, "super"),
    }
}

impl AccountRole {
    /// Whether the role may author articles.
    pub fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin | AccountRole::Super)
    }
}

seed_enum! {
    /// Lifecycle status of an account.
    AccountStatus = "account status" {
        Active => (1, "active"),
        Inactive => (2, "inactive"),
        Suspended => (3, "suspended"),
        Banned => (4, "banned"),
    }
}

seed_enum! {
    /// Editorial status of an article.
    ArticleStatus = "article status" {
        Draft => (1, "draft"),
        Review => (2, "review"),
        Published => (3, "published"),
        Archived => (4, "archived"),
        Retracted => (5, "retracted"),
    }
}

seed_enum! {
    /// Status of a thread.
    ThreadStatus = "thread status" {
        Open => (1, "open"),
        Closed => (2, "closed"),
        Archived => (3, "archived"),
        Removed => (4, "removed"),
    }
}

seed_enum! {
    /// Role an identity holds inside its thread.
    ThreadRole = "thread role" {
        User => (1, "user"),
        Moderator => (2, "moderator"),
        Creator => (3, "creator"),
    }
}

seed_enum! {
    /// Status of a per-thread identity.
    IdentityStatus = "identity status" {
        Active => (1, "active"),
        Inactive => (2, "inactive"),
        Suspended => (3, "suspended"),
        Banned => (4, "banned"),
    }
}

seed_enum! {
    /// Display style of a per-thread identity.
    IdentityStyle = "identity style" {
        FilledPrimary => (1, "ids-filled-primary"),
        FilledSecondary => (2, "ids-filled-secondary"),
        FilledTertiary => (3, "ids-filled-tertiary"),
        FilledSuccess => (4, "ids-filled-success"),
        FilledWarning => (5, "ids-filled-warning"),
        FilledError => (6, "ids-filled-error"),
        FilledSurface => (7, "ids-filled-surface"),
        GhostPrimary => (8, "ids-ghost-primary"),
        GhostSecondary => (9, "ids-ghost-secondary"),
        GhostTertiary => (10, "ids-ghost-tertiary"),
        GhostSuccess => (11, "ids-ghost-success"),
        GhostWarning => (12, "ids-ghost-warning"),
        GhostError => (13, "ids-ghost-error"),
        GhostSurface => (14, "ids-ghost-surface"),
        SoftPrimary => (15, "ids-soft-primary"),
        SoftSecondary => (16, "ids-soft-secondary"),
        SoftTertiary => (17, "ids-soft-tertiary"),
        SoftSuccess => (18, "ids-soft-success"),
        SoftWarning => (19, "ids-soft-warning"),
        SoftError => (20, "ids-soft-error"),
        SoftSurface => (21, "ids-soft-surface"),
        GlassPrimary => (22, "ids-glass-primary"),
        GlassSecondary => (23, "ids-glass-secondary"),
        GlassTertiary => (24, "ids-glass-tertiary"),
        GlassSuccess => (25, "ids-glass-success"),
        GlassWarning => (26, "ids-glass-warning"),
        GlassError => (27, "ids-glass-error"),
        GlassSurface => (28, "ids-glass-surface"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<E: SeedEnum + fmt::Debug + FromStr<Err = EnumError>>() {
        for (position, variant) in E::variants().iter().enumerate() {
            // Ordinals are 1-based and sequential
            assert_eq!(variant.id(), position as i32 + 1, "{variant:?}");
            assert_eq!(E::from_id(variant.id()).unwrap(), *variant);

            let parsed: E = variant.as_str().parse().unwrap();
            assert_eq!(parsed, *variant);
            assert_eq!(parsed.id(), variant.id());
        }
    }

    #[test]
    fn test_round_trip_all_enums() {
        assert_round_trip::<AccountRole>();
        assert_round_trip::<AccountStatus>();
        assert_round_trip::<ArticleStatus>();
        assert_round_trip::<ThreadStatus>();
        assert_round_trip::<ThreadRole>();
        assert_round_trip::<IdentityStatus>();
        assert_round_trip::<IdentityStyle>();
    }

    #[test]
    fn test_variant_counts() {
        assert_eq!(AccountRole::ALL.len(), 4);
        assert_eq!(ArticleStatus::ALL.len(), 5);
        assert_eq!(ThreadRole::ALL.len(), 3);
        assert_eq!(IdentityStyle::ALL.len(), 28);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        assert_eq!(
            AccountRole::from_id(0),
            Err(EnumError::UnknownId {
                enum_name: "account role",
                id: 0
            })
        );
        assert!(ThreadRole::try_from(4).is_err());
        assert!(IdentityStyle::try_from(29).is_err());
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = "owner".parse::<AccountRole>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown account role name: 'owner'");
        // Names are case-sensitive
        assert!("Admin".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_admin_roles() {
        assert!(AccountRole::Super.is_admin());
        assert!(AccountRole::Admin.is_admin());
        assert!(!AccountRole::Moderator.is_admin());
        assert!(!AccountRole::User.is_admin());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&IdentityStyle::GlassError).unwrap();
        assert_eq!(json, "\"ids-glass-error\"");

        let role: AccountRole = serde_yaml::from_str("super").unwrap();
        assert_eq!(role, AccountRole::Super);

        assert!(serde_yaml::from_str::<ThreadStatus>("locked").is_err());
    }
}
