//! Random resolution of domain enumerations.
//!
//! Each enumeration carries a fixed weight table and is drawn through the
//! weighted picker. Identity styles are the exception: every style is equally
//! likely.

use crate::random::pick_weighted;
use rand::seq::IndexedRandom;
use rand::Rng;
use seed_core::{
    AccountRole, AccountStatus, ArticleStatus, IdentityStatus, IdentityStyle, SeedEnum,
    ThreadRole, ThreadStatus,
};

/// Enumerations that can be drawn at random.
pub trait RandomVariant: SeedEnum {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

/// Enumerations drawn from a fixed weight table.
pub trait WeightedVariant: SeedEnum {
    /// Relative likelihood of each variant. Variants absent from the table
    /// are never drawn.
    const WEIGHTS: &'static [(Self, u32)];
}

macro_rules! weighted_variant {
    ($name:ident { $( $variant:ident => $weight:literal ),+ $(,)? }) => {
        impl WeightedVariant for $name {
            const WEIGHTS: &'static [(Self, u32)] = &[ $( ($name::$variant, $weight) ),+ ];
        }

        impl RandomVariant for $name {
            fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                pick_weighted(rng, Self::WEIGHTS)
                    .copied()
                    .unwrap_or(Self::WEIGHTS[0].0)
            }
        }
    };
}

// Admin and super roles only come from the fixed seed accounts.
weighted_variant!(AccountRole {
    User => 93,
    Moderator => 7,
});

weighted_variant!(AccountStatus {
    Active => 80,
    Inactive => 12,
    Suspended => 5,
    Banned => 3,
});

weighted_variant!(ArticleStatus {
    Draft => 10,
    Review => 10,
    Published => 65,
    Archived => 10,
    Retracted => 5,
});

weighted_variant!(ThreadStatus {
    Open => 75,
    Closed => 12,
    Archived => 10,
    Removed => 3,
});

// Creator is assigned explicitly to the identity that opens a thread.
weighted_variant!(ThreadRole {
    User => 95,
    Moderator => 5,
});

weighted_variant!(IdentityStatus {
    Active => 85,
    Inactive => 8,
    Suspended => 5,
    Banned => 2,
});

impl RandomVariant for IdentityStyle {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        IdentityStyle::ALL
            .choose(rng)
            .copied()
            .unwrap_or(IdentityStyle::FilledPrimary)
    }
}
