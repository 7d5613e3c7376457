//! Numeric entity identifiers
//!
//! Every persisted board entity is keyed by a store-assigned `i64`. Each
//! entity gets its own newtype so a category id can never be passed where a
//! tile id is expected.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw identifier
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a registered user
    UserId
);
numeric_id!(
    /// Identifier of a child profile
    ProfileId
);
numeric_id!(
    /// Identifier of a tile category
    CategoryId
);
numeric_id!(
    /// Identifier of a word tile
    TileId
);
