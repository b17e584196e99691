//! Typed record ids
//!
//! Each stored record gets its own id type so a `BankId` cannot be handed to
//! a project lookup. JSON carries the bare UUID; `Display` prefixes it with a
//! short tag (`GL-…`, `BNK-…`) so log lines say what kind of record they name.
//! Parsing accepts either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident => $tag:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Short tag shown in front of the UUID by `Display`
            pub const TAG: &'static str = $tag;

            /// Allocates a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::TAG, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let bare = s
                    .strip_prefix(Self::TAG)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

record_id!(ProjectId => "PRJ");
record_id!(BankId => "BNK");
record_id!(CurrencyId => "CUR");
record_id!(
    /// One stored conversion rate for an ordered currency pair
    ExchangeRateId => "FXR"
);
record_id!(LetterId => "GL");
record_id!(
    /// A commission payment made against a guarantee letter
    LetterPaymentId => "LPY"
);
record_id!(CreditId => "CRD");
