use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Declares a server-assigned string identifier.
///
/// OnCall ids are opaque public primary keys such as `CFRPV98RPR1U8`; the
/// client never generates them, it only echoes what the server returned.
macro_rules! public_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(ModelError::EmptyId($kind));
                }
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

public_id!(
    /// Identifier of an integration (`AlertReceiveChannel`).
    AlertReceiveChannelId,
    "alert receive channel"
);

public_id!(
    /// Identifier of a routing rule (`ChannelFilter`).
    ChannelFilterId,
    "channel filter"
);

public_id!(
    /// Identifier of an integration heartbeat.
    HeartbeatId,
    "heartbeat"
);

public_id!(AlertGroupId, "alert group");
