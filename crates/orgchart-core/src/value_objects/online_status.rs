//! Online status - the three-valued presence state shown on the org chart

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Connectivity state of an employee as seen through the chat homeserver.
///
/// Wire values are exactly `online`, `offline` and `unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Online,
    Offline,
    /// Unknown, unreachable, or anything the homeserver reports that is
    /// neither online nor offline
    #[default]
    Unavailable,
}

impl OnlineStatus {
    /// Map a raw homeserver presence string onto the three-valued status.
    ///
    /// Anything other than `online` or `offline`, including a missing value,
    /// maps to `Unavailable`.
    #[must_use]
    pub fn from_presence(presence: Option<&str>) -> Self {
        match presence {
            Some("online") => Self::Online,
            Some("offline") => Self::Offline,
            _ => Self::Unavailable,
        }
    }

    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid online status: {0}")]
pub struct OnlineStatusParseError(pub String);

impl FromStr for OnlineStatus {
    type Err = OnlineStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(OnlineStatusParseError(s.to_string())),
        }
    }
}
