//! Link ownership.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Who owns a link.
///
/// Anonymous links are persisted with a `NULL` owner column, so no real
/// account id can ever collide with the anonymous case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum LinkOwner {
    /// Created through the public endpoint without credentials.
    Anonymous,
    /// Owned by a registered account.
    User(UserId),
}

impl LinkOwner {
    /// Build from the nullable owner column.
    pub fn from_column(value: Option<UserId>) -> Self {
        match value {
            Some(id) => Self::User(id),
            None => Self::Anonymous,
        }
    }

    /// Value to bind into the nullable owner column.
    pub fn to_column(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }

    /// The owning account, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.to_column()
    }

    /// Returns `true` for anonymous links.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Returns `true` when `user` owns this link.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        matches!(self, Self::User(id) if *id == user)
    }
}

impl fmt::Display for LinkOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::User(id) => write!(f, "{id}"),
        }
    }
}
