//! Personal access token scopes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use secretlink_core::AppError;

/// Permission granted to a personal access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// List link status.
    #[serde(rename = "links:read")]
    LinksRead,
    /// Create links in bulk.
    #[serde(rename = "links:write")]
    LinksWrite,
    /// Delete links.
    #[serde(rename = "links:delete")]
    LinksDelete,
}

impl Scope {
    /// Every scope, granted by default to new tokens.
    pub const ALL: [Scope; 3] = [Self::LinksRead, Self::LinksWrite, Self::LinksDelete];

    /// Return the scope as stored and sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinksRead => "links:read",
            Self::LinksWrite => "links:write",
            Self::LinksDelete => "links:delete",
        }
    }

    /// Parse a list of scope strings, rejecting unknown entries.
    ///
    /// Duplicates are collapsed and the result is sorted.
    pub fn parse_list<S: AsRef<str>>(values: &[S]) -> Result<Vec<Scope>, AppError> {
        let mut scopes = values
            .iter()
            .map(|v| v.as_ref().parse())
            .collect::<Result<Vec<Scope>, _>>()?;
        scopes.sort();
        scopes.dedup();
        Ok(scopes)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "links:read" => Ok(Self::LinksRead),
            "links:write" => Ok(Self::LinksWrite),
            "links:delete" => Ok(Self::LinksDelete),
            _ => Err(AppError::validation(format!(
                "Invalid scope: '{s}'. Expected one of: links:read, links:write, links:delete"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_scopes() {
        assert_eq!("links:read".parse::<Scope>().unwrap(), Scope::LinksRead);
        assert_eq!(" links:delete ".parse::<Scope>().unwrap(), Scope::LinksDelete);
    }

    #[test]
    fn test_unknown_scope_is_validation_error() {
        let err = "links:admin".parse::<Scope>().unwrap_err();
        assert_eq!(err.kind, secretlink_core::ErrorKind::Validation);
        assert!("read".parse::<Scope>().is_err());
    }

    #[test]
    fn test_parse_list_dedups_and_sorts() {
        let scopes = Scope::parse_list(&["links:delete", "links:read", "links:delete"]).unwrap();
        assert_eq!(scopes, vec![Scope::LinksRead, Scope::LinksDelete]);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Scope::ALL).unwrap();
        assert_eq!(json, r#"["links:read","links:write","links:delete"]"#);
    }
}
