//! Resolved caller identity.

use std::fmt;

use secretlink_core::error::AppError;
use secretlink_core::types::{ApiTokenId, UserId};
use secretlink_entity::token::Scope;

/// Credential path that authenticated a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Browser session cookie.
    Session,
    /// Bearer personal access token.
    Pat,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Pat => write!(f, "pat"),
        }
    }
}

/// Who is calling, and with which permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No credential resolved.
    Anonymous,
    /// Browser session; never scope-limited.
    Session { user_id: UserId },
    /// Personal access token and the scopes it grants.
    Pat {
        user_id: UserId,
        token_id: ApiTokenId,
        scopes: Vec<Scope>,
    },
}

impl Identity {
    /// Credential path, if any.
    pub fn method(&self) -> Option<AuthMethod> {
        match self {
            Self::Anonymous => None,
            Self::Session { .. } => Some(AuthMethod::Session),
            Self::Pat { .. } => Some(AuthMethod::Pat),
        }
    }

    /// Authenticated user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Session { user_id } | Self::Pat { user_id, .. } => Some(*user_id),
        }
    }

    /// Whether this identity holds `scope`. Sessions hold every scope.
    pub fn has_scope(&self, scope: Scope) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Session { .. } => true,
            Self::Pat { scopes, .. } => scopes.contains(&scope),
        }
    }

    /// Check access and return the authenticated user.
    ///
    /// Fails closed: no identity is `UNAUTHORIZED`; a method outside
    /// `methods`, or a token missing any of `scopes`, is `FORBIDDEN`.
    pub fn require(&self, methods: &[AuthMethod], scopes: &[Scope]) -> Result<UserId, AppError> {
        let (Some(method), Some(user_id)) = (self.method(), self.user_id()) else {
            return Err(AppError::unauthorized("Authentication required"));
        };

        if !methods.contains(&method) {
            let allowed: Vec<String> = methods.iter().map(ToString::to_string).collect();
            return Err(AppError::forbidden(format!(
                "This endpoint requires {} authentication",
                allowed.join(" or ")
            )));
        }

        let missing: Vec<&str> = scopes
            .iter()
            .filter(|s| !self.has_scope(**s))
            .map(|s| s.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::forbidden(format!(
                "Missing required scopes: {}",
                missing.join(", ")
            )));
        }

        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use secretlink_core::ErrorKind;

    use super::*;

    const BOTH: &[AuthMethod] = &[AuthMethod::Session, AuthMethod::Pat];
    const SESSION_ONLY: &[AuthMethod] = &[AuthMethod::Session];

    fn pat(scopes: &[Scope]) -> Identity {
        Identity::Pat {
            user_id: UserId::new(),
            token_id: ApiTokenId::new(),
            scopes: scopes.to_vec(),
        }
    }

    fn kind(result: Result<UserId, AppError>) -> Option<ErrorKind> {
        result.err().map(|e| e.kind)
    }

    #[test]
    fn test_anonymous_is_unauthorized() {
        assert_eq!(
            kind(Identity::Anonymous.require(BOTH, &[])),
            Some(ErrorKind::Unauthorized)
        );
        assert_eq!(
            kind(Identity::Anonymous.require(SESSION_ONLY, &[Scope::LinksRead])),
            Some(ErrorKind::Unauthorized)
        );
    }

    #[test]
    fn test_session_bypasses_scopes() {
        let user = UserId::new();
        let session = Identity::Session { user_id: user };
        assert_eq!(session.require(BOTH, &Scope::ALL).unwrap(), user);
        assert_eq!(session.require(SESSION_ONLY, &[]).unwrap(), user);
    }

    #[test]
    fn test_pat_on_session_only_endpoint_is_forbidden() {
        assert_eq!(
            kind(pat(&Scope::ALL).require(SESSION_ONLY, &[])),
            Some(ErrorKind::Forbidden)
        );
    }

    #[test]
    fn test_pat_scope_matrix() {
        let read_only = pat(&[Scope::LinksRead]);
        assert!(read_only.require(BOTH, &[Scope::LinksRead]).is_ok());
        assert_eq!(
            kind(read_only.require(BOTH, &[Scope::LinksWrite])),
            Some(ErrorKind::Forbidden)
        );
        assert_eq!(
            kind(read_only.require(BOTH, &[Scope::LinksDelete])),
            Some(ErrorKind::Forbidden)
        );

        let write_delete = pat(&[Scope::LinksWrite, Scope::LinksDelete]);
        assert!(write_delete.require(BOTH, &[Scope::LinksWrite]).is_ok());
        assert!(
            write_delete
                .require(BOTH, &[Scope::LinksWrite, Scope::LinksDelete])
                .is_ok()
        );
        assert_eq!(
            kind(write_delete.require(BOTH, &[Scope::LinksRead, Scope::LinksWrite])),
            Some(ErrorKind::Forbidden)
        );
    }

    #[test]
    fn test_pat_without_scopes_only_passes_unscoped_checks() {
        let empty = pat(&[]);
        assert!(empty.require(BOTH, &[]).is_ok());
        assert!(empty.require(BOTH, &[Scope::LinksRead]).is_err());
    }
}
