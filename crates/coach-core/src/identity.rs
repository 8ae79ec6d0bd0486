//! Current-user identity.

use async_trait::async_trait;

use crate::error::IdentityError;

/// The authenticated user a session acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable id every entity record is scoped to.
    pub id: String,
    /// Full display name (may be empty).
    pub display_name: String,
    pub email: String,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// First word of the display name, if there is one.
    pub fn first_name(&self) -> Option<&str> {
        self.display_name.split_whitespace().next()
    }
}

/// Resolves who is signed in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn who_am_i(&self) -> Result<Identity, IdentityError>;
}

/// An identity provider that always answers with the same user.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    identity: Identity,
}

impl StaticIdentity {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn who_am_i(&self) -> Result<Identity, IdentityError> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let identity = Identity::new("u1", "Maya  Lopez", "maya@example.com");
        assert_eq!(identity.first_name(), Some("Maya"));

        let anonymous = Identity::new("u2", "  ", "anon@example.com");
        assert_eq!(anonymous.first_name(), None);
    }

    #[tokio::test]
    async fn test_static_identity() {
        let provider = StaticIdentity::new(Identity::new("u1", "Maya", "maya@example.com"));
        let identity = provider.who_am_i().await.unwrap();
        assert_eq!(identity.id, "u1");
    }
}
