use crate::oauth2::{ExternalProfile, NewLinkedIdentity, OAuth2Error};
use crate::session::TokenPair;
use crate::userdb::{NewUser, Role, User, UserError};

use super::IdentityCoordinator;
use super::errors::CoordinationError;

impl IdentityCoordinator {
    /// Complete an OAuth2 authorization-code login: exchange the code,
    /// fetch the provider profile, reconcile it to a local account, and
    /// issue a token pair.
    pub async fn handle_external_login(
        &self,
        code: &str,
    ) -> Result<(User, TokenPair), CoordinationError> {
        let access_token = self.google.exchange_code(code).await?;
        let profile = self.google.fetch_profile(&access_token).await?;

        let user = self.reconcile_external_profile(&profile).await?;
        let tokens = self.tokens.issue_pair(user.id, user.role)?;

        Ok((user, tokens))
    }

    /// Reconcile a fetched provider profile to a local account.
    ///
    /// An existing `(provider, provider_user_id)` link always wins; an
    /// email match is treated as the same person and the missing link is
    /// created to converge state; auto-provisioning is the fallback of
    /// last resort.
    pub async fn reconcile_external_profile(
        &self,
        profile: &ExternalProfile,
    ) -> Result<User, CoordinationError> {
        if let Some(link) = self
            .identities
            .find_by_provider(&profile.provider, &profile.provider_user_id)
            .await?
        {
            tracing::debug!("Signing in via existing {} link", profile.provider);
            // A link without its user means the store lost integrity.
            return self
                .users
                .get_user(link.user_id)
                .await?
                .ok_or_else(|| CoordinationError::User(UserError::NotFound).log());
        }

        if let Some(user) = self.users.get_user_by_email(&profile.email).await? {
            tracing::debug!(
                "Linking {} identity to existing account by email",
                profile.provider
            );
            self.link_identity(user.id, profile).await?;
            return Ok(user);
        }

        let new_user = NewUser {
            email: profile.email.clone(),
            password_hash: String::new(),
            name: profile.display_name(),
            role: Role::User,
        };
        let user = match self.users.create_user(new_user).await {
            Ok(user) => {
                tracing::info!(
                    "Provisioned user {} from {} profile",
                    user.id,
                    profile.provider
                );
                user
            }
            // A concurrent login provisioned the same email first; use the
            // record that won.
            Err(UserError::Constraint(_)) => self
                .users
                .get_user_by_email(&profile.email)
                .await?
                .ok_or_else(|| CoordinationError::User(UserError::NotFound).log())?,
            Err(e) => return Err(e.into()),
        };

        self.link_identity(user.id, profile).await?;
        Ok(user)
    }

    async fn link_identity(
        &self,
        user_id: i64,
        profile: &ExternalProfile,
    ) -> Result<(), CoordinationError> {
        let new_identity = NewLinkedIdentity {
            user_id,
            provider: profile.provider.clone(),
            provider_user_id: profile.provider_user_id.clone(),
        };
        match self.identities.create(new_identity).await {
            Ok(_) => Ok(()),
            // A concurrent request created the same link; state has already
            // converged.
            Err(OAuth2Error::Constraint(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_coordinator;

    fn google_profile(subject: &str, email: &str) -> ExternalProfile {
        ExternalProfile {
            provider: "google".to_string(),
            provider_user_id: subject.to_string(),
            email: email.to_string(),
            given_name: "A".to_string(),
            family_name: "B".to_string(),
        }
    }

    #[tokio::test]
    async fn test_auto_provision_new_user() {
        let coordinator = test_coordinator().await;
        let profile = google_profile("g123", "a@x.com");

        let user = coordinator
            .reconcile_external_profile(&profile)
            .await
            .expect("reconcile");
        assert_eq!(user.name, "A B");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.role, Role::User);
        assert!(!user.has_password());

        let link = coordinator
            .identities
            .find_by_provider("google", "g123")
            .await
            .expect("lookup")
            .expect("link created");
        assert_eq!(link.user_id, user.id);
    }

    #[tokio::test]
    async fn test_repeat_reconciliation_is_idempotent() {
        let coordinator = test_coordinator().await;
        let profile = google_profile("g123", "a@x.com");

        let first = coordinator
            .reconcile_external_profile(&profile)
            .await
            .expect("first");
        let second = coordinator
            .reconcile_external_profile(&profile)
            .await
            .expect("second");

        assert_eq!(first.id, second.id);
        let links = coordinator
            .identities
            .find_by_user(first.id)
            .await
            .expect("list links");
        assert_eq!(links.len(), 1, "no duplicate link may be created");
    }

    #[tokio::test]
    async fn test_email_match_creates_missing_link() {
        let coordinator = test_coordinator().await;
        let registered = coordinator
            .register("Ada", "ada@example.com", "localpass")
            .await
            .expect("register");

        let profile = google_profile("g777", "ada@example.com");
        let reconciled = coordinator
            .reconcile_external_profile(&profile)
            .await
            .expect("reconcile");
        assert_eq!(reconciled.id, registered.id);

        let link = coordinator
            .identities
            .find_by_provider("google", "g777")
            .await
            .expect("lookup")
            .expect("link converged");
        assert_eq!(link.user_id, registered.id);

        // The local password is untouched.
        coordinator
            .authenticate("ada@example.com", "localpass")
            .await
            .expect("local login still works");
    }

    #[tokio::test]
    async fn test_link_match_wins_over_email_match() {
        let coordinator = test_coordinator().await;

        // Provision an external-only user whose provider subject is bound.
        let bound = coordinator
            .reconcile_external_profile(&google_profile("g123", "old@x.com"))
            .await
            .expect("provision");

        // A different local user now owns the email the provider reports.
        coordinator
            .register("Eve", "new@x.com", "pass")
            .await
            .expect("register");

        // The provider subject still resolves to the bound user, not the
        // email match.
        let resolved = coordinator
            .reconcile_external_profile(&google_profile("g123", "new@x.com"))
            .await
            .expect("reconcile");
        assert_eq!(resolved.id, bound.id);
    }

    #[tokio::test]
    async fn test_external_only_account_has_no_local_login() {
        let coordinator = test_coordinator().await;
        coordinator
            .reconcile_external_profile(&google_profile("g123", "a@x.com"))
            .await
            .expect("provision");

        let err = coordinator
            .authenticate("a@x.com", "")
            .await
            .expect_err("empty password must not authenticate");
        assert!(matches!(err, CoordinationError::InvalidCredentials));
    }
}
