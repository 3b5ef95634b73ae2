use chrono::Utc;

use crate::password::{hash_password, verify_password};
use crate::session::TokenPair;
use crate::userdb::{NewUser, Role, User, UserError};

use super::IdentityCoordinator;
use super::errors::CoordinationError;

impl IdentityCoordinator {
    /// Register a new local account with role `user`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, CoordinationError> {
        self.create_with_role(name, email, password, Role::User)
            .await
    }

    /// Register an account with role `admin`.
    ///
    /// The coordinator does not check caller privilege; guarding this
    /// operation is the transport layer's responsibility.
    pub async fn create_super_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, CoordinationError> {
        self.create_with_role(name, email, password, Role::Admin)
            .await
    }

    async fn create_with_role(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, CoordinationError> {
        if self.users.email_exists(email).await? {
            return Err(CoordinationError::DuplicateEmail.log());
        }

        let password_hash = hash_password(password)?;

        let new_user = NewUser {
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
            role,
        };
        match self.users.create_user(new_user).await {
            Ok(user) => {
                tracing::info!("Registered user {} with role {}", user.id, role.as_str());
                Ok(user)
            }
            // Two concurrent registrations can both pass the pre-check; the
            // unique constraint on email is the authoritative guard.
            Err(UserError::Constraint(_)) => Err(CoordinationError::DuplicateEmail.log()),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify a local credential.
    ///
    /// An unknown email and a wrong password produce the same failure, so
    /// the caller cannot probe which emails are registered. On success the
    /// user's `last_login` is stamped.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, CoordinationError> {
        let Some(user) = self.users.get_user_by_email(email).await? else {
            return Err(CoordinationError::InvalidCredentials.log());
        };

        // An empty stored hash (external-only account) verifies false.
        if !verify_password(password, &user.password_hash) {
            return Err(CoordinationError::InvalidCredentials.log());
        }

        let now = Utc::now();
        self.users.update_last_login(user.id, now).await?;

        Ok(User {
            last_login: Some(now),
            ..user
        })
    }

    /// Authenticate and issue an access/refresh token pair.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, TokenPair), CoordinationError> {
        let user = self.authenticate(email, password).await?;
        let tokens = self.tokens.issue_pair(user.id, user.role)?;
        Ok((user, tokens))
    }

    /// Replace a user's password after verifying the old one.
    ///
    /// Previously issued tokens stay valid until natural expiry; there is
    /// no revocation mechanism.
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), CoordinationError> {
        let user = self.users.get_user(user_id).await?.ok_or_else(|| {
            CoordinationError::ResourceNotFound {
                resource_type: "User".to_string(),
                resource_id: user_id.to_string(),
            }
            .log()
        })?;

        if !verify_password(old_password, &user.password_hash) {
            return Err(CoordinationError::IncorrectOldPassword.log());
        }

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        tracing::info!("Password changed for user {}", user.id);
        Ok(())
    }

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// The user is re-loaded so a deleted account cannot refresh and a role
    /// change takes effect on the next pair.
    pub async fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> Result<TokenPair, CoordinationError> {
        let claims = self.tokens.validate(refresh_token)?;

        let Some(user) = self.users.get_user(claims.user_id).await? else {
            return Err(CoordinationError::InvalidCredentials.log());
        };

        Ok(self.tokens.issue_pair(user.id, user.role)?)
    }
}
