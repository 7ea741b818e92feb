//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    auth::{
        ApiTokenRecord, ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        format_api_token, hash_api_token, parse_api_token, records::NewApiToken,
        repository::PgApiTokensRepository, verifier_matches,
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgApiTokensRepository,
    pepper: Zeroizing<String>,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .field("pepper", &"**redacted**")
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, pepper: String) -> Self {
        Self {
            db,
            repository: PgApiTokensRepository::new(),
            pepper: Zeroizing::new(pepper),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] when the user does not exist.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let token_hash = hash_api_token(&self.pepper, token_uuid, version, user, &secret);

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_api_token(
                &mut tx,
                NewApiToken {
                    uuid: token_uuid,
                    user_uuid: user,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedApiToken {
            token: format_api_token(token_uuid, version, &secret),
            record,
        })
    }

    /// List all tokens issued to the user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenRecord>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let tokens = self
            .repository
            .list_api_tokens_for_user(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(tokens)
    }

    /// Revoke a token. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self
            .repository
            .revoke_api_token(&mut tx, token_uuid)
            .await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }

    async fn touch(&self, token_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.touch_api_token(&mut tx, token_uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_err| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let token = self
            .repository
            .find_active_api_token(&mut tx, parsed.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected = hash_api_token(
            &self.pepper,
            parsed.token_uuid,
            parsed.version,
            token.user_uuid,
            &parsed.secret,
        );

        if !verifier_matches(&token.token_hash, &expected) {
            return Err(AuthServiceError::NotFound);
        }

        // Authentication does not depend on this write.
        if let Err(error) = self.touch(parsed.token_uuid).await {
            warn!(token_uuid = %parsed.token_uuid, %error, "failed to record token use");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
