use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::token::store::{TokenRecord, TokenStore};
use crate::types::user::Role;

const TOKEN_TTL_SECONDS: i64 = 60 * 60;

pub(crate) fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECONDS)
}

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) user_id: String,
    pub(crate) role: Role,
    pub(crate) exp: usize,
}

/// Issues tokens and decides whether a presented token is honoured.
///
/// The store is the source of truth: a token is valid while its record exists
/// and has not expired. Signatures are only checked when `verify_signature`
/// is enabled.
#[derive(Clone)]
pub(crate) struct TokenController {
    store: TokenStore,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    verify_signature: bool,
}

impl std::fmt::Debug for TokenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenController")
            .field("verify_signature", &self.verify_signature)
            .finish()
    }
}

impl TokenController {
    pub(crate) fn new(store: TokenStore, secret: &str, verify_signature: bool) -> Self {
        Self {
            store,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            verify_signature,
        }
    }

    pub(crate) fn store(&self) -> &TokenStore {
        &self.store
    }

    pub(crate) async fn issue(&self, user_id: &str, role: Role) -> Result<String, Error> {
        self.issue_at(user_id, role, Utc::now()).await
    }

    pub(crate) async fn issue_at(
        &self,
        user_id: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let expires_at = now + token_ttl();

        let claims = Claims {
            user_id: user_id.to_string(),
            role,
            exp: expires_at.timestamp() as usize,
        };

        let token = self.encode_jwt(&claims)?;

        self.store
            .put(
                token.clone(),
                TokenRecord {
                    user_id: claims.user_id,
                    role,
                    expires_at,
                },
            )
            .await;

        tracing::debug!(user_id, %role, "issued token");

        Ok(token)
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, Error> {
        Ok(jsonwebtoken::encode(
            &Header::default(),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Verifies the signature only. Expiry is left to the store.
    pub(crate) fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, Error> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| Error::InvalidToken)
    }

    /// Presence check only: neither expiry nor role is looked at.
    pub(crate) async fn lookup(&self, token: Option<&str>) -> Result<TokenRecord, Error> {
        self.find(token.ok_or(Error::MissingToken)?).await
    }

    async fn find(&self, token: &str) -> Result<TokenRecord, Error> {
        if self.verify_signature {
            self.decode_jwt(token)?;
        }

        self.store.get(token).await.ok_or(Error::InvalidToken)
    }

    pub(crate) async fn check(
        &self,
        token: Option<&str>,
        roles: Option<&[Role]>,
    ) -> Result<TokenRecord, Error> {
        self.check_at(token, roles, Utc::now()).await
    }

    pub(crate) async fn check_at(
        &self,
        token: Option<&str>,
        roles: Option<&[Role]>,
        now: DateTime<Utc>,
    ) -> Result<TokenRecord, Error> {
        let token = token.ok_or(Error::MissingToken)?;
        let record = self.find(token).await?;

        if record.is_expired(now) {
            self.store.delete(token).await;
            return Err(Error::ExpiredToken);
        }

        if let Some(roles) = roles {
            if !roles.contains(&record.role) {
                return Err(Error::InsufficientPermissions);
            }
        }

        Ok(record)
    }
}
