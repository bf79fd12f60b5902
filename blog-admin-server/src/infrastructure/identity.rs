//! Verification of access tokens issued by the external identity provider.
//!
//! The admin panel never signs users in itself. It receives the provider's
//! session token on every request and only checks that the token is genuine,
//! unexpired and meant for this audience.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("missing credential")]
    MissingCredential,

    #[error("token decode/validation failed")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerifiedUser {
    pub(crate) id: String,
    pub(crate) email: Option<String>,
}

#[async_trait]
pub(crate) trait IdentityResolver: Send + Sync {
    async fn resolve_user(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

pub(crate) struct JwtIdentityResolver {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityResolver {
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, audience: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve_user(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(AuthError::InvalidToken)?;

        let sub = data.claims.sub.trim();
        if sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        Ok(VerifiedUser {
            id: sub.to_string(),
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    use super::{AuthError, IdentityResolver, JwtIdentityResolver};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        email: Option<&'a str>,
        aud: &'a str,
        exp: i64,
    }

    fn token(secret: &str, sub: &str, aud: &str, exp_offset: Duration) -> String {
        let claims = TestClaims {
            sub,
            email: Some("admin@example.com"),
            aud,
            exp: (Utc::now() + exp_offset).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token must encode")
    }

    fn resolver() -> JwtIdentityResolver {
        JwtIdentityResolver::new(SECRET, "authenticated", None)
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let token = token(SECRET, "user-1", "authenticated", Duration::hours(1));

        let user = resolver()
            .resolve_user(&token)
            .await
            .expect("token must verify");
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email.as_deref(), Some("admin@example.com"));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = token(SECRET, "user-1", "authenticated", -Duration::hours(1));

        let err = resolver()
            .resolve_user(&token)
            .await
            .expect_err("expired token must fail");
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = token(
            "ffffffffffffffffffffffffffffffff",
            "user-1",
            "authenticated",
            Duration::hours(1),
        );

        let err = resolver()
            .resolve_user(&token)
            .await
            .expect_err("foreign signature must fail");
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn token_for_other_audience_is_rejected() {
        let token = token(SECRET, "user-1", "anon", Duration::hours(1));

        let err = resolver()
            .resolve_user(&token)
            .await
            .expect_err("wrong audience must fail");
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn blank_subject_is_rejected() {
        let token = token(SECRET, "  ", "authenticated", Duration::hours(1));

        let err = resolver()
            .resolve_user(&token)
            .await
            .expect_err("blank subject must fail");
        assert!(matches!(err, AuthError::MissingSubject));
    }

    #[tokio::test]
    async fn empty_token_is_missing_credential() {
        let err = resolver()
            .resolve_user("   ")
            .await
            .expect_err("empty token must fail");
        assert!(matches!(err, AuthError::MissingCredential));
    }
}
