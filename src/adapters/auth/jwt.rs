//! HS256 JWT implementation of `TokenService`.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::auth::{IssuedToken, TokenKind, VerifiedToken};
use crate::domain::foundation::{AuthError, Timestamp, UserId};
use crate::ports::TokenService;

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    typ: TokenKind,
    iss: String,
    iat: i64,
    exp: i64,
    /// Unique token id.
    jti: String,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.access_token_ttl_secs,
            config.refresh_token_ttl_secs,
        )
    }

    fn ttl_for(&self, kind: TokenKind) -> u64 {
        match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::service_unavailable("token signing failed")
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId, kind: TokenKind) -> Result<IssuedToken, AuthError> {
        let now = Timestamp::now();
        let ttl_secs = self.ttl_for(kind);
        let expires_at = now.plus_secs(ttl_secs);
        let token_id = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            typ: kind,
            iss: self.issuer.clone(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
            jti: token_id.clone(),
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            token_id,
            expires_at,
            ttl_secs,
        })
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<VerifiedToken, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        if claims.typ != expected {
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(VerifiedToken {
            user_id,
            kind: claims.typ,
            token_id: claims.jti,
            expires_at: Timestamp::from_unix_secs(claims.exp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new("test-secret-that-is-long-enough-123", "socialite", 3600, 604800)
    }

    #[test]
    fn issued_access_token_verifies() {
        let svc = service();
        let user_id = UserId::new();

        let issued = svc.issue(&user_id, TokenKind::Access).unwrap();
        let verified = svc.verify(&issued.token, TokenKind::Access).unwrap();

        assert_eq!(verified.user_id, user_id);
        assert_eq!(verified.kind, TokenKind::Access);
        assert_eq!(verified.token_id, issued.token_id);
        assert_eq!(issued.ttl_secs, 3600);
    }

    #[test]
    fn pair_uses_distinct_lifetimes() {
        let pair = service().issue_pair(&UserId::new()).unwrap();
        assert_eq!(pair.access.ttl_secs, 3600);
        assert_eq!(pair.refresh.ttl_secs, 604800);
        assert_ne!(pair.access.token_id, pair.refresh.token_id);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let svc = service();
        let issued = svc.issue(&UserId::new(), TokenKind::Refresh).unwrap();
        assert_eq!(
            svc.verify(&issued.token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
        assert!(svc.verify(&issued.token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let other = JwtTokenService::new("another-secret-that-is-long-enough", "socialite", 3600, 604800);
        let issued = other.issue(&UserId::new(), TokenKind::Access).unwrap();
        assert_eq!(
            service().verify(&issued.token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let other = JwtTokenService::new("test-secret-that-is-long-enough-123", "elsewhere", 3600, 604800);
        let issued = other.issue(&UserId::new(), TokenKind::Access).unwrap();
        assert_eq!(
            service().verify(&issued.token, TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn expired_token_reports_expiry() {
        let svc = service();
        let now = Timestamp::now().as_unix_secs();
        let claims = Claims {
            sub: UserId::new().to_string(),
            typ: TokenKind::Access,
            iss: "socialite".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: "old".to_string(),
        };
        let token = svc.sign(&claims).unwrap();

        assert_eq!(svc.verify(&token, TokenKind::Access), Err(AuthError::TokenExpired));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            service().verify("not.a.jwt", TokenKind::Access),
            Err(AuthError::InvalidToken)
        );
    }
}
