//! Bearer-token verification.
//!
//! Tokens are HS256 JWTs carrying the user id in the `sub` claim. The
//! verifier is a trait so handlers stay testable without minting real
//! tokens; verification failure always rejects, it never falls through to
//! an anonymous request.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// External auth subject, used as the profile uid.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiry, unix seconds.
    pub exp: i64,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthClaims>;
}

pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No expiry leeway, a token past its exp is rejected outright.
        validation.leeway = 0;
        JwtVerifier {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AuthClaims> {
        let data = jsonwebtoken::decode::<AuthClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
pub fn make_token(secret: &str, sub: &str, email: Option<&str>) -> String {
    let claims = AuthClaims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_its_own_tokens() {
        let verifier = JwtVerifier::new("secret");
        let token = make_token("secret", "user-1", Some("u@example.com"));
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("u@example.com"));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let verifier = JwtVerifier::new("secret");
        let token = make_token("not-the-secret", "user-1", None);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let claims = AuthClaims {
            sub: "user-1".to_string(),
            email: None,
            exp: chrono::Utc::now().timestamp() - 60,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(JwtVerifier::new("secret").verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(JwtVerifier::new("secret").verify("not-a-jwt").is_err());
    }
}
