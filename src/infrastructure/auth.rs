//! Session token verification
//!
//! Sessions are issued by the external identity provider; this service only
//! verifies the signature and lifts the subject claim into a [`UserId`].

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::identity::UserId;

/// Authentication failure at the collaborator boundary
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid session token")]
    InvalidToken,
}

/// Verifies provider-issued session tokens.
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a bearer token and return the authenticated identity.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(UserId::new(data.claims.sub))
    }
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: usize,
    }

    fn verifier(secret: &str) -> SessionVerifier {
        SessionVerifier::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: None,
        })
    }

    fn token(secret: &str, sub: &str) -> String {
        encode(
            &Header::default(),
            &TestClaims {
                sub: sub.to_string(),
                exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_the_subject() {
        let verifier = verifier("test-secret-key-for-testing-only");
        let token = token("test-secret-key-for-testing-only", "user_42");
        assert_eq!(verifier.verify(&token).unwrap(), UserId::new("user_42"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let verifier = verifier("test-secret-key-for-testing-only");
        let token = token("another-secret-entirely-here", "user_42");
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
