//! Admin session token claims

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims of the session token the admin host hands to the embedded app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// `https://{shop}/admin`
    pub iss: String,
    /// `https://{shop}`
    pub dest: String,
    /// App API key
    pub aud: String,
    /// Staff user id
    pub sub: Option<String>,
    pub exp: usize,
    pub nbf: Option<usize>,
    pub iat: Option<usize>,
    pub jti: Option<String>,
    pub sid: Option<String>,
}

impl SessionClaims {
    /// Create a signed token (used by tests and local tooling)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a session token
    pub fn from_token(
        token: &str,
        secret: &str,
        api_key: &str,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[api_key]);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    /// Shop domain the token was issued for
    pub fn shop(&self) -> Result<String, AppError> {
        let shop = self
            .dest
            .strip_prefix("https://")
            .filter(|s| !s.is_empty() && !s.contains('/'))
            .ok_or_else(|| AppError::Authentication("Invalid session destination".to_string()))?;

        if self.iss.trim_end_matches('/') != format!("{}/admin", self.dest) {
            return Err(AppError::Authentication(
                "Session issuer does not match destination".to_string(),
            ));
        }

        Ok(shop.to_string())
    }
}
