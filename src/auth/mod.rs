//! Caller identity for Rehnuma
//!
//! Validates JWT bearer tokens and resolves the subject against the user
//! directory. Token issuance, passwords, and sessions are external
//! concerns; this module only verifies and decodes.

use bson::{doc, oid::ObjectId};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::db::schemas::{UserDoc, UserRole};
use crate::db::MongoCollection;
use crate::types::{DirectoryError, Result};

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user document id (hex ObjectId)
    pub sub: String,
    /// Expiry (seconds since epoch)
    pub exp: u64,
}

/// Validates bearer tokens against the configured secret
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode and verify a token, returning its claims
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn extract_token_from_header(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authenticated caller, resolved from the user directory
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Fixed identity used in development mode when no token is sent
    pub fn dev() -> Self {
        Self {
            id: ObjectId::from_bytes([0u8; 12]),
            name: "Dev User".to_string(),
            email: "dev@localhost".to_string(),
            phone: String::new(),
            role: UserRole::Admin,
        }
    }
}

/// Resolve the caller behind an Authorization header
///
/// Fails with `Unauthorized` when the token is missing/invalid or the
/// subject is unknown, and `Forbidden` when the account is disabled.
pub async fn authenticate(
    validator: &JwtValidator,
    users: &MongoCollection<UserDoc>,
    auth_header: Option<&str>,
) -> Result<Caller> {
    let token = extract_token_from_header(auth_header)
        .ok_or_else(|| DirectoryError::Unauthorized("Missing bearer token".into()))?;

    let claims = validator.validate(token)?;

    let id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| DirectoryError::Unauthorized("Invalid subject claim".into()))?;

    let user = users
        .find_one(doc! { "_id": id })
        .await?
        .ok_or_else(|| DirectoryError::Unauthorized("Unknown user".into()))?;

    if !user.is_active {
        return Err(DirectoryError::Forbidden("Account disabled".into()));
    }

    Ok(Caller {
        id,
        name: user.name,
        email: user.email,
        phone: user.phone,
        role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(secret: &str, sub: &str, exp: u64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> u64 {
        4_102_444_800 // 2100-01-01
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(
            extract_token_from_header(Some("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_header(Some("Basic abc")), None);
        assert_eq!(extract_token_from_header(Some("Bearer ")), None);
        assert_eq!(extract_token_from_header(None), None);
    }

    #[test]
    fn test_validate_roundtrip() {
        let validator = JwtValidator::new("test-secret");
        let token = make_token("test-secret", "64f000000000000000000001", far_future());

        let claims = validator.validate(&token).unwrap();
        assert_eq!(claims.sub, "64f000000000000000000001");
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let validator = JwtValidator::new("right-secret");
        let token = make_token("wrong-secret", "64f000000000000000000001", far_future());

        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_expired() {
        let validator = JwtValidator::new("test-secret");
        let token = make_token("test-secret", "64f000000000000000000001", 1);

        assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn test_dev_caller_is_admin() {
        assert!(Caller::dev().is_admin());
    }
}
