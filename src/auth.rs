use actix_web::{http::header, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;

/// Access token claims issued by the account service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    /// Require one of the given roles
    pub fn require(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
    }
}

/// Verifies HS256 bearer tokens
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {}", e);
                AppError::Unauthorized("Invalid token".to_string())
            })
    }

    /// Extract and verify the `Authorization: Bearer` header
    pub fn authenticate(&self, req: &HttpRequest) -> Result<Principal, AppError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

        let claims = self.verify(token)?;
        Ok(Principal {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(secret: &str, role: Role, exp: usize) -> (Uuid, String) {
        let id = Uuid::new_v4();
        let claims = Claims { sub: id, role, email: None, exp };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .expect("encode token");
        (id, token)
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_authenticate_bearer() {
        let verifier = TokenVerifier::new("secret");
        let (id, token) = issue("secret", Role::Organizer, far_future());
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let principal = verifier.authenticate(&req).unwrap();
        assert_eq!(principal, Principal { id, role: Role::Organizer });
        assert!(principal.require(&[Role::Organizer]).is_ok());
        assert!(principal.require(&[Role::Participant, Role::Admin]).is_err());
    }

    #[test]
    fn test_rejects_missing_and_foreign_tokens() {
        let verifier = TokenVerifier::new("secret");
        let bare = TestRequest::default().to_http_request();
        assert!(matches!(verifier.authenticate(&bare), Err(AppError::Unauthorized(_))));

        let (_, token) = issue("other-secret", Role::Admin, far_future());
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let verifier = TokenVerifier::new("secret");
        let (_, token) = issue("secret", Role::Participant, 1);
        assert!(verifier.verify(&token).is_err());
    }
}
