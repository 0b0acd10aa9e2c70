use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::error::CustomError;

use super::model::{Account, Claims};

/// Signs and verifies the session cookie. Tokens are keyed by account id.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        SessionKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, CustomError> {
        let expiration = (Utc::now() + self.ttl).timestamp().max(0) as usize;

        let claims = Claims {
            sub: account.id.to_string(),
            name: account.name.clone(),
            exp: expiration,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(CustomError::TokenError)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, CustomError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(CustomError::TokenError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 7,
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            password: "hash".to_string(),
        }
    }

    #[test]
    fn issued_token_carries_account_id() {
        let keys = SessionKeys::new("secret", 24);
        let token = keys.issue(&account()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.name, "Ada");
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = SessionKeys::new("secret", 24).issue(&account()).unwrap();
        let result = SessionKeys::new("another", 24).verify(&token);
        assert!(matches!(result, Err(CustomError::TokenError(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("secret", -2);
        let token = keys.issue(&account()).unwrap();
        assert!(matches!(keys.verify(&token), Err(CustomError::TokenError(_))));
    }
}
