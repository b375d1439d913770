use crate::shared::entity::{Entity, ID};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Display;
use thiserror::Error;

const BCRYPT_COST: u32 = 10;
const MIN_PASSWORD_LEN: usize = 6;
const RESET_TOKEN_LEN: usize = 20;
const RESET_TOKEN_TTL_MILLIS: i64 = 10 * 60 * 1000;

/// A buyer or seller registered with the marketplace.
///
/// `password` always holds a bcrypt hash and `password_reset_token` the
/// SHA-256 hex of the token handed to the caller, so neither secret can
/// leak through the persistence layer. `geolocation` is derived from
/// `address` and only written when the address text changes.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: ID,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub password: String,
    pub address: Option<String>,
    pub geolocation: Option<Geolocation>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

impl Default for Role {
    fn default() -> Self {
        Self::Buyer
    }
}

/// Syntactically valid, lowercased email address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, InvalidAccountField> {
        let raw = raw.trim().to_lowercase();
        if validator::validate_email(raw.as_str()) {
            Ok(Self(raw))
        } else {
            Err(InvalidAccountField::Email(raw))
        }
    }

    /// Restores an email that already passed validation before it was
    /// persisted. Only meant for the persistence layer.
    pub fn unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// GeoJSON-style point with the normalized address fields returned by the
/// geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Error, Debug)]
pub enum InvalidAccountField {
    #[error("{0} is not a valid email address")]
    Email(String),
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("Password could not be hashed")]
    PasswordHash,
    #[error("Name cannot be empty")]
    EmptyName,
}

/// Claims embedded in the bearer tokens this service signs.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub account_id: String,
    pub iat: usize,
    pub exp: usize,
}

/// One-way hash under which reset tokens are stored.
pub fn hash_reset_token(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

impl Account {
    pub fn new(email: Email, role: Role, created_at: i64) -> Self {
        Self {
            id: Default::default(),
            name: String::new(),
            email,
            role,
            password: String::new(),
            address: None,
            geolocation: None,
            password_reset_token: None,
            password_reset_expires: None,
            created_at,
        }
    }

    /// Validates and hashes a new plaintext password. The plaintext is
    /// dropped here and never leaves this method.
    pub fn set_password(&mut self, plain: &str) -> Result<(), InvalidAccountField> {
        if plain.len() < MIN_PASSWORD_LEN {
            return Err(InvalidAccountField::PasswordTooShort);
        }
        self.password =
            bcrypt::hash(plain, BCRYPT_COST).map_err(|_| InvalidAccountField::PasswordHash)?;
        Ok(())
    }

    /// Constant-time comparison against the stored hash. A hash that fails
    /// to parse counts as a failed match.
    pub fn verify_password(&self, plain: &str) -> bool {
        bcrypt::verify(plain, &self.password).unwrap_or(false)
    }

    /// Replaces the stored reset token with a fresh one and returns the
    /// plaintext. The caller is responsible for delivering it; only its
    /// hash survives here, and any previously issued token stops matching.
    pub fn generate_reset_token(&mut self, now: i64) -> String {
        let mut token = [0u8; RESET_TOKEN_LEN];
        rand::thread_rng().fill_bytes(&mut token);
        let plain = hex::encode(token);

        self.password_reset_token = Some(hash_reset_token(&plain));
        self.password_reset_expires = Some(now + RESET_TOKEN_TTL_MILLIS);
        plain
    }

    pub fn reset_token_matches(&self, plain: &str, now: i64) -> bool {
        let stored = match &self.password_reset_token {
            Some(stored) => stored,
            None => return false,
        };
        let expires = match self.password_reset_expires {
            Some(expires) => expires,
            None => return false,
        };
        *stored == hash_reset_token(plain) && expires > now
    }

    pub fn clear_reset_token(&mut self) {
        self.password_reset_token = None;
        self.password_reset_expires = None;
    }

    /// Signs a bearer token embedding this account's id.
    pub fn sign_bearer_token(
        &self,
        secret: &str,
        expires_in_secs: i64,
        now: i64,
    ) -> anyhow::Result<String> {
        let iat = (now / 1000) as usize;
        let claims = Claims {
            account_id: self.id.as_string(),
            iat,
            exp: iat + expires_in_secs as usize,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}

impl Entity for Account {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_account() -> Account {
        let mut account = Account::new(
            Email::new("a@x.com").unwrap(),
            Role::Seller,
            1_600_000_000_000,
        );
        account.name = "A".into();
        account
    }

    #[test]
    fn it_hashes_passwords() {
        let mut account = test_account();
        account.set_password("secret1").unwrap();

        assert_ne!(account.password, "secret1");
        assert!(account.verify_password("secret1"));
        assert!(!account.verify_password("wrong"));
    }

    #[test]
    fn it_rejects_short_passwords() {
        let mut account = test_account();
        assert!(matches!(
            account.set_password("short"),
            Err(InvalidAccountField::PasswordTooShort)
        ));
        assert!(account.password.is_empty());
    }

    #[test]
    fn it_validates_email_syntax() {
        assert!(Email::new("a@x.com").is_ok());
        assert!(Email::new("  A@X.COM ").is_ok());
        assert_eq!(Email::new(" A@X.COM ").unwrap().as_str(), "a@x.com");
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("a@").is_err());
    }

    #[test]
    fn it_stores_only_the_reset_token_hash() {
        let mut account = test_account();
        let now = 1_600_000_000_000;
        let plain = account.generate_reset_token(now);

        assert_eq!(plain.len(), RESET_TOKEN_LEN * 2);
        assert_ne!(account.password_reset_token.as_deref(), Some(plain.as_str()));
        assert_eq!(
            account.password_reset_token.as_deref(),
            Some(hash_reset_token(&plain).as_str())
        );
        assert_eq!(
            account.password_reset_expires,
            Some(now + RESET_TOKEN_TTL_MILLIS)
        );
        assert!(account.reset_token_matches(&plain, now));
    }

    #[test]
    fn regenerating_invalidates_previous_reset_token() {
        let mut account = test_account();
        let now = 1_600_000_000_000;
        let first = account.generate_reset_token(now);
        let second = account.generate_reset_token(now);

        assert_ne!(first, second);
        assert!(!account.reset_token_matches(&first, now));
        assert!(account.reset_token_matches(&second, now));
    }

    #[test]
    fn it_rejects_expired_reset_tokens() {
        let mut account = test_account();
        let now = 1_600_000_000_000;
        let plain = account.generate_reset_token(now);

        assert!(account.reset_token_matches(&plain, now + RESET_TOKEN_TTL_MILLIS - 1));
        assert!(!account.reset_token_matches(&plain, now + RESET_TOKEN_TTL_MILLIS));
    }

    #[test]
    fn it_signs_decodable_bearer_tokens() {
        let account = test_account();
        let now = now_millis();
        let token = account.sign_bearer_token("secret", 3600, now).unwrap();

        let decoded = jsonwebtoken::decode::<Claims>(
            &token,
            &jsonwebtoken::DecodingKey::from_secret(b"secret"),
            &jsonwebtoken::Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.account_id, account.id.as_string());
        assert_eq!(decoded.claims.exp, decoded.claims.iat + 3600);
    }

    fn now_millis() -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64
    }
}
