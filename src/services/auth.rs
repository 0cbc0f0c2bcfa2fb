//! Token issuing/verification and password hashing

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::superadmin::{Superadmin, TokenClaims},
};

/// RS256 token codec built from the configured PEM key pair
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_private_key.trim().is_empty() || config.jwt_public_key.trim().is_empty() {
            return Err(AppError::Internal(
                "JWT key pair is not configured".to_string(),
            ));
        }

        let encoding = EncodingKey::from_rsa_pem(config.jwt_private_key.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid JWT private key: {}", e)))?;
        let decoding = DecodingKey::from_rsa_pem(config.jwt_public_key.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid JWT public key: {}", e)))?;

        let lifetime = i64::try_from(config.jwt_expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "JWT expiration of {} hours is out of range",
                    config.jwt_expiration_hours
                ))
            })?;

        Ok(Self {
            encoding,
            decoding,
            validation: Validation::new(Algorithm::RS256),
            lifetime,
        })
    }

    /// Sign a token for `admin`
    pub fn issue(&self, admin: &Superadmin) -> AppResult<String> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::Internal("Token expiry out of range".to_string()))?;
        let claims = TokenClaims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &TokenClaims) -> AppResult<String> {
        encode(&Header::new(Algorithm::RS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry, returning the subject id
    pub fn verify(&self, token: &str) -> AppResult<Uuid> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Authentication("Token expired".to_string())
                }
                _ => AppError::Authentication("Invalid token".to_string()),
            }
        })?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Authentication("Invalid token".to_string()))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
