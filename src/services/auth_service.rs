//! Authentication service

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use jurybox_rules::{Role, RoleSet};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::{AdminAccount, Config, JwtConfig},
    constants::REFRESH_TOKEN_LENGTH,
    db::repositories::{TokenRepository, UserRepository},
    error::{AppError, AppResult},
    models::{NewUser, User},
    utils::{crypto, time},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Issued credentials
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Account fields accepted at registration
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub photo_url: Option<String>,
}

impl Registration {
    /// Turn into an insertable row holding `roles`
    pub fn into_new_user(self, roles: RoleSet) -> AppResult<NewUser> {
        Ok(NewUser {
            password_hash: AuthService::hash_password(&self.password)?,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            roles,
            phone_number: self.phone_number,
            address: self.address,
            city: self.city,
            state: self.state,
            photo_url: self.photo_url,
        })
    }
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a plain account with no roles
    pub async fn register(pool: &PgPool, registration: Registration) -> AppResult<User> {
        if UserRepository::find_by_username(pool, &registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let new_user = registration.into_new_user(RoleSet::empty())?;
        let user = UserRepository::create(pool, &new_user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with username/email and password
    pub async fn login(
        pool: &PgPool,
        config: &Config,
        identifier: &str,
        password: &str,
    ) -> AppResult<(User, TokenPair)> {
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or_else(|| {
                tracing::debug!(identifier, "Login failed: unknown user");
                AppError::InvalidCredentials
            })?;

        if !Self::verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        UserRepository::update_last_login(pool, &user.id).await?;

        let tokens = Self::issue_tokens(pool, &user, &config.jwt).await?;
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented token is consumed; roles are re-read from the database.
    pub async fn refresh(
        pool: &PgPool,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<(User, TokenPair)> {
        let stored = TokenRepository::take_by_hash(pool, &crypto::hash_string(refresh_token))
            .await?
            .ok_or(AppError::InvalidToken)?;

        if stored.is_expired() {
            return Err(AppError::TokenExpired);
        }

        let user = UserRepository::find_by_id(pool, &stored.user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let tokens = Self::issue_tokens(pool, &user, &config.jwt).await?;
        Ok((user, tokens))
    }

    /// Revoke one refresh token, or every token of the user
    pub async fn logout(
        pool: &PgPool,
        user_id: &Uuid,
        refresh_token: Option<&str>,
    ) -> AppResult<u64> {
        let revoked = match refresh_token {
            Some(token) => {
                TokenRepository::delete_by_hash(pool, user_id, &crypto::hash_string(token))
                    .await?
            }
            None => TokenRepository::delete_for_user(pool, user_id).await?,
        };

        tracing::debug!(user_id = %user_id, revoked, "Refresh tokens revoked");
        Ok(revoked)
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Create the configured staff account if its username is free.
    ///
    /// An existing account with that username is given the staff role.
    pub async fn ensure_admin(pool: &PgPool, admin: &AdminAccount) -> AppResult<User> {
        if let Some(user) = UserRepository::find_by_username(pool, &admin.username).await? {
            if user.has_role(Role::Staff) {
                return Ok(user);
            }
            let user = UserRepository::grant_role(pool, &user.id, Role::Staff).await?;
            tracing::info!(username = %user.username, "Granted staff role to bootstrap admin");
            return Ok(user);
        }

        let registration = Registration {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
            ..Default::default()
        };
        let user =
            UserRepository::create(pool, &registration.into_new_user(Role::Staff.into())?).await?;

        tracing::info!(username = %user.username, "Created bootstrap admin");
        Ok(user)
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    pub fn generate_access_token(user: &User, config: &JwtConfig) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.expiry_hours);
        let expires_in = config.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            roles: user.role_set().to_strings(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    async fn issue_tokens(pool: &PgPool, user: &User, config: &JwtConfig) -> AppResult<TokenPair> {
        let (access_token, expires_in) = Self::generate_access_token(user, config)?;
        let refresh_token = crypto::generate_secure_token(REFRESH_TOKEN_LENGTH);

        TokenRepository::create(
            pool,
            &user.id,
            &crypto::hash_string(&refresh_token),
            time::days_from_now(config.refresh_token_expiry_days),
        )
        .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 1,
            refresh_token_expiry_days: 7,
        }
    }

    fn user(roles: &[&str]) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "juror".to_string(),
            email: String::new(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            phone_number: None,
            address: None,
            city: None,
            state: None,
            photo_url: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_round_trip() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_token_carries_roles() {
        let config = jwt_config();
        let user = user(&["jury", "committee"]);
        let (token, expires_in) = AuthService::generate_access_token(&user, &config).unwrap();
        assert_eq!(expires_in, 3600);

        let claims = AuthService::verify_token(&token, &config.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "juror");
        assert_eq!(claims.roles, vec!["committee", "jury"]);
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let config = jwt_config();
        let (token, _) = AuthService::generate_access_token(&user(&[]), &config).unwrap();
        let err = AuthService::verify_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = JwtConfig {
            expiry_hours: -2,
            ..jwt_config()
        };
        let (token, _) = AuthService::generate_access_token(&user(&[]), &config).unwrap();
        let err = AuthService::verify_token(&token, &config.secret).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }
}
