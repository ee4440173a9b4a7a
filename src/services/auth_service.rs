//! Authentication service - Admin login, token verification and seeding.
//!
//! Password hashing lives in the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{is_valid_role, Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{AdminUser, AdminUserResponse, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: AdminUserResponse,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse>;

    /// Verify a JWT and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Account behind a verified token's `sub`
    async fn current_user(&self, user_id: i32) -> AppResult<AdminUserResponse>;

    /// Seed a dashboard account (CLI only)
    async fn create_admin(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> AppResult<AdminUser>;
}

fn generate_token(user: &AdminUser, config: &Config) -> AppResult<LoginResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(LoginResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        user: AdminUserResponse::from(user.clone()),
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse> {
        let user = self.uow.admins().find_by_username(username.trim()).await?;

        // Verify against a dummy hash for unknown users so timing does not
        // reveal which usernames exist.
        let stored = user
            .as_ref()
            .map(|u| Password::from_hash(u.password_hash.as_str()))
            .unwrap_or_else(Password::dummy);
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = user.id, "Admin logged in");
                generate_token(&user, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn current_user(&self, user_id: i32) -> AppResult<AdminUserResponse> {
        self.uow
            .admins()
            .find_by_id(user_id)
            .await?
            .map(AdminUserResponse::from)
            .ok_or(AppError::Unauthorized)
    }

    async fn create_admin(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> AppResult<AdminUser> {
        let username = username.trim().to_string();
        if username.len() < 3 || username.len() > 50 {
            return Err(AppError::validation(
                "Username must be between 3 and 50 characters",
            ));
        }
        if !is_valid_role(&role) {
            return Err(AppError::validation(format!("Unknown role '{}'", role)));
        }
        if self.uow.admins().find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.admins().create(username, password_hash, role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ROLE_ADMIN, ROLE_STAFF};
    use crate::infra::MockAdminRepository;
    use crate::services::test_support::TestUow;
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

    fn config() -> Config {
        Config::new("sqlite::memory:", SECRET)
    }

    fn admin(password: &str) -> AdminUser {
        AdminUser {
            id: 7,
            username: "admin".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            role: ROLE_ADMIN.to_string(),
            created_at: Utc::now(),
        }
    }

    fn service(admins: MockAdminRepository) -> Authenticator<TestUow> {
        Authenticator::new(Arc::new(TestUow::new().with_admins(admins)), config())
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let mut admins = MockAdminRepository::new();
        let user = admin("correct-horse");
        admins
            .expect_find_by_username()
            .with(eq("admin"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = service(admins);
        let response = auth
            .login("admin".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 24 * 3600);
        assert_eq!(response.user.username, "admin");

        let claims = auth.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, ROLE_ADMIN);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut admins = MockAdminRepository::new();
        let user = admin("correct-horse");
        admins
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));

        let err = service(admins)
            .login("admin".to_string(), "battery-staple".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut admins = MockAdminRepository::new();
        admins.expect_find_by_username().returning(|_| Ok(None));

        let err = service(admins)
            .login("ghost".to_string(), "whatever123".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[test]
    fn test_tampered_and_foreign_tokens_rejected() {
        let auth = service(MockAdminRepository::new());
        assert!(matches!(auth.verify_token("not.a.jwt"), Err(AppError::Jwt(_))));

        let other = Config::new("sqlite::memory:", "another-secret-key-that-is-32-chars-long");
        let foreign = generate_token(&admin("password1"), &other).unwrap();
        assert!(auth.verify_token(&foreign.access_token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "admin".to_string(),
            role: ROLE_ADMIN.to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let auth = service(MockAdminRepository::new());
        assert!(auth.verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_current_user_requires_existing_account() {
        let mut admins = MockAdminRepository::new();
        let user = admin("password1");
        admins
            .expect_find_by_id()
            .with(eq(7))
            .returning(move |_| Ok(Some(user.clone())));
        admins.expect_find_by_id().with(eq(8)).returning(|_| Ok(None));

        let auth = service(admins);
        assert_eq!(auth.current_user(7).await.unwrap().username, "admin");
        assert!(matches!(
            auth.current_user(8).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_create_admin_rejects_taken_username() {
        let mut admins = MockAdminRepository::new();
        let user = admin("password1");
        admins
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        admins.expect_create().never();

        let err = service(admins)
            .create_admin("admin".into(), "password123".into(), ROLE_ADMIN.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_admin_hashes_password() {
        let mut admins = MockAdminRepository::new();
        admins.expect_find_by_username().returning(|_| Ok(None));
        admins
            .expect_create()
            .withf(|username, hash, role| {
                username == "clerk" && hash.starts_with("$argon2") && role == ROLE_STAFF
            })
            .returning(|username, password_hash, role| {
                Ok(AdminUser {
                    id: 2,
                    username,
                    password_hash,
                    role,
                    created_at: Utc::now(),
                })
            });

        let created = service(admins)
            .create_admin(" clerk ".into(), "password123".into(), ROLE_STAFF.into())
            .await
            .unwrap();
        assert!(!created.is_admin());
    }

    #[tokio::test]
    async fn test_create_admin_validates_input() {
        let auth = service(MockAdminRepository::new());
        assert!(auth
            .create_admin("ab".into(), "password123".into(), ROLE_ADMIN.into())
            .await
            .is_err());
        assert!(auth
            .create_admin("admin".into(), "password123".into(), "root".into())
            .await
            .is_err());
    }
}
