//! Superadmin accounts: registration, login and principal lookup

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::superadmin::{
        LoginSuperadmin, Principal, RegisterSuperadmin, Role, SuperadminResponse,
    },
    repository::Repository,
};

use super::auth::{hash_password, verify_password, TokenService};

#[derive(Clone)]
pub struct SuperadminsService {
    repository: Repository,
    tokens: TokenService,
}

impl SuperadminsService {
    pub fn new(repository: Repository, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Create an account. Input must already be validated.
    pub async fn register(&self, request: RegisterSuperadmin) -> AppResult<SuperadminResponse> {
        let password_hash = hash_password(&request.password)?;
        let role = request.role.unwrap_or(Role::Superadmin);

        let admin = self
            .repository
            .superadmins
            .create(&request.username, &password_hash, &request.full_name, role)
            .await?;

        tracing::info!(username = %admin.username, role = %admin.role, "Superadmin registered");

        Ok(SuperadminResponse {
            username: admin.username,
            full_name: admin.full_name,
            token: None,
        })
    }

    /// Check credentials and issue a token
    pub async fn login(&self, request: LoginSuperadmin) -> AppResult<SuperadminResponse> {
        let admin = self
            .repository
            .superadmins
            .get_by_username(&request.username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&admin.password, &request.password)? {
            tracing::warn!(username = %request.username, "Login rejected");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&admin)?;

        tracing::info!(username = %admin.username, "Superadmin logged in");

        Ok(SuperadminResponse {
            username: admin.username,
            full_name: admin.full_name,
            token: Some(token),
        })
    }

    /// Resolve a bearer token to the principal it was issued for
    pub async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let id = self.tokens.verify(token)?;
        self.principal(id).await
    }

    pub async fn principal(&self, id: Uuid) -> AppResult<Principal> {
        self.repository
            .superadmins
            .get_by_id(id)
            .await?
            .map(Principal::from)
            .ok_or_else(invalid_credentials)
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.superadmins.count().await
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid credentials".to_string())
}
