use tracing::info;

use sportzone_domain::id::UserId;
use sportzone_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserStats};
use crate::error::ShopServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, ShopServiceError> {
        self.repo.list().await
    }
}

// ── UserStats ────────────────────────────────────────────────────────────────

pub struct UserStatsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UserStatsUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<UserStats, ShopServiceError> {
        self.repo.stats(user_id).await
    }
}

// ── UpdateUserRole ───────────────────────────────────────────────────────────

pub struct UpdateUserRoleUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserRoleUseCase<R> {
    pub async fn execute(&self, user_id: UserId, role: &str) -> Result<UserRole, ShopServiceError> {
        let role: UserRole = role.parse().map_err(|_| ShopServiceError::InvalidRole)?;
        if role == UserRole::Customer {
            let administrators = self.repo.count_administrators().await?;
            let user = self
                .repo
                .find_by_id(user_id)
                .await?
                .ok_or(ShopServiceError::UserNotFound)?;
            if user.role.is_administrator() && administrators <= 1 {
                return Err(ShopServiceError::LastAdmin);
            }
        }
        if !self.repo.update_role(user_id, role).await? {
            return Err(ShopServiceError::UserNotFound);
        }
        info!(%user_id, %role, "user role changed");
        Ok(role)
    }
}
