use tracing::info;

use sportzone_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::NewUser;
use crate::error::ShopServiceError;
use crate::infra::password::hash_password;

pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Seed an administrator on a store that has none, so the last-administrator
/// guard always has someone to protect.
pub struct EnsureAdministratorUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> EnsureAdministratorUseCase<R> {
    /// Returns `true` if an administrator was created.
    pub async fn execute(&self, admin: BootstrapAdmin) -> Result<bool, ShopServiceError> {
        if self.repo.count_administrators().await? > 0 {
            return Ok(false);
        }
        if let Some(existing) = self.repo.find_by_email(&admin.email).await? {
            self.repo
                .update_role(existing.id, UserRole::Administrator)
                .await?;
            info!(user_id = %existing.id, "promoted bootstrap administrator");
            return Ok(true);
        }
        let user = self
            .repo
            .create(&NewUser {
                name: admin.name,
                email: admin.email,
                password_hash: hash_password(&admin.password)?,
                address: None,
                phone: None,
                role: UserRole::Administrator,
            })
            .await?;
        info!(user_id = %user.id, "created bootstrap administrator");
        Ok(true)
    }
}
