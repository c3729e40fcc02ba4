use tracing::info;

use sportzone_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::ShopServiceError;
use crate::infra::password::{hash_password, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Defaults to customer.
    pub role: Option<String>,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ShopServiceError> {
        let role = match input.role.as_deref() {
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|_| ShopServiceError::InvalidRole)?,
            None => UserRole::Customer,
        };
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ShopServiceError::UserExists);
        }
        let user = self
            .repo
            .create(&NewUser {
                name: input.name,
                email: input.email,
                password_hash: hash_password(&input.password)?,
                address: input.address,
                phone: input.phone,
                role,
            })
            .await?;
        info!(user_id = %user.id, %role, "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, email: &str, password: &str) -> Result<User, ShopServiceError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(ShopServiceError::UserNotFound)?;
        if !verify_password(password, &user.password_hash) {
            return Err(ShopServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}
