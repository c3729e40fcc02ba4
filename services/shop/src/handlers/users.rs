use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use sportzone_core::envelope::Envelope;
use sportzone_domain::id::UserId;
use sportzone_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::cascade::DeleteUserUseCase;
use crate::usecase::user::{ListUsersUseCase, UpdateUserRoleUseCase, UserStatsUseCase};

/// User as shown to administrators. Never carries the credential hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(serialize_with = "sportzone_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users: Vec<UserResponse> = usecase
        .execute()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Envelope::ok(json!({ "users": users })))
}

// ── GET /api/users/{id}/stats ────────────────────────────────────────────────

pub async fn user_stats(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = UserStatsUseCase {
        repo: state.user_repo(),
    };
    let stats = usecase.execute(id).await?;
    Ok(Envelope::ok(json!({
        "stats": {
            "products": stats.products,
            "orders": stats.orders,
            "canDelete": true,
        }
    })))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    let report = usecase.execute(id).await?;
    let mut message = format!("user \"{}\" deleted", report.user_name);
    if report.products > 0 || report.orders > 0 {
        message.push_str(&format!(
            " together with {} product(s) and {} order(s)",
            report.products, report.orders
        ));
    }
    Ok(Envelope::ok(json!({
        "deleted": {
            "user": report.user_name,
            "products": report.products,
            "orders": report.orders,
        }
    }))
    .message(message))
}

// ── PUT /api/users/{id}/role ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

pub async fn update_user_role(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = UpdateUserRoleUseCase {
        repo: state.user_repo(),
    };
    let role = usecase.execute(id, &body.role).await?;
    Ok(Envelope::ok(json!({ "user": { "id": id, "role": role } }))
        .message(format!("role updated to {role}")))
}
