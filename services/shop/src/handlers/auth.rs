use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use sportzone_core::envelope::Envelope;
use sportzone_domain::id::UserId;
use sportzone_domain::user::UserRole;

use crate::error::ShopServiceError;
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RegisterInput, RegisterUseCase};

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            address: body.address,
            phone: body.phone,
            role: body.role,
        })
        .await?;
    let user = RegisteredUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };
    Ok(Envelope::created(json!({ "user": user })).message("user registered"))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoggedInUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub address: Option<String>,
    pub phone: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ShopServiceError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&body.email, &body.password).await?;
    let user = LoggedInUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        address: user.address,
        phone: user.phone,
    };
    Ok(Envelope::ok(json!({ "user": user })).message("login successful"))
}
