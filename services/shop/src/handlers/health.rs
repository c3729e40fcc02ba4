use axum::extract::State;
use axum::http::StatusCode;

use sportzone_core::health::database_ready;

use crate::state::AppState;

/// `GET /readyz`: 200 once the database answers, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}
