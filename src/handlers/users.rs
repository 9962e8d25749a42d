use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::NewUser;
use crate::services::registration::{self, Registration};
use crate::state::AppState;

// POST /users
//
// Only presence and type of the three fields are checked; empty strings pass.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<Registration>, AppError> {
    let Json(new_user) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let registration =
        registration::register(&state.db, state.verification.as_ref(), new_user).await?;

    Ok(Json(registration))
}
