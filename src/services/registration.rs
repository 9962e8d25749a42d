use std::sync::Mutex;

use chrono::{SubsecRound, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::services::verification::VerificationSender;

pub const PENDING_MESSAGE: &str = "User created. Verification pending.";

#[derive(Debug, Serialize)]
pub struct Registration {
    pub message: String,
    pub user_id: i64,
}

/// Creates an unverified user unless the email or phone is already taken.
///
/// The lookup is only a fast path: the UNIQUE constraints on `users.email`
/// and `users.phone` decide races, and a rejected insert is reported as the
/// same duplicate error. The verification sender runs after commit and its
/// failure does not undo the registration.
pub async fn register(
    db: &Mutex<Connection>,
    sender: &dyn VerificationSender,
    new_user: NewUser,
) -> Result<Registration, AppError> {
    let user = {
        let mut conn = db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        insert_unique(&mut conn, new_user)?
    };

    tracing::info!(user_id = user.id, "user registered");

    if let Err(e) = sender.send_verification(&user).await {
        tracing::warn!(user_id = user.id, error = %e, "failed to send verification");
    }

    Ok(Registration {
        message: PENDING_MESSAGE.to_string(),
        user_id: user.id,
    })
}

fn insert_unique(conn: &mut Connection, new_user: NewUser) -> Result<User, AppError> {
    let tx = conn.transaction()?;

    if queries::find_user_by_email_or_phone(&tx, &new_user.email, &new_user.phone)?.is_some() {
        return Err(AppError::DuplicateRegistration);
    }

    // Clamp to the newest row so created_at never goes backwards with the wall clock.
    let now = Utc::now().naive_utc().trunc_subsecs(6);
    let created_at = match queries::latest_created_at(&tx)? {
        Some(latest) if latest > now => latest,
        _ => now,
    };

    let id = queries::insert_user(
        &tx,
        &new_user.business_name,
        &new_user.email,
        &new_user.phone,
        created_at,
    )
    .map_err(|e| {
        if queries::is_unique_violation(&e) {
            AppError::DuplicateRegistration
        } else {
            AppError::Storage(e)
        }
    })?;

    tx.commit()?;

    Ok(User {
        id,
        business_name: new_user.business_name,
        email: new_user.email,
        phone: new_user.phone,
        is_verified: false,
        created_at,
    })
}
