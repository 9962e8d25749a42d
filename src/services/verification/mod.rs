pub mod log;

use async_trait::async_trait;

use crate::models::User;

/// Delivers a verification code to a freshly registered user.
#[async_trait]
pub trait VerificationSender: Send + Sync {
    async fn send_verification(&self, user: &User) -> anyhow::Result<()>;
}
