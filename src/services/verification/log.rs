use async_trait::async_trait;

use super::VerificationSender;
use crate::models::User;

/// Records that a verification is pending without contacting the user.
pub struct LogOnlySender;

#[async_trait]
impl VerificationSender for LogOnlySender {
    async fn send_verification(&self, user: &User) -> anyhow::Result<()> {
        // TODO: deliver the code over SMS/WhatsApp once a provider is chosen
        tracing::info!(user_id = user.id, "verification pending, no sender configured");
        Ok(())
    }
}
