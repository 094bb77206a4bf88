// File: raffbot-common/src/traits/gateway_traits.rs

use async_trait::async_trait;

use crate::error::Error;

/// Narrow outbound surface into the chat platform. Sends are fire-and-forget
/// from the core's point of view: a failed send never rolls back a ledger
/// mutation that already committed.
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// Posts a message and returns the platform message id.
    async fn post_message(&self, channel_id: &str, text: &str) -> Result<String, Error>;

    /// Adds a reaction to an existing message.
    async fn post_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        symbol: &str,
    ) -> Result<(), Error>;
}

/// Externally supplied admin predicate, consulted before every mutating
/// admin operation (but not before status reads).
#[async_trait]
pub trait AdminChecker: Send + Sync {
    async fn is_admin(&self, actor_id: &str, channel_id: &str) -> bool;
}
