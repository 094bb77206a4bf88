// raffbot-core/src/tasks/expiry_sweep.rs

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::info;

use crate::services::registry::GiveawayRegistry;

/// Interval between expiry sweeps in production wiring.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns a background task that periodically marks overdue giveaways
/// expired. An expired giveaway stops accepting entries but keeps its
/// ledger until an explicit end request draws the winner.
pub fn spawn_expiry_sweep_task(
    registry: Arc<GiveawayRegistry>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(interval).await;
            let expired = registry.expire_due(Utc::now()).await;
            for channel_id in &expired {
                info!("Giveaway in channel {} expired; awaiting draw", channel_id);
            }
        }
    })
}
