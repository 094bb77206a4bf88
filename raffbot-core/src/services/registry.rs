// raffbot-core/src/services/registry.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use raffbot_common::models::giveaway::{Giveaway, GiveawayStatus};
use raffbot_common::Error;

/// Owns every live giveaway record, keyed by channel id.
///
/// A single lock around the map keeps each credit sequence atomic under
/// concurrent event delivery: `credit_tip`'s read-cap/compare/write must
/// never interleave with another tip from the same participant, and the
/// sweep takes the same lock as every per-event path.
pub struct GiveawayRegistry {
    giveaways: Mutex<HashMap<String, Giveaway>>,
}

impl GiveawayRegistry {
    pub fn new() -> Self {
        Self {
            giveaways: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a new giveaway. Any existing record for the channel blocks
    /// creation, including an expired-but-undrawn one; it has to be ended
    /// (and its winner drawn) first.
    pub async fn create(&self, giveaway: Giveaway) -> Result<(), Error> {
        let mut map = self.giveaways.lock().await;
        if map.contains_key(&giveaway.channel_id) {
            return Err(Error::AlreadyActive(giveaway.channel_id.clone()));
        }
        info!(
            "Registered giveaway in channel {} (prize: {}, ends {})",
            giveaway.channel_id, giveaway.prize, giveaway.end_time
        );
        map.insert(giveaway.channel_id.clone(), giveaway);
        Ok(())
    }

    /// Stores the announcement message id reactions must target.
    pub async fn attach_announcement(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), Error> {
        let mut map = self.giveaways.lock().await;
        let giveaway = map
            .get_mut(channel_id)
            .ok_or_else(|| Error::NoActiveGiveaway(channel_id.to_string()))?;
        giveaway.announcement_id = Some(message_id.to_string());
        Ok(())
    }

    /// Re-prices entries for the channel's current giveaway. Lifecycle state
    /// is untouched.
    pub async fn set_entry_fee(&self, channel_id: &str, fee: u128) -> Result<(), Error> {
        if fee == 0 {
            return Err(Error::InvalidAmount("entry fee must be positive".into()));
        }
        let mut map = self.giveaways.lock().await;
        let giveaway = map
            .get_mut(channel_id)
            .ok_or_else(|| Error::NoActiveGiveaway(channel_id.to_string()))?;
        giveaway.tip_entry_fee = fee;
        Ok(())
    }

    /// Adjusts the per-participant cap on paid entries. Entries already
    /// granted above a lowered cap stay; only future credits see the cap.
    pub async fn set_entry_cap(&self, channel_id: &str, cap: u32) -> Result<(), Error> {
        if cap == 0 {
            return Err(Error::InvalidAmount("entry cap must be positive".into()));
        }
        let mut map = self.giveaways.lock().await;
        let giveaway = map
            .get_mut(channel_id)
            .ok_or_else(|| Error::NoActiveGiveaway(channel_id.to_string()))?;
        giveaway.tip_entry_cap = cap;
        Ok(())
    }

    /// Credits one free entry if the giveaway is still active and the
    /// reaction targeted the announcement message. Expiry is checked lazily
    /// before crediting.
    pub async fn credit_reaction(
        &self,
        channel_id: &str,
        participant: &str,
        message_id: &str,
        now: DateTime<Utc>,
    ) -> bool {
        let mut map = self.giveaways.lock().await;
        let Some(giveaway) = map.get_mut(channel_id) else {
            return false;
        };
        giveaway.ensure_not_expired(now);
        if !giveaway.is_active {
            return false;
        }
        if giveaway.announcement_id.as_deref() != Some(message_id) {
            return false;
        }
        let credited = giveaway.credit_reaction(participant);
        if credited {
            debug!(
                "Reaction entry credited to {} in channel {}",
                participant, channel_id
            );
        }
        credited
    }

    /// Credits paid entries for a tip and returns how many were granted.
    /// 0 means the channel has no active giveaway, the tip was below one
    /// full entry, or the participant's cap is exhausted.
    pub async fn credit_tip(
        &self,
        channel_id: &str,
        participant: &str,
        token_amount: u128,
        now: DateTime<Utc>,
    ) -> u32 {
        let mut map = self.giveaways.lock().await;
        let Some(giveaway) = map.get_mut(channel_id) else {
            return 0;
        };
        giveaway.ensure_not_expired(now);
        let granted = giveaway.credit_tip(participant, token_amount);
        if granted > 0 {
            debug!(
                "{} tip entries credited to {} in channel {} ({} total)",
                granted,
                participant,
                channel_id,
                giveaway.total_entries(participant)
            );
        }
        granted
    }

    /// Read-only snapshot of the channel's giveaway.
    pub async fn snapshot(&self, channel_id: &str, top_n: usize) -> Result<GiveawayStatus, Error> {
        let map = self.giveaways.lock().await;
        let giveaway = map
            .get(channel_id)
            .ok_or_else(|| Error::NoActiveGiveaway(channel_id.to_string()))?;
        Ok(giveaway.to_status(top_n))
    }

    /// Freezes the record and removes it for the winner draw. Removal
    /// happens under the lock, so no credit can land between the freeze
    /// and the draw.
    pub async fn take_for_draw(&self, channel_id: &str) -> Result<Giveaway, Error> {
        let mut map = self.giveaways.lock().await;
        let mut giveaway = map
            .remove(channel_id)
            .ok_or_else(|| Error::NoActiveGiveaway(channel_id.to_string()))?;
        giveaway.is_active = false;
        Ok(giveaway)
    }

    /// Sweep body: marks every overdue active giveaway expired and returns
    /// the affected channels. Expired records keep their entries until an
    /// explicit end request draws the winner.
    pub async fn expire_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut map = self.giveaways.lock().await;
        let mut expired = Vec::new();
        for (channel_id, giveaway) in map.iter_mut() {
            if giveaway.is_active && now > giveaway.end_time {
                giveaway.is_active = false;
                expired.push(channel_id.clone());
            }
        }
        expired
    }
}

impl Default for GiveawayRegistry {
    fn default() -> Self {
        Self::new()
    }
}
