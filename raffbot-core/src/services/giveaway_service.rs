// raffbot-core/src/services/giveaway_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use raffbot_common::models::events::{AdminCommand, AdminCommandKind, ReactionEvent, TipEvent};
use raffbot_common::models::giveaway::{DrawOutcome, Giveaway, GiveawayStatus, WinnerInfo};
use raffbot_common::traits::gateway_traits::{AdminChecker, ChannelGateway};
use raffbot_common::Error;

use crate::currency::{self, format_fiat};
use crate::services::lottery;
use crate::services::pricing::PricingConfig;
use crate::services::registry::GiveawayRegistry;
use crate::utils::duration::parse_duration;

/// Reaction symbol a giveaway announcement is seeded with; only reactions
/// carrying it count for a free entry.
pub const GIVEAWAY_REACTION: &str = "🎉";

/// Default cap on tip-derived entries per participant, until an admin
/// adjusts it for a running giveaway.
pub const DEFAULT_TIP_ENTRY_CAP: u32 = 10;

/// Leaderboard rows included in a status snapshot.
const STATUS_TOP_N: usize = 5;

/// Facade the gateway's event handlers call. Composes the registry, the
/// pricing context, and the lottery behind the operations that mirror
/// external commands and events.
pub struct GiveawayService {
    registry: Arc<GiveawayRegistry>,
    pricing: Arc<PricingConfig>,
    gateway: Arc<dyn ChannelGateway>,
    admin_checker: Arc<dyn AdminChecker>,
    /// Tip address identifying this bot; tips to anyone else are ignored.
    bot_address: String,
}

impl GiveawayService {
    pub fn new(
        registry: Arc<GiveawayRegistry>,
        pricing: Arc<PricingConfig>,
        gateway: Arc<dyn ChannelGateway>,
        admin_checker: Arc<dyn AdminChecker>,
        bot_address: impl Into<String>,
    ) -> Self {
        debug!("Initializing GiveawayService");
        Self {
            registry,
            pricing,
            gateway,
            admin_checker,
            bot_address: bot_address.into(),
        }
    }

    /// The registry backing this service, for wiring the expiry sweep.
    pub fn registry(&self) -> &Arc<GiveawayRegistry> {
        &self.registry
    }

    /// Creates a giveaway in the channel, freezing the current default fee
    /// and exchange rate into the record, then posts the announcement and
    /// seeds it with the giveaway reaction.
    ///
    /// Announcement delivery is fire-and-forget: a gateway failure leaves
    /// the record in place without an announcement id, to be attached later.
    pub async fn create(
        &self,
        channel_id: &str,
        prize: &str,
        duration_str: &str,
    ) -> Result<GiveawayStatus, Error> {
        let duration = parse_duration(duration_str)?;
        let rate = self.pricing.fiat_per_token();
        let fee_fiat = self.pricing.default_entry_fee_fiat();
        let fee = currency::fiat_to_token(fee_fiat, rate)?;

        let now = Utc::now();
        // A duration can fit in Duration yet still push the end past the
        // representable DateTime range; reject it like any bad token.
        let end_time = now
            .checked_add_signed(duration)
            .ok_or_else(|| Error::InvalidDuration(duration_str.to_string()))?;
        let giveaway = Giveaway::new(channel_id, prize, now, end_time, fee, DEFAULT_TIP_ENTRY_CAP);
        self.registry.create(giveaway).await?;
        info!(
            "Giveaway created in channel {}: {} for {} (fee {} fiat)",
            channel_id, prize, duration_str, fee_fiat
        );

        let announcement = format!(
            "🎁 GIVEAWAY: {}! React with {} for a free entry, or tip ${} worth per extra entry (max {} paid entries). Ends in {}.",
            prize,
            GIVEAWAY_REACTION,
            format_fiat(fee_fiat),
            DEFAULT_TIP_ENTRY_CAP,
            duration_str
        );
        match self.gateway.post_message(channel_id, &announcement).await {
            Ok(message_id) => {
                if let Err(e) = self
                    .gateway
                    .post_reaction(channel_id, &message_id, GIVEAWAY_REACTION)
                    .await
                {
                    warn!("Failed to seed announcement reaction: {}", e);
                }
                self.registry
                    .attach_announcement(channel_id, &message_id)
                    .await?;
            }
            Err(e) => {
                warn!(
                    "Failed to post giveaway announcement in channel {}: {}",
                    channel_id, e
                );
            }
        }

        self.registry.snapshot(channel_id, STATUS_TOP_N).await
    }

    /// Handles a reaction event. Returns true when a free entry was
    /// credited; foreign symbols, foreign messages, duplicates, and
    /// expired giveaways all fall through as a quiet no-op.
    pub async fn record_reaction(&self, event: &ReactionEvent) -> bool {
        if event.symbol != GIVEAWAY_REACTION {
            return false;
        }
        self.registry
            .credit_reaction(
                &event.channel_id,
                &event.participant_id,
                &event.message_id,
                Utc::now(),
            )
            .await
    }

    /// Handles a tip event and returns the number of entries granted.
    /// Tips not addressed to the bot are ignored; a zero amount is rejected
    /// before it can reach the ledger.
    pub async fn record_tip(&self, event: &TipEvent) -> Result<u32, Error> {
        if event.recipient_address != self.bot_address {
            return Ok(0);
        }
        if event.token_amount == 0 {
            return Err(Error::InvalidAmount("tip amount must be positive".into()));
        }

        let granted = self
            .registry
            .credit_tip(
                &event.channel_id,
                &event.sender_address,
                event.token_amount,
                Utc::now(),
            )
            .await;

        if granted > 0 {
            info!(
                "Tip from {} in channel {} granted {} entries",
                event.sender_address, event.channel_id, granted
            );
            let confirmation = format!(
                "Thanks for the tip, {}! {} giveaway {} added.",
                event.sender_address,
                granted,
                if granted == 1 { "entry" } else { "entries" }
            );
            if let Err(e) = self
                .gateway
                .post_message(&event.channel_id, &confirmation)
                .await
            {
                warn!(
                    "Failed to send tip confirmation in channel {}: {}",
                    event.channel_id, e
                );
            }
        }
        Ok(granted)
    }

    /// Ends the channel's giveaway: freezes and removes the record, draws
    /// the winner, and returns the outcome. After this the channel is free
    /// for a new giveaway.
    pub async fn end(&self, channel_id: &str) -> Result<DrawOutcome, Error> {
        let giveaway = self.registry.take_for_draw(channel_id).await?;
        let participant_count = giveaway.participants().len();
        let total_entries = giveaway.pool_size();
        let winner = lottery::select_winner(&giveaway).map(|(participant_id, entries)| {
            WinnerInfo {
                participant_id,
                entries,
            }
        });

        match &winner {
            Some(w) => info!(
                "Giveaway in channel {} ended: {} won {} with {}/{} entries",
                channel_id, w.participant_id, giveaway.prize, w.entries, total_entries
            ),
            None => info!(
                "Giveaway in channel {} ended with no entries",
                channel_id
            ),
        }

        Ok(DrawOutcome {
            prize: giveaway.prize,
            winner,
            total_entries,
            participant_count,
        })
    }

    /// Read-only status snapshot; not gated on admin.
    pub async fn status(&self, channel_id: &str) -> Result<GiveawayStatus, Error> {
        self.registry.snapshot(channel_id, STATUS_TOP_N).await
    }

    /// Entry point for slash-command dispatch. Every expected failure is
    /// converted into a short human-readable reply and posted back to the
    /// channel; nothing here retries or panics. Returns the reply text.
    pub async fn handle_admin_command(&self, cmd: &AdminCommand) -> String {
        let reply = match self.dispatch_admin(cmd).await {
            Ok(text) => text,
            Err(e) => {
                debug!(
                    "Admin command from {} in channel {} rejected: {}",
                    cmd.actor_id, cmd.channel_id, e
                );
                e.to_string()
            }
        };
        if let Err(e) = self.gateway.post_message(&cmd.channel_id, &reply).await {
            warn!(
                "Failed to deliver command reply in channel {}: {}",
                cmd.channel_id, e
            );
        }
        reply
    }

    async fn dispatch_admin(&self, cmd: &AdminCommand) -> Result<String, Error> {
        // Status is a read and stays open to everyone; every other kind
        // mutates and goes through the admin predicate.
        if !matches!(cmd.kind, AdminCommandKind::Status)
            && !self
                .admin_checker
                .is_admin(&cmd.actor_id, &cmd.channel_id)
                .await
        {
            return Err(Error::NotAuthorized);
        }

        match &cmd.kind {
            AdminCommandKind::Create { prize, duration } => {
                let status = self.create(&cmd.channel_id, prize, duration).await?;
                Ok(format!(
                    "Giveaway started: {} (ends {})",
                    status.prize,
                    status.end_time.format("%Y-%m-%d %H:%M UTC")
                ))
            }
            AdminCommandKind::End => {
                let outcome = self.end(&cmd.channel_id).await?;
                Ok(match outcome.winner {
                    Some(w) => format!(
                        "🎉 {} wins \"{}\" with {} of {} entries!",
                        w.participant_id, outcome.prize, w.entries, outcome.total_entries
                    ),
                    None => format!("Giveaway \"{}\" ended with no entries.", outcome.prize),
                })
            }
            AdminCommandKind::Status => {
                let status = self.status(&cmd.channel_id).await?;
                Ok(self.format_status(&status))
            }
            AdminCommandKind::SetFee { fiat_amount } => {
                let fee = currency::fiat_to_token(*fiat_amount, self.pricing.fiat_per_token())?;
                self.registry.set_entry_fee(&cmd.channel_id, fee).await?;
                Ok(format!(
                    "Entry fee set to ${} for the current giveaway.",
                    format_fiat(*fiat_amount)
                ))
            }
            AdminCommandKind::SetDefaultFee { fiat_amount } => {
                self.pricing.set_default_entry_fee(*fiat_amount)?;
                Ok(format!(
                    "Default entry fee set to ${} for future giveaways.",
                    format_fiat(*fiat_amount)
                ))
            }
            AdminCommandKind::SetCap { cap } => {
                self.registry.set_entry_cap(&cmd.channel_id, *cap).await?;
                Ok(format!("Paid-entry cap set to {} per participant.", cap))
            }
            AdminCommandKind::SetRate { fiat_per_token } => {
                self.pricing.set_fiat_per_token(*fiat_per_token)?;
                Ok(format!(
                    "Exchange rate set to ${} per token.",
                    format_fiat(*fiat_per_token)
                ))
            }
        }
    }

    fn format_status(&self, status: &GiveawayStatus) -> String {
        let fee_fiat = currency::token_to_fiat(status.tip_entry_fee, self.pricing.fiat_per_token())
            .map(|f| format_fiat(f))
            .unwrap_or_else(|_| "?".to_string());
        let mut lines = vec![
            format!(
                "🎁 {} — {} | {} entries from {} participants | fee ${} (cap {})",
                status.prize,
                if status.is_active { "active" } else { "ended, awaiting draw" },
                status.total_entries,
                status.participant_count,
                fee_fiat,
                status.tip_entry_cap
            ),
        ];
        for (rank, row) in status.top_entries.iter().enumerate() {
            lines.push(format!(
                "{}. {} — {} ({} free, {} paid)",
                rank + 1,
                row.participant_id,
                row.total,
                row.reaction_entries,
                row.tip_entries
            ));
        }
        lines.join("\n")
    }
}
