// File: raffbot-common/src/models/events.rs

use serde::{Deserialize, Serialize};

/// A reaction added to a message, as delivered by the channel gateway.
/// Only reactions carrying the designated giveaway symbol on the
/// announcement message earn an entry; everything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub channel_id: String,
    pub participant_id: String,
    pub message_id: String,
    pub symbol: String,
}

/// An on-chain tip observed by the gateway. Only tips addressed to the
/// bot's own address are relevant; `token_amount` is in the smallest
/// token unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipEvent {
    pub channel_id: String,
    pub recipient_address: String,
    pub sender_address: String,
    pub token_amount: u128,
}

/// A slash command dispatched by the gateway, pre-parsed into one of the
/// supported kinds. Authorization happens in the orchestrator, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCommand {
    pub channel_id: String,
    pub actor_id: String,
    pub kind: AdminCommandKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AdminCommandKind {
    Create { prize: String, duration: String },
    End,
    Status,
    /// Re-price entries for the current giveaway in this channel.
    SetFee { fiat_amount: f64 },
    /// Change the default fee frozen into future giveaways.
    SetDefaultFee { fiat_amount: f64 },
    SetCap { cap: u32 },
    SetRate { fiat_per_token: f64 },
}
