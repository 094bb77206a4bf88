// File: raffbot-common/src/models/giveaway.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single channel-scoped giveaway. The registry owns every instance;
/// nothing else keeps an independent reference.
///
/// Entries come from two independent sources: one free entry per reacting
/// participant, and paid entries bought by tipping, capped per participant
/// by `tip_entry_cap`. All fee arithmetic happens on smallest-unit token
/// integers; fiat values never reach the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Giveaway {
    pub channel_id: String,
    pub prize: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Price of one paid entry, in the smallest token unit (18 decimals).
    pub tip_entry_fee: u128,
    /// Maximum number of tip-derived entries one participant may hold.
    pub tip_entry_cap: u32,

    /// Free entries per participant (at most one each).
    pub reaction_entries: HashMap<String, u32>,
    /// Paid entries per participant; never exceeds `tip_entry_cap`.
    pub tip_entries: HashMap<String, u32>,

    pub is_active: bool,

    /// Message id of the posted announcement; reactions must target it.
    /// Absent until the announcement goes out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement_id: Option<String>,
}

impl Giveaway {
    pub fn new(
        channel_id: &str,
        prize: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        tip_entry_fee: u128,
        tip_entry_cap: u32,
    ) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            prize: prize.to_string(),
            start_time,
            end_time,
            tip_entry_fee,
            tip_entry_cap,
            reaction_entries: HashMap::new(),
            tip_entries: HashMap::new(),
            is_active: true,
            announcement_id: None,
        }
    }

    /// Shared expiry check used by both the periodic sweep and the lazy
    /// per-event path. Freezes entry acceptance; the record itself stays
    /// until an explicit end request draws the winner.
    pub fn ensure_not_expired(&mut self, now: DateTime<Utc>) {
        if self.is_active && now > self.end_time {
            self.is_active = false;
        }
    }

    /// Credits one free entry. Returns false without mutating when the
    /// giveaway is inactive or the participant already holds a free entry,
    /// so duplicate delivery of the same reaction event is harmless.
    pub fn credit_reaction(&mut self, participant: &str) -> bool {
        if !self.is_active {
            return false;
        }
        if self.reaction_entries.contains_key(participant) {
            return false;
        }
        self.reaction_entries.insert(participant.to_string(), 1);
        true
    }

    /// Credits paid entries for a tip of `token_amount` smallest units and
    /// returns how many were granted.
    ///
    /// Grants `floor(token_amount / tip_entry_fee)` entries, clamped to the
    /// participant's remaining cap headroom. Returns 0 when the giveaway is
    /// inactive, the tip is below one full entry, or the cap is exhausted.
    /// Any excess below a whole entry or beyond the cap is forfeited; the
    /// ledger keeps no partial-credit state.
    pub fn credit_tip(&mut self, participant: &str, token_amount: u128) -> u32 {
        if !self.is_active || self.tip_entry_fee == 0 {
            return 0;
        }
        let potential = token_amount / self.tip_entry_fee;
        if potential < 1 {
            return 0;
        }
        let current = self.tip_entries.get(participant).copied().unwrap_or(0);
        let remaining = self.tip_entry_cap.saturating_sub(current);
        if remaining == 0 {
            return 0;
        }
        let granted = potential.min(remaining as u128) as u32;
        self.tip_entries.insert(participant.to_string(), current + granted);
        granted
    }

    /// Combined free + paid entries for one participant.
    pub fn total_entries(&self, participant: &str) -> u64 {
        let reactions = self.reaction_entries.get(participant).copied().unwrap_or(0);
        let tips = self.tip_entries.get(participant).copied().unwrap_or(0);
        reactions as u64 + tips as u64
    }

    /// Deduplicated union of everyone holding any entry, sorted by id so
    /// iteration order is stable.
    pub fn participants(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .reaction_entries
            .keys()
            .chain(self.tip_entries.keys())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Total weight of the lottery pool.
    pub fn pool_size(&self) -> u64 {
        self.participants()
            .iter()
            .map(|p| self.total_entries(p))
            .sum()
    }

    /// Read-only snapshot for display, with the top `top_n` participants
    /// ranked by total entries (ties broken by participant id).
    pub fn to_status(&self, top_n: usize) -> GiveawayStatus {
        let participants = self.participants();
        let mut ranked: Vec<ParticipantEntries> = participants
            .iter()
            .map(|p| ParticipantEntries {
                participant_id: p.clone(),
                reaction_entries: self.reaction_entries.get(p).copied().unwrap_or(0),
                tip_entries: self.tip_entries.get(p).copied().unwrap_or(0),
                total: self.total_entries(p),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.participant_id.cmp(&b.participant_id))
        });
        ranked.truncate(top_n);

        GiveawayStatus {
            channel_id: self.channel_id.clone(),
            prize: self.prize.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            tip_entry_fee: self.tip_entry_fee,
            tip_entry_cap: self.tip_entry_cap,
            is_active: self.is_active,
            announcement_id: self.announcement_id.clone(),
            participant_count: participants.len(),
            total_entries: self.pool_size(),
            top_entries: ranked,
        }
    }
}

/// One leaderboard row in a status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEntries {
    pub participant_id: String,
    pub reaction_entries: u32,
    pub tip_entries: u32,
    pub total: u64,
}

/// Display snapshot of a giveaway, as returned by the status operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveawayStatus {
    pub channel_id: String,
    pub prize: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub tip_entry_fee: u128,
    pub tip_entry_cap: u32,
    pub is_active: bool,
    pub announcement_id: Option<String>,
    pub participant_count: usize,
    pub total_entries: u64,
    pub top_entries: Vec<ParticipantEntries>,
}

/// Winner of a completed draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerInfo {
    pub participant_id: String,
    pub entries: u64,
}

/// Result of ending a giveaway. `winner` is `None` when nobody entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub prize: String,
    pub winner: Option<WinnerInfo>,
    pub total_entries: u64,
    pub participant_count: usize,
}
