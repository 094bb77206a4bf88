// File: raffbot-common/src/models/mod.rs
pub mod events;
pub mod giveaway;

pub use events::{AdminCommand, AdminCommandKind, ReactionEvent, TipEvent};
pub use giveaway::{DrawOutcome, Giveaway, GiveawayStatus, ParticipantEntries, WinnerInfo};
