// raffbot-core/src/services/lottery.rs

use rand::Rng;

use raffbot_common::models::giveaway::Giveaway;

/// Draws a winner with probability proportional to entry count, using the
/// supplied random source. Returns the winner and their entry count, or
/// `None` when nobody holds an entry.
///
/// Conceptually every participant appears `total_entries` times in a flat
/// pool and one slot is drawn uniformly; implemented as a cumulative-weight
/// walk over a single uniform draw in `[0, pool_size)`. Participants are
/// visited in stable (sorted) order, so a seeded rng yields a reproducible
/// draw in tests.
pub fn select_winner_with<R: Rng + ?Sized>(
    giveaway: &Giveaway,
    rng: &mut R,
) -> Option<(String, u64)> {
    let participants = giveaway.participants();
    if participants.is_empty() {
        return None;
    }
    let pool_size: u64 = participants
        .iter()
        .map(|p| giveaway.total_entries(p))
        .sum();
    // Unreachable through the credit paths, but defended: a pool with no
    // weight has no winner.
    if pool_size == 0 {
        return None;
    }

    let ticket = rng.random_range(0..pool_size);
    let mut cursor = 0u64;
    for participant in participants {
        let entries = giveaway.total_entries(&participant);
        cursor += entries;
        if ticket < cursor {
            return Some((participant, entries));
        }
    }
    None
}

/// Thread-rng convenience wrapper around [`select_winner_with`].
pub fn select_winner(giveaway: &Giveaway) -> Option<(String, u64)> {
    select_winner_with(giveaway, &mut rand::rng())
}
