use serde::Serialize;

/// Score and move counters of a session.
///
/// Only committed engine moves count: no-effect attempts and hand edits
/// leave the counters untouched.
///
/// # Example
///
/// ```
/// use twenty48_engine::SessionStats;
///
/// let mut stats = SessionStats::new();
/// stats.record_move(8, 2);
/// stats.record_move(4, 1);
///
/// assert_eq!(stats.score(), 12);
/// assert_eq!(stats.moves(), 2);
/// assert_eq!(stats.merges(), 3);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    score: u64,
    moves: u64,
    merges: u64,
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            moves: 0,
            merges: 0,
        }
    }

    /// Sum of the score deltas of all committed moves.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn moves(&self) -> u64 {
        self.moves
    }

    #[must_use]
    pub const fn merges(&self) -> u64 {
        self.merges
    }

    pub fn record_move(&mut self, score_delta: u64, merges: usize) {
        self.score += score_delta;
        self.moves += 1;
        self.merges += merges as u64;
    }
}
