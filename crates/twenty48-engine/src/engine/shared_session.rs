use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

use crate::{
    EngineMoveError, NoEffectError, SetCellError,
    core::direction::Direction,
};

use super::{
    selector::MoveSelector,
    session::{AppliedMove, Session, Snapshot},
};

/// Cloneable, thread-safe handle to one [`Session`].
///
/// Every operation takes the lock once for its whole duration, so concurrent
/// callers observe the operations in some serial order. The lock is held
/// while a selector runs, which means the board it decides on is the board
/// the move is committed to.
///
/// A poisoned lock is recovered: session operations never leave a
/// half-applied state behind.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }
}

impl SharedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access, for compound operations such as
    /// "move, then spawn a tile".
    pub fn with<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn set_cell(&self, row: usize, col: usize, rank: u32) -> Result<(), SetCellError> {
        self.lock().set_cell(row, col, rank)
    }

    pub fn increase_cell(&self, row: usize, col: usize) -> Result<(), SetCellError> {
        self.lock().increase_cell(row, col)
    }

    pub fn decrease_cell(&self, row: usize, col: usize) -> Result<(), SetCellError> {
        self.lock().decrease_cell(row, col)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn randomize<R>(&self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.lock().randomize(rng);
    }

    pub fn apply_direction(&self, direction: Direction) -> Result<AppliedMove, NoEffectError> {
        self.lock().apply_direction(direction)
    }

    pub fn request_engine_move<S>(&self, selector: &mut S) -> Result<AppliedMove, EngineMoveError>
    where
        S: MoveSelector + ?Sized,
    {
        self.lock().request_engine_move(selector)
    }

    pub fn spawn_tile<R>(&self, rng: &mut R) -> Option<(usize, usize)>
    where
        R: Rng + ?Sized,
    {
        self.lock().spawn_tile(rng)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use crate::Board;

    use super::*;

    #[test]
    fn test_concurrent_moves_are_serialized() {
        let shared = SharedSession::new();
        shared.randomize(&mut Pcg32::seed_from_u64(9));

        let handles = (0..4usize)
            .map(|seed| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed as u64);
                    let mut total = 0;
                    for i in 0..200 {
                        let direction = Direction::ALL[(i + seed) % Direction::LEN];
                        let applied = shared.with(|session| {
                            let applied = session.apply_direction(direction).ok()?;
                            session.spawn_tile(&mut rng);
                            Some(applied)
                        });
                        total += applied.map_or(0, |a| a.score_delta);
                    }
                    total
                })
            })
            .collect::<Vec<_>>();

        let total = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .sum::<u64>();
        assert_eq!(shared.snapshot().score, total);
    }

    #[test]
    fn test_engine_move_holds_lock() {
        let shared = SharedSession::new();
        shared.set_cell(0, 0, 1).unwrap();
        shared.set_cell(0, 1, 1).unwrap();

        let other = shared.clone();
        let mut selector = |board: &Board| {
            // The session is locked for the duration of the selector call.
            assert!(other.inner.try_lock().is_err());
            assert_eq!(board.to_ranks()[0], [1, 1, 0, 0]);
            Some(Direction::Left)
        };
        let applied = shared.request_engine_move(&mut selector).unwrap();
        assert_eq!(applied.score_delta, 4);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let shared = SharedSession::new();
        shared.set_cell(1, 1, 3).unwrap();

        let other = shared.clone();
        let result = thread::spawn(move || {
            other.with::<()>(|_| panic!("selector crashed"));
        })
        .join();
        assert!(result.is_err());

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.board.get(1, 1).unwrap().get(), 3);
        shared.clear();
        assert!(shared.snapshot().board.is_empty());
    }
}
