//! Seeded random source for randomized agents.
//!
//! Each agent owns one generator behind a mutex. A computation never holds
//! the lock while searching: it forks a private generator up front, so an
//! abandoned computation cannot stall the next turn.

use std::sync::{Mutex, PoisonError};

/// How an agent's generator is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Fresh OS-provided randomness.
    #[default]
    Entropy,
    /// Seeded once; the sequence continues across games.
    Fixed(u64),
    /// Reseeded at the start of every game with `seed + game index`.
    PerGame(u64),
}

impl SeedPolicy {
    fn initial_rng(self) -> fastrand::Rng {
        match self {
            SeedPolicy::Entropy => fastrand::Rng::new(),
            SeedPolicy::Fixed(seed) | SeedPolicy::PerGame(seed) => fastrand::Rng::with_seed(seed),
        }
    }
}

/// A generator shared between an agent and the computations it spawns.
#[derive(Debug)]
pub struct SharedRng {
    policy: SeedPolicy,
    inner: Mutex<fastrand::Rng>,
}

impl SharedRng {
    pub fn new(policy: SeedPolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(policy.initial_rng()),
        }
    }

    /// Derive an independent generator, advancing the shared one.
    pub fn fork(&self) -> fastrand::Rng {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fork()
    }

    /// Apply the per-game reseed, if the policy asks for one.
    pub fn start_game(&self, game: u64) {
        if let SeedPolicy::PerGame(seed) = self.policy {
            let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            *rng = fastrand::Rng::with_seed(seed.wrapping_add(game));
        }
    }
}
