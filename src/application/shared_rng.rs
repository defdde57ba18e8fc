//! Process-wide random source for template picks and the correction gate.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, PoisonError};

/// A `StdRng` behind a mutex.
///
/// Access is closure-scoped through [`SharedRng::with`], so the lock can
/// never be held across an `.await`.
#[derive(Debug)]
pub struct SharedRng {
    inner: Mutex<StdRng>,
}

impl SharedRng {
    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic source for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Runs `f` with exclusive access to the generator.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let a = SharedRng::seeded(17);
        let b = SharedRng::seeded(17);
        let xs: Vec<u32> = (0..5).map(|_| a.with(|r| r.gen())).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.with(|r| r.gen())).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn usable_from_many_threads() {
        let rng = std::sync::Arc::new(SharedRng::seeded(1));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rng = rng.clone();
                std::thread::spawn(move || rng.with(|r| r.gen_range(0..10)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() < 10);
        }
    }
}
