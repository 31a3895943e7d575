//! Random source injected into the randomized estimators.
//!
//! Estimators never touch ambient random state; callers hand them a generator.
//! A [`RngSource`] builds one fresh generator per call, so concurrent requests
//! share nothing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type handed out by [`RngSource`]
pub type EstimatorRng = ChaCha8Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RngSource {
    /// Fresh OS entropy for every call
    #[default]
    Entropy,
    /// Every call starts from the same seed, making responses reproducible
    Seeded(u64),
}

impl RngSource {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(seed),
            None => Self::Entropy,
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    pub fn rng(&self) -> EstimatorRng {
        match self {
            Self::Entropy => ChaCha8Rng::from_entropy(),
            Self::Seeded(seed) => ChaCha8Rng::seed_from_u64(*seed),
        }
    }
}
