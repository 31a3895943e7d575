use std::time::{Instant, SystemTime};

use mentor_algo::RngSource;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    rng_source: RngSource,
    memory_limit_bytes: Option<u64>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            rng_source: config.rng_source(),
            memory_limit_bytes: config.memory_limit_bytes,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    /// Source of the per-request generators handed to the estimators
    pub fn rng_source(&self) -> &RngSource {
        &self.rng_source
    }

    pub fn memory_limit_bytes(&self) -> Option<u64> {
        self.memory_limit_bytes
    }
}
