//! Fuzz run configuration
//!
//! Property suites pull their proptest config from here so a CI job can turn
//! the case count up through the environment without touching the tests.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable that overrides [`FuzzConfig::cases`]
pub const CASES_ENV: &str = "COMMNET_FUZZ_CASES";

/// Fuzz test configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FuzzConfig {
    /// Number of test cases to run
    pub cases: u32,
    /// Maximum shrink iterations on failure
    pub max_shrink_iters: u32,
    /// Reject limit before a strategy is considered too narrow
    pub max_global_rejects: u32,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
            max_global_rejects: 4096,
        }
    }
}

impl FuzzConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the case count taken from `COMMNET_FUZZ_CASES` when set
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(CASES_ENV).ok().and_then(|v| v.parse().ok()) {
            Some(cases) => config.cases(cases),
            None => config,
        }
    }

    pub fn cases(mut self, n: u32) -> Self {
        self.cases = n;
        self
    }

    pub fn max_shrink_iters(mut self, n: u32) -> Self {
        self.max_shrink_iters = n;
        self
    }

    /// Generate proptest config from this
    pub fn to_proptest_config(&self) -> proptest::test_runner::Config {
        debug!(cases = self.cases, max_shrink_iters = self.max_shrink_iters, "Fuzz config");
        proptest::test_runner::Config {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            max_global_rejects: self.max_global_rejects,
            ..proptest::test_runner::Config::default()
        }
    }
}
