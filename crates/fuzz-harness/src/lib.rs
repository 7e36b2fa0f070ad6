//! CommNet Fuzz Harness
//!
//! Property-based testing strategies for the CommNet kernel: antenna loads,
//! positioned craft, home worlds and difficulty settings.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(craft in craft_set(6)) {
//!         prop_assert!(craft.len() <= 6);
//!     }
//! }
//! ```

pub mod generators;
pub mod runner;

pub mod prelude {
    pub use crate::generators::*;
    pub use crate::runner::FuzzConfig;
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
