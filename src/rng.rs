//! # Reproducible random numbers
//!
//! All randomness in this crate is drawn from a generator passed in by the caller. The binary
//! and the image harness use the [`ChaCha8Rng`] generator from the [rand_chacha] crate, which is
//! seedable and supports independent streams for parallel work.
//!
//! # Examples
//!
//! ```
//! use rand::{RngCore, SeedableRng};
//! use repcode::rng;
//!
//! let mut rng1 = rng::Rng::seed_from_u64(42);
//! let mut rng2 = rng::Rng::seed_from_u64(42);
//! assert_eq!(rng1.next_u64(), rng2.next_u64());
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator used throughout this crate wherever one must be constructed.
pub type Rng = ChaCha8Rng;

/// Returns generator seeded from `seed`, or from the thread-local generator if `seed` is `None`.
#[must_use]
pub fn from_optional_seed(seed: Option<u64>) -> Rng {
    match seed {
        Some(seed) => Rng::seed_from_u64(seed),
        None => Rng::from_rng(&mut rand::rng()),
    }
}
