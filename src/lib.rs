//! This crate implements a repetition code with majority-vote decoding, together with a binary
//! symmetric channel (BSC) over which the code can be simulated. The encoder repeats every
//! information bit `n` times; the channel flips every transmitted bit independently with a fixed
//! probability `p`; and the decoder splits the received bits into blocks of `n` and outputs the
//! most frequent bit in each block.
//!
//! Besides the three building blocks in [`repetition`] and [`channel`], the crate provides a
//! round-trip driver and an error rate sweep in [`sim`], and a harness in [`picture`] that sends
//! the pixels of a greyscale image through the channel so that the effect of the code rate can be
//! seen.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng;
//! use repcode::{rng, sim, utils};
//!
//! let mut rng = rng::Rng::seed_from_u64(7);
//! let message = utils::bits_from_str("0110")?;
//! let message_hat = sim::simulate(&message, 3, 0.0, &mut rng)?;
//! assert_eq!(message_hat, message);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

pub mod channel;
mod common;
pub mod picture;
pub mod repetition;
pub mod rng;
pub mod sim;
pub mod utils;

pub use channel::BinarySymmetricChannel;
pub use common::{Bit, Error};
pub use repetition::{decoder, encoder};
