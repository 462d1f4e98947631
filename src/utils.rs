//! # Some useful functions for simulating code performance
//!
//! The [`random_bits`] function returns a given number of random bits; the [`bits_from_str`] and
//! [`bits_to_string`] functions convert between bits and binary strings such as `"0110"`; and
//! the [`error_count`] function returns the number of errors in a sequence with respect to a
//! reference sequence.
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use rand::SeedableRng;
//! use repcode::{rng, utils};
//!
//! let mut rng = rng::Rng::seed_from_u64(0);
//! let bits = utils::random_bits(40, &mut rng);
//! let bits_str = utils::bits_to_string(&bits);
//! let bits_again = utils::bits_from_str(&bits_str)?;
//! assert_eq!(utils::error_count(&bits_again, &bits), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rand::Rng;

use crate::{Bit, Error};

/// Returns given number of random bits.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `bits`: Random bits, with `Zero` and `One` equally likely.
pub fn random_bits<R: Rng + ?Sized>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0 .. num_bits)
        .map(|_| {
            if rng.random_bool(0.5) {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect()
}

/// Returns bits corresponding to a binary string.
///
/// # Errors
///
/// Returns an error if `s` contains any character other than `'0'` and `'1'`.
pub fn bits_from_str(s: &str) -> Result<Vec<Bit>, Error> {
    s.chars().map(Bit::try_from).collect()
}

/// Returns binary string corresponding to given bits.
#[must_use]
pub fn bits_to_string(bits: &[Bit]) -> String {
    bits.iter().map(|&b| char::from(b)).collect()
}

/// Returns number of errors in a sequence with respect to a reference sequence.
///
/// # Parameters
///
/// - `seq`: Sequence in which errors must be counted.
///
/// - `ref_seq`: Reference sequence to which the given sequence is compared.
///
/// # Returns
///
/// - `err_count`: Number of positions in which the two sequences differ. If they are of different
///   lengths, then the longer sequence is effectively truncated to the length of the shorter one.
pub fn error_count<T: PartialEq>(seq: &[T], ref_seq: &[T]) -> usize {
    ref_seq
        .iter()
        .zip(seq.iter())
        .filter(|&(x, y)| x != y)
        .count()
}
