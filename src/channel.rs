//! Binary symmetric channel
//!
//! Every bit sent through the channel is flipped with probability `p`, independently of all other
//! bits. The flips are Bernoulli trials drawn from a generator supplied by the caller, so that
//! seeded generators give reproducible channel outputs.

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::{Bit, Error};

/// Binary symmetric channel with a given bit error probability
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct BinarySymmetricChannel {
    /// Probability that a transmitted bit is flipped
    error_prob: f64,
    /// Distribution of the flip events
    distr: Bernoulli,
}

impl BinarySymmetricChannel {
    /// Returns binary symmetric channel with given bit error probability.
    ///
    /// # Parameters
    ///
    /// - `error_prob`: Probability that a transmitted bit is flipped. Must be in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `error_prob` is not in `[0, 1]` (this includes NaN).
    ///
    /// # Examples
    ///
    /// ```
    /// use repcode::BinarySymmetricChannel;
    ///
    /// let channel = BinarySymmetricChannel::new(0.1)?;
    /// assert!(BinarySymmetricChannel::new(1.5).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(error_prob: f64) -> Result<Self, Error> {
        check_error_prob(error_prob)?;
        let distr = Bernoulli::new(error_prob)
            .map_err(|e| Error::InvalidParameter(format!("{e} (found {error_prob})")))?;
        Ok(Self { error_prob, distr })
    }

    /// Returns bit error probability of the channel.
    #[must_use]
    pub fn error_prob(&self) -> f64 {
        self.error_prob
    }

    /// Returns channel output for given channel input.
    ///
    /// # Parameters
    ///
    /// - `bits`: Bits to be transmitted over the channel.
    ///
    /// - `rng`: Random number generator to be used.
    ///
    /// # Returns
    ///
    /// - `bits_out`: Bits at the channel output, of the same length as `bits`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use repcode::{rng, BinarySymmetricChannel, Bit};
    ///
    /// let mut rng = rng::Rng::seed_from_u64(0);
    /// let channel = BinarySymmetricChannel::new(1.0)?;
    /// let bits_out = channel.transmit(&[Bit::One, Bit::Zero], &mut rng);
    /// assert_eq!(bits_out, [Bit::Zero, Bit::One]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn transmit<R: Rng + ?Sized>(&self, bits: &[Bit], rng: &mut R) -> Vec<Bit> {
        bits.iter()
            .map(|&b| if self.distr.sample(rng) { b.flipped() } else { b })
            .collect()
    }
}

/// Returns output of binary symmetric channel with given error probability for given input.
///
/// # Parameters
///
/// - `error_prob`: Probability that a transmitted bit is flipped. Must be in `[0, 1]`.
///
/// - `bits`: Bits to be transmitted over the channel.
///
/// - `rng`: Random number generator to be used.
///
/// # Errors
///
/// Returns an error if `error_prob` is not in `[0, 1]`.
pub fn noise<R: Rng + ?Sized>(
    error_prob: f64,
    bits: &[Bit],
    rng: &mut R,
) -> Result<Vec<Bit>, Error> {
    Ok(BinarySymmetricChannel::new(error_prob)?.transmit(bits, rng))
}

/// Checks validity of bit error probability.
pub(crate) fn check_error_prob(error_prob: f64) -> Result<(), Error> {
    if (0.0 ..= 1.0).contains(&error_prob) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "Error probability must be in [0, 1] (found {error_prob})"
        )))
    }
}
