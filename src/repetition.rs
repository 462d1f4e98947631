//! Encoder and majority-vote decoder for a repetition code

use crate::{Bit, Error};

/// Returns code bits from repetition encoder for given information bits.
///
/// # Parameters
///
/// - `info_bits`: Information bits to be encoded.
///
/// - `code_rate`: Number of times each information bit is repeated. Must be positive.
///
/// # Returns
///
/// - `code_bits`: Code bits from the repetition encoder, in which each information bit appears as
///   a contiguous run of `code_rate` copies.
///
/// # Errors
///
/// Returns an error if `code_rate` is `0`, or if the number of code bits would not fit in memory
/// addressable by a `Vec`.
///
/// # Examples
/// ```
/// use repcode::{encoder, utils};
///
/// let info_bits = utils::bits_from_str("0110")?;
/// let code_bits = encoder(&info_bits, 3)?;
/// assert_eq!(utils::bits_to_string(&code_bits), "000111111000");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encoder(info_bits: &[Bit], code_rate: usize) -> Result<Vec<Bit>, Error> {
    check_code_rate(code_rate)?;
    let num_code_bits = info_bits
        .len()
        .checked_mul(code_rate)
        .filter(|&num| isize::try_from(num).is_ok())
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "Code rate {code_rate} is too large for {} information bits",
                info_bits.len()
            ))
        })?;
    let mut code_bits = Vec::with_capacity(num_code_bits);
    for &bit in info_bits {
        code_bits.extend(std::iter::repeat_n(bit, code_rate));
    }
    Ok(code_bits)
}

/// Returns information bit decisions from majority-vote decoder for given code bits.
///
/// # Parameters
///
/// - `code_bits`: Code bits (typically at the output of a noisy channel).
///
/// - `code_rate`: Number of code bits per information bit. Must be positive.
///
/// # Returns
///
/// - `info_bits_hat`: One decision per block of `code_rate` consecutive code bits, namely the bit
///   that occurs most often in the block. If `code_rate` does not divide `code_bits.len()`, then
///   the last block is shorter and is decoded by majority over the bits it has. If a block holds
///   as many `Zero`s as `One`s (possible only for blocks of even length), then the first bit of
///   the block is taken as the decision.
///
/// # Errors
///
/// Returns an error if `code_rate` is `0`.
///
/// # Examples
/// ```
/// use repcode::{decoder, utils};
///
/// let code_bits = utils::bits_from_str("101")?;
/// let info_bits_hat = decoder(&code_bits, 3)?;
/// assert_eq!(utils::bits_to_string(&info_bits_hat), "1");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decoder(code_bits: &[Bit], code_rate: usize) -> Result<Vec<Bit>, Error> {
    check_code_rate(code_rate)?;
    Ok(code_bits.chunks(code_rate).map(majority).collect())
}

/// Checks validity of code rate.
pub(crate) fn check_code_rate(code_rate: usize) -> Result<(), Error> {
    if code_rate == 0 {
        return Err(Error::InvalidParameter(
            "Code rate must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

/// Returns most frequent bit in a nonempty block, with ties going to the first bit of the block.
fn majority(block: &[Bit]) -> Bit {
    let num_ones = block.iter().filter(|&&b| b == Bit::One).count();
    let num_zeros = block.len() - num_ones;
    match num_ones.cmp(&num_zeros) {
        std::cmp::Ordering::Greater => Bit::One,
        std::cmp::Ordering::Less => Bit::Zero,
        std::cmp::Ordering::Equal => block[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_encoder() {
        // Invalid input
        assert!(encoder(&[One, Zero], 0).is_err());
        assert!(matches!(
            encoder(&[One, Zero], usize::MAX),
            Err(Error::InvalidParameter(_))
        ));
        assert!(encoder(&[One], usize::MAX).is_err());
        // Valid input
        assert!(encoder(&[], 3).unwrap().is_empty());
        assert!(encoder(&[], usize::MAX).unwrap().is_empty());
        assert_eq!(encoder(&[One, Zero], 1).unwrap(), [One, Zero]);
        assert_eq!(
            encoder(&[Zero, One, One, Zero], 3).unwrap(),
            [Zero, Zero, Zero, One, One, One, One, One, One, Zero, Zero, Zero]
        );
        let info_bits = [One, Zero, Zero, One, Zero];
        for code_rate in 1 .. 8 {
            let code_bits = encoder(&info_bits, code_rate).unwrap();
            assert_eq!(code_bits.len(), info_bits.len() * code_rate);
            for (chunk, &bit) in code_bits.chunks_exact(code_rate).zip(info_bits.iter()) {
                assert!(chunk.iter().all(|&b| b == bit));
            }
        }
    }

    #[test]
    fn test_decoder() {
        // Invalid input
        assert!(decoder(&[One, Zero], 0).is_err());
        // Valid input
        assert!(decoder(&[], 3).unwrap().is_empty());
        assert_eq!(decoder(&[One, Zero, One], 3).unwrap(), [One]);
        assert_eq!(
            decoder(&[Zero, One, Zero, One, One, Zero, Zero, Zero, Zero], 3).unwrap(),
            [Zero, One, Zero]
        );
        // Short last block
        assert_eq!(decoder(&[One, One, One, Zero, Zero], 3).unwrap(), [One, Zero]);
        assert_eq!(decoder(&[One, One, One, Zero], 3).unwrap(), [One, Zero]);
        // Ties
        assert_eq!(decoder(&[One, Zero, Zero, One], 2).unwrap(), [One, Zero]);
        assert_eq!(decoder(&[Zero, One, One, Zero], 4).unwrap(), [Zero]);
    }

    #[test]
    fn test_encoder_decoder() {
        let info_bits = [One, Zero, Zero, One, One, One, Zero];
        for code_rate in 1 .. 10 {
            let code_bits = encoder(&info_bits, code_rate).unwrap();
            assert_eq!(decoder(&code_bits, code_rate).unwrap(), info_bits);
        }
    }

    #[test]
    fn test_majority() {
        for len in 1 .. 10 {
            assert_eq!(majority(&vec![Zero; len]), Zero);
            assert_eq!(majority(&vec![One; len]), One);
        }
        assert_eq!(majority(&[One, Zero, Zero]), Zero);
        assert_eq!(majority(&[One, Zero, One]), One);
        assert_eq!(majority(&[One, Zero]), One);
        assert_eq!(majority(&[Zero, One]), Zero);
    }
}
