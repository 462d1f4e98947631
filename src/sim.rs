//! Simulation of a repetition code over a binary symmetric channel
//!
//! [`simulate`] sends one message through the encoder, the channel and the decoder. The
//! [`run_bsc_sims`] function estimates the bit error rate (BER) and block error rate (BLER) of the
//! code for several parameter sets and saves the results to a JSON file; [`theoretical_ber`] gives
//! the exact BER for comparison.

use std::fs::File;
use std::io::BufWriter;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::channel::{check_error_prob, BinarySymmetricChannel};
use crate::repetition::check_code_rate;
use crate::{decoder, encoder, utils, Bit, Error};

/// Returns message recovered after sending a message through a repetition code and a BSC.
///
/// # Parameters
///
/// - `message`: Information bits to be sent.
///
/// - `code_rate`: Number of times each information bit is repeated. Must be positive.
///
/// - `error_prob`: Bit error probability of the channel. Must be in `[0, 1]`.
///
/// - `rng`: Random number generator to be used for the channel.
///
/// # Returns
///
/// - `message_hat`: Majority-vote decisions on the information bits.
///
/// # Errors
///
/// Returns an error if `code_rate` is `0` or if `error_prob` is not in `[0, 1]`. No random numbers
/// are drawn in that case.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use repcode::{rng, sim, utils};
///
/// let mut rng = rng::Rng::seed_from_u64(0);
/// let message = utils::bits_from_str("0110")?;
/// let message_hat = sim::simulate(&message, 3, 1.0, &mut rng)?;
/// assert_eq!(utils::bits_to_string(&message_hat), "1001");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn simulate<R: Rng + ?Sized>(
    message: &[Bit],
    code_rate: usize,
    error_prob: f64,
    rng: &mut R,
) -> Result<Vec<Bit>, Error> {
    check_code_rate(code_rate)?;
    let channel = BinarySymmetricChannel::new(error_prob)?;
    let code_bits = encoder(message, code_rate)?;
    decoder(&channel.transmit(&code_bits, rng), code_rate)
}

/// Returns exact probability that a decoded bit is in error.
///
/// # Parameters
///
/// - `code_rate`: Number of times each information bit is repeated. Must be positive.
///
/// - `error_prob`: Bit error probability of the channel. Must be in `[0, 1]`.
///
/// # Returns
///
/// - `ber`: Probability that more than half of the `code_rate` copies of a bit are flipped, plus
///   (for even `code_rate`) half the probability that exactly half of them are flipped, since the
///   decoder then picks the first copy.
///
/// # Errors
///
/// Returns an error if `code_rate` is `0` or too large, or if `error_prob` is not in `[0, 1]`.
///
/// # Examples
/// ```
/// use float_eq::assert_float_eq;
/// use repcode::sim;
///
/// assert_float_eq!(sim::theoretical_ber(1, 0.1)?, 0.1, abs <= 1e-12);
/// assert_float_eq!(sim::theoretical_ber(3, 0.1)?, 0.028, abs <= 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::float_cmp)]
pub fn theoretical_ber(code_rate: usize, error_prob: f64) -> Result<f64, Error> {
    check_code_rate(code_rate)?;
    check_error_prob(error_prob)?;
    let n = u32::try_from(code_rate).map_err(|_| {
        Error::InvalidParameter(format!("Code rate {code_rate} is too large"))
    })?;
    if error_prob == 0.0 {
        return Ok(0.0);
    }
    if error_prob == 1.0 {
        return Ok(1.0);
    }
    let ln_p = error_prob.ln();
    let ln_q = (1.0 - error_prob).ln();
    let mut ber = 0.0;
    // Natural logarithm of binomial coefficient C(n, k)
    let mut ln_coeff = 0.0;
    for k in 0 ..= n {
        let weight = match (2 * k).cmp(&n) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
        if weight > 0.0 {
            ber += weight * (ln_coeff + f64::from(k) * ln_p + f64::from(n - k) * ln_q).exp();
        }
        ln_coeff += f64::from(n - k).ln() - f64::from(k + 1).ln();
    }
    Ok(ber)
}

/// Parameters for repetition code simulation over binary symmetric channel
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimParams {
    /// Number of times each information bit is repeated
    pub code_rate: usize,
    /// Bit error probability of the channel
    pub error_prob: f64,
    /// Number of information bits per block
    pub num_bits_per_block: u32,
    /// Number of blocks to be transmitted
    pub num_blocks: u32,
}

impl SimParams {
    /// Checks validity of simulation parameters.
    fn check(&self) -> Result<(), Error> {
        check_code_rate(self.code_rate)?;
        check_error_prob(self.error_prob)?;
        if self.num_bits_per_block == 0 {
            return Err(Error::InvalidParameter(
                "Number of bits per block cannot be zero".to_string(),
            ));
        }
        if self.num_blocks == 0 {
            return Err(Error::InvalidParameter(
                "Number of blocks cannot be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Results from repetition code simulation over binary symmetric channel
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimResults {
    /// Simulation parameters
    pub params: SimParams,
    /// Number of blocks transmitted
    pub num_blocks: u32,
    /// Number of information bits transmitted
    pub num_info_bits: u64,
    /// Number of information bits decoded in error
    pub num_info_bit_errors: u64,
    /// Number of blocks with at least one information bit decoded in error
    pub num_block_errors: u32,
}

impl SimResults {
    /// Returns initialized simulation results.
    fn new(params: &SimParams) -> Self {
        Self {
            params: *params,
            num_blocks: 0,
            num_info_bits: 0,
            num_info_bit_errors: 0,
            num_block_errors: 0,
        }
    }

    /// Returns bit error rate.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ber(&self) -> f64 {
        if self.num_info_bits == 0 {
            return 0.0;
        }
        self.num_info_bit_errors as f64 / self.num_info_bits as f64
    }

    /// Returns block error rate.
    #[must_use]
    pub fn bler(&self) -> f64 {
        if self.num_blocks == 0 {
            return 0.0;
        }
        f64::from(self.num_block_errors) / f64::from(self.num_blocks)
    }

    /// Updates simulation results after a block.
    fn update_after_block(&mut self, num_info_bit_errors_this_block: usize) {
        self.num_blocks += 1;
        self.num_info_bits += u64::from(self.params.num_bits_per_block);
        if num_info_bit_errors_this_block > 0 {
            self.num_block_errors += 1;
            self.num_info_bit_errors += num_info_bit_errors_this_block as u64;
        }
    }
}

impl std::fmt::Display for SimResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n = {}, p = {}: BER = {}/{} = {:.3e}, BLER = {}/{} = {:.3e}",
            self.params.code_rate,
            self.params.error_prob,
            self.num_info_bit_errors,
            self.num_info_bits,
            self.ber(),
            self.num_block_errors,
            self.num_blocks,
            self.bler(),
        )
    }
}

/// Runs simulation of repetition code over binary symmetric channel.
///
/// # Parameters
///
/// - `params`: Parameters for the simulation.
///
/// - `rng`: Random number generator to be used for information bits and channel.
///
/// # Returns
///
/// - `results`: Bit and block error counts.
///
/// # Errors
///
/// Returns an error if `params` is invalid: zero code rate, error probability outside `[0, 1]`,
/// zero bits per block or zero blocks.
pub fn run_bsc_sim<R: Rng + ?Sized>(
    params: &SimParams,
    rng: &mut R,
) -> Result<SimResults, Error> {
    params.check()?;
    let channel = BinarySymmetricChannel::new(params.error_prob)?;
    let mut results = SimResults::new(params);
    for _ in 0 .. params.num_blocks {
        let info_bits = utils::random_bits(params.num_bits_per_block as usize, rng);
        let code_bits = encoder(&info_bits, params.code_rate)?;
        let info_bits_hat = decoder(&channel.transmit(&code_bits, rng), params.code_rate)?;
        results.update_after_block(utils::error_count(&info_bits_hat, &info_bits));
    }
    Ok(results)
}

/// Runs simulations of repetition code over binary symmetric channel and saves results to a JSON
/// file.
///
/// # Parameters
///
/// - `all_params`: Parameters for each simulation scenario of interest.
///
/// - `rng`: Random number generator to be used for all scenarios.
///
/// - `json_filename`: Name of the JSON file to which all simulation results must be written.
///
/// # Returns
///
/// - `all_results`: Results for each scenario, in the same order as `all_params`.
///
/// # Errors
///
/// Returns an error if any of the parameter sets is invalid, or if the results cannot be written
/// to `json_filename`. No file is written if a parameter set is invalid.
pub fn run_bsc_sims<R: Rng + ?Sized>(
    all_params: &[SimParams],
    rng: &mut R,
    json_filename: &str,
) -> Result<Vec<SimResults>, Error> {
    for params in all_params {
        params.check()?;
    }
    let mut all_results = Vec::with_capacity(all_params.len());
    for params in all_params {
        let results = run_bsc_sim(params, rng)?;
        info!("{results}");
        debug!(
            "n = {}, p = {}: theoretical BER = {:.3e}",
            params.code_rate,
            params.error_prob,
            theoretical_ber(params.code_rate, params.error_prob)?
        );
        all_results.push(results);
    }
    let writer = BufWriter::new(File::create(json_filename)?);
    serde_json::to_writer_pretty(writer, &all_results)?;
    info!("Saved results to {json_filename}");
    Ok(all_results)
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rand::SeedableRng;

    use super::*;
    use crate::rng;
    use Bit::{One, Zero};

    fn params_for_test(code_rate: usize, error_prob: f64) -> SimParams {
        SimParams {
            code_rate,
            error_prob,
            num_bits_per_block: 1,
            num_blocks: 100_000,
        }
    }

    #[test]
    fn test_simulate() {
        let mut rng = rng::Rng::seed_from_u64(10);
        // Invalid input
        assert!(simulate(&[One], 0, 0.1, &mut rng).is_err());
        assert!(simulate(&[One], 3, -0.1, &mut rng).is_err());
        // Valid input
        let message = [Zero, One, One, Zero];
        for code_rate in [1, 3, 5, 7, 9] {
            assert_eq!(simulate(&message, code_rate, 0.0, &mut rng).unwrap(), message);
            assert_eq!(
                simulate(&message, code_rate, 1.0, &mut rng).unwrap(),
                [One, Zero, Zero, One]
            );
        }
        assert!(simulate(&[], 3, 0.5, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_simulate_reproducible() {
        let message = utils::random_bits(256, &mut rng::Rng::seed_from_u64(11));
        let hat1 = simulate(&message, 3, 0.3, &mut rng::Rng::seed_from_u64(12)).unwrap();
        let hat2 = simulate(&message, 3, 0.3, &mut rng::Rng::seed_from_u64(12)).unwrap();
        assert_eq!(hat1, hat2);
    }

    #[test]
    fn test_theoretical_ber() {
        // Invalid input
        assert!(theoretical_ber(0, 0.1).is_err());
        assert!(theoretical_ber(3, 1.1).is_err());
        // Valid input
        assert_float_eq!(theoretical_ber(1, 0.1).unwrap(), 0.1, abs <= 1e-12);
        assert_float_eq!(theoretical_ber(2, 0.1).unwrap(), 0.1, abs <= 1e-12);
        assert_float_eq!(theoretical_ber(3, 0.1).unwrap(), 0.028, abs <= 1e-12);
        assert_float_eq!(theoretical_ber(5, 0.1).unwrap(), 0.00856, abs <= 1e-12);
        for code_rate in 1 .. 10 {
            assert_float_eq!(theoretical_ber(code_rate, 0.0).unwrap(), 0.0, abs <= 1e-12);
            assert_float_eq!(theoretical_ber(code_rate, 1.0).unwrap(), 1.0, abs <= 1e-12);
            assert_float_eq!(theoretical_ber(code_rate, 0.5).unwrap(), 0.5, abs <= 1e-12);
        }
        // Long codes
        let ber_long = theoretical_ber(1101, 0.1).unwrap();
        assert!(ber_long.is_finite());
        assert!(ber_long >= 0.0 && ber_long < theoretical_ber(9, 0.1).unwrap());
        let ber_long = theoretical_ber(2000, 0.45).unwrap();
        assert!(ber_long.is_finite());
        assert!(ber_long > 0.0 && ber_long < theoretical_ber(999, 0.45).unwrap());
    }

    #[test]
    fn test_check_sim_params() {
        // Invalid input
        assert!(params_for_test(0, 0.1).check().is_err());
        assert!(params_for_test(3, 1.5).check().is_err());
        let mut params = params_for_test(3, 0.1);
        params.num_bits_per_block = 0;
        assert!(params.check().is_err());
        let mut params = params_for_test(3, 0.1);
        params.num_blocks = 0;
        assert!(params.check().is_err());
        // Valid input
        assert!(params_for_test(3, 0.1).check().is_ok());
    }

    #[test]
    fn test_run_bsc_sim_uncoded() {
        let mut rng = rng::Rng::seed_from_u64(13);
        let params = SimParams {
            code_rate: 1,
            error_prob: 0.1,
            num_bits_per_block: 100,
            num_blocks: 1000,
        };
        let results = run_bsc_sim(&params, &mut rng).unwrap();
        assert_eq!(results.num_blocks, 1000);
        assert_eq!(results.num_info_bits, 100_000);
        assert_float_eq!(results.ber(), 0.1, abs <= 0.005);
    }

    #[test]
    fn test_run_bsc_sim_coding_gain() {
        let mut rng = rng::Rng::seed_from_u64(14);
        let mut bler_prev = 1.0;
        for code_rate in [1, 3, 5, 7] {
            let results = run_bsc_sim(&params_for_test(code_rate, 0.1), &mut rng).unwrap();
            let ber_theory = theoretical_ber(code_rate, 0.1).unwrap();
            assert!(results.bler() < bler_prev);
            assert_float_eq!(results.bler(), results.ber(), abs <= 1e-12);
            assert_float_eq!(results.ber(), ber_theory, r2nd <= 0.2);
            bler_prev = results.bler();
        }
    }

    #[test]
    fn test_run_bsc_sims() {
        let mut rng = rng::Rng::seed_from_u64(15);
        let json_filename = std::env::temp_dir().join("repcode_test_run_bsc_sims.json");
        let json_filename = json_filename.to_str().unwrap();
        let all_params = [
            SimParams {
                code_rate: 1,
                error_prob: 0.2,
                num_bits_per_block: 8,
                num_blocks: 100,
            },
            SimParams {
                code_rate: 3,
                error_prob: 0.2,
                num_bits_per_block: 8,
                num_blocks: 100,
            },
        ];
        // Invalid input
        let mut bad_params = all_params;
        bad_params[1].code_rate = 0;
        assert!(run_bsc_sims(&bad_params, &mut rng, json_filename).is_err());
        // Valid input
        let all_results = run_bsc_sims(&all_params, &mut rng, json_filename).unwrap();
        assert_eq!(all_results.len(), 2);
        let saved: Vec<SimResults> =
            serde_json::from_reader(File::open(json_filename).unwrap()).unwrap();
        assert_eq!(saved.len(), all_results.len());
        for (saved_results, results) in saved.iter().zip(all_results.iter()) {
            assert_eq!(saved_results.params.code_rate, results.params.code_rate);
            assert_eq!(saved_results.num_info_bits, results.num_info_bits);
            assert_eq!(saved_results.num_info_bit_errors, results.num_info_bit_errors);
            assert_eq!(saved_results.num_block_errors, results.num_block_errors);
        }
        std::fs::remove_file(json_filename).unwrap();
    }
}
