//! Transmission of greyscale images over a binary symmetric channel
//!
//! Each 8-bit pixel value is written as a binary string (most significant bit first) and sent
//! through the repetition code and the channel on its own. The decoded pixel values are put back
//! in place, so that the image shows how much corruption survives a given code rate.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::channel::check_error_prob;
use crate::repetition::check_code_rate;
use crate::{rng, sim, Bit, Error};

/// Number of bits per greyscale pixel
const BITS_PER_PIXEL: usize = 8;

/// Configuration for sending an image over the channel at several code rates
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct ImageSimConfig {
    /// Bit error probability of the channel
    pub error_prob: f64,
    /// Code rates to be tested (one output image each)
    pub code_rates: Vec<usize>,
    /// Path of the source image
    pub input_path: PathBuf,
    /// Directory in which the output images are written
    pub output_dir: PathBuf,
}

impl Default for ImageSimConfig {
    fn default() -> Self {
        Self {
            error_prob: 0.1,
            code_rates: vec![1, 3, 5, 7, 9],
            input_path: PathBuf::from("mona_lisa.png"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ImageSimConfig {
    /// Checks validity of configuration.
    fn check(&self) -> Result<(), Error> {
        check_error_prob(self.error_prob)?;
        for &code_rate in &self.code_rates {
            check_code_rate(code_rate)?;
        }
        Ok(())
    }

    /// Returns path of output image for given code rate.
    #[must_use]
    pub fn output_path(&self, code_rate: usize) -> PathBuf {
        self.output_dir.join(format!("{code_rate}.png"))
    }
}

/// Returns 8-bit greyscale version of the image at a given path.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded as an image.
pub fn load_greyscale(path: &Path) -> Result<GrayImage, Error> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_luma8())
}

/// Returns bits of a pixel value, most significant bit first.
///
/// # Examples
/// ```
/// use repcode::{picture, utils};
///
/// assert_eq!(utils::bits_to_string(&picture::pixel_to_bits(5)), "00000101");
/// ```
#[must_use]
pub fn pixel_to_bits(value: u8) -> Vec<Bit> {
    (0 .. BITS_PER_PIXEL)
        .rev()
        .map(|shift| {
            if (value >> shift) & 1 == 1 {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect()
}

/// Returns pixel value given its bits, most significant bit first.
///
/// # Errors
///
/// Returns an error if the number of bits is not `8`.
pub fn bits_to_pixel(bits: &[Bit]) -> Result<u8, Error> {
    if bits.len() != BITS_PER_PIXEL {
        return Err(Error::InvalidInput(format!(
            "Expected {BITS_PER_PIXEL} bits per pixel, found {}",
            bits.len()
        )));
    }
    Ok(bits.iter().fold(0, |acc, &b| (acc << 1) | b as u8))
}

/// Returns greyscale image of given dimensions holding the given pixel values in row-major order.
///
/// # Errors
///
/// Returns an error if the number of pixel values is not `width * height`.
pub fn reshape(width: u32, height: u32, pixels: Vec<u8>) -> Result<GrayImage, Error> {
    let expected = width as usize * height as usize;
    let found = pixels.len();
    if found != expected {
        return Err(Error::ShapeMismatch { expected, found });
    }
    GrayImage::from_raw(width, height, pixels).ok_or(Error::ShapeMismatch { expected, found })
}

/// Returns image obtained by sending every pixel of an image over the channel.
///
/// # Parameters
///
/// - `img`: Image to be sent.
///
/// - `code_rate`: Number of times each bit is repeated. Must be positive.
///
/// - `error_prob`: Bit error probability of the channel. Must be in `[0, 1]`.
///
/// - `seed`: Seed for the channel. Pixel `k` (in row-major order) uses stream `k` of the ChaCha8
///   generator with this seed, so the output depends only on the inputs and not on how the pixels
///   are spread over threads.
///
/// # Returns
///
/// - `img_hat`: Image of the same dimensions as `img`, holding the decoded pixel values.
///
/// # Errors
///
/// Returns an error if `code_rate` is `0` or if `error_prob` is not in `[0, 1]`.
///
/// # Examples
/// ```
/// use image::GrayImage;
/// use repcode::picture;
///
/// let img = GrayImage::from_fn(4, 3, |x, y| image::Luma([(10 * x + y) as u8]));
/// let img_hat = picture::transmit_image(&img, 3, 0.0, 7)?;
/// assert_eq!(img_hat, img);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn transmit_image(
    img: &GrayImage,
    code_rate: usize,
    error_prob: f64,
    seed: u64,
) -> Result<GrayImage, Error> {
    check_code_rate(code_rate)?;
    check_error_prob(error_prob)?;
    let base_rng = rng::Rng::seed_from_u64(seed);
    let pixels = img
        .as_raw()
        .par_iter()
        .enumerate()
        .map(|(index, &value)| {
            let mut pixel_rng = base_rng.clone();
            pixel_rng.set_stream(index as u64);
            let bits = pixel_to_bits(value);
            let bits_hat = sim::simulate(&bits, code_rate, error_prob, &mut pixel_rng)?;
            bits_to_pixel(&bits_hat)
        })
        .collect::<Result<Vec<u8>, Error>>()?;
    reshape(img.width(), img.height(), pixels)
}

/// Returns number of pixel bits that differ between two images.
fn pixel_bit_error_count(img: &GrayImage, img_hat: &GrayImage) -> u64 {
    img.as_raw()
        .iter()
        .zip(img_hat.as_raw().iter())
        .map(|(&x, &y)| u64::from((x ^ y).count_ones()))
        .sum()
}

/// Sends an image over the channel once per configured code rate and saves the results.
///
/// # Parameters
///
/// - `config`: Error probability, code rates, source image and output directory. The output
///   image for code rate `n` is written to `<output_dir>/<n>.png`.
///
/// - `rng`: Random number generator from which one channel seed per code rate is drawn.
///
/// # Returns
///
/// - `paths`: Paths of the output images, in the order of `config.code_rates`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, if the source image cannot be loaded, or if
/// an output image cannot be written.
pub fn run_image_sims<R: Rng + ?Sized>(
    config: &ImageSimConfig,
    rng: &mut R,
) -> Result<Vec<PathBuf>, Error> {
    config.check()?;
    let img = load_greyscale(&config.input_path)?;
    info!(
        "Loaded {:?} ({}x{} pixels)",
        config.input_path,
        img.width(),
        img.height()
    );
    fs::create_dir_all(&config.output_dir)?;
    let num_pixel_bits = img.as_raw().len() * BITS_PER_PIXEL;
    let mut paths = Vec::with_capacity(config.code_rates.len());
    for &code_rate in &config.code_rates {
        let seed: u64 = rng.random();
        debug!("Code rate {code_rate}: channel seed {seed}");
        let img_hat = transmit_image(&img, code_rate, config.error_prob, seed)?;
        let path = config.output_path(code_rate);
        img_hat.save(&path).map_err(|source| Error::ImageSave {
            path: path.clone(),
            source,
        })?;
        info!(
            "n = {}, p = {}: {} of {} pixel bits in error, saved {:?}",
            code_rate,
            config.error_prob,
            pixel_bit_error_count(&img, &img_hat),
            num_pixel_bits,
            path
        );
        paths.push(path);
    }
    Ok(paths)
}
