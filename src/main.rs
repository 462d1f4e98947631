//! This crate simulates a repetition code with majority-vote decoding over a binary symmetric
//! channel (BSC). The `image` subcommand sends the pixels of a greyscale image over the channel
//! at several code rates and saves one output image per code rate; the `ber` subcommand
//! estimates the bit and block error rates of the code and saves the results to a JSON file.
//!
//! Build the executable with `cargo build --release` and then run `./target/release/repcode -h`
//! for help on the command-line interface. Logging verbosity is controlled with `RUST_LOG`.

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

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use itertools::Itertools;
use log::info;
use repcode::picture::{self, ImageSimConfig};
use repcode::{rng, sim};

/// Main function
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let timer = Instant::now();
    let matches = command_line_parser().get_matches();
    match matches.subcommand() {
        Some(("image", sub_matches)) => {
            let config = image_sim_config(sub_matches);
            let mut rng = rng::from_optional_seed(seed_from_matches(sub_matches));
            info!(
                "Sending {:?} over BSC with p = {} at code rates {}",
                config.input_path,
                config.error_prob,
                config.code_rates.iter().join(", ")
            );
            picture::run_image_sims(&config, &mut rng)?;
        }
        Some(("ber", sub_matches)) => {
            let mut rng = rng::from_optional_seed(seed_from_matches(sub_matches));
            let json_filename = json_filename_from_matches(sub_matches);
            sim::run_bsc_sims(&all_sim_params(sub_matches), &mut rng, &json_filename)?;
        }
        Some((name, _)) => bail!("Unknown subcommand {name}"),
        None => bail!("No subcommand given"),
    }
    info!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Simulates a repetition code over a binary symmetric channel")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("image")
                .about("Sends a greyscale image over the channel at several code rates")
                .arg(input_path())
                .arg(output_dir())
                .arg(error_prob())
                .arg(code_rates())
                .arg(seed()),
        )
        .subcommand(
            Command::new("ber")
                .about("Evaluates bit and block error rates at several code rates")
                .arg(error_prob())
                .arg(code_rates())
                .arg(num_bits_per_block())
                .arg(num_blocks())
                .arg(json_filename())
                .arg(seed()),
        )
}

/// Returns argument for path of source image.
fn input_path() -> Arg {
    Arg::new("input_path")
        .short('i')
        .value_parser(value_parser!(PathBuf))
        .default_value("mona_lisa.png")
        .help("Path of source image")
}

/// Returns argument for output directory.
fn output_dir() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .default_value(".")
        .help("Directory in which output images are saved (one per code rate)")
}

/// Returns argument for bit error probability.
fn error_prob() -> Arg {
    Arg::new("error_prob")
        .short('p')
        .value_parser(value_parser!(f64))
        .default_value("0.1")
        .help("Bit error probability of the channel")
}

/// Returns argument for code rates.
fn code_rates() -> Arg {
    Arg::new("code_rates")
        .short('n')
        .value_parser(value_parser!(usize))
        .value_delimiter(',')
        .default_value("1,3,5,7,9")
        .help("Comma-separated code rates (number of repetitions per bit)")
}

/// Returns argument for number of information bits per block.
fn num_bits_per_block() -> Arg {
    Arg::new("num_bits_per_block")
        .short('b')
        .value_parser(value_parser!(u32))
        .default_value("8")
        .help("Number of information bits per block")
}

/// Returns argument for number of blocks.
fn num_blocks() -> Arg {
    Arg::new("num_blocks")
        .short('k')
        .value_parser(value_parser!(u32))
        .default_value("100000")
        .help("Number of blocks to be transmitted per code rate")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .default_value("results.json")
        .help("Name of JSON file to which results must be saved")
}

/// Returns argument for random seed.
fn seed() -> Arg {
    Arg::new("seed")
        .short('s')
        .value_parser(value_parser!(u64))
        .help("Seed for the random number generator (omit for a different outcome every run)")
}

/// Returns image simulation configuration based on command-line arguments.
fn image_sim_config(matches: &ArgMatches) -> ImageSimConfig {
    // OK to unwrap: All arguments used here have default values.
    ImageSimConfig {
        error_prob: error_prob_from_matches(matches),
        code_rates: code_rates_from_matches(matches),
        input_path: matches.get_one::<PathBuf>("input_path").unwrap().clone(),
        output_dir: matches.get_one::<PathBuf>("output_dir").unwrap().clone(),
    }
}

/// Returns simulation parameters based on command-line arguments.
fn all_sim_params(matches: &ArgMatches) -> Vec<sim::SimParams> {
    // OK to unwrap: All arguments used here have default values.
    let error_prob = error_prob_from_matches(matches);
    let num_bits_per_block: u32 = *matches.get_one("num_bits_per_block").unwrap();
    let num_blocks: u32 = *matches.get_one("num_blocks").unwrap();
    code_rates_from_matches(matches)
        .into_iter()
        .map(|code_rate| sim::SimParams {
            code_rate,
            error_prob,
            num_bits_per_block,
            num_blocks,
        })
        .collect()
}

/// Returns bit error probability.
fn error_prob_from_matches(matches: &ArgMatches) -> f64 {
    *matches.get_one("error_prob").unwrap()
}

/// Returns code rates.
fn code_rates_from_matches(matches: &ArgMatches) -> Vec<usize> {
    matches
        .get_many::<usize>("code_rates")
        .unwrap()
        .copied()
        .collect()
}

/// Returns name of JSON file to which simulation results must be saved.
fn json_filename_from_matches(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("json_filename")
        .unwrap()
        .to_string()
}

/// Returns random seed, if any.
fn seed_from_matches(matches: &ArgMatches) -> Option<u64> {
    matches.get_one::<u64>("seed").copied()
}
