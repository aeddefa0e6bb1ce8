//! Command line front end for the `ppm_disguise` crate.
//!
//! ```sh
//! ppm-disguise notes.pdf notes.ppm --mode encode --color single
//! ppm-disguise notes.ppm notes.pdf --mode decode
//! ```
//!
//! Encoding refuses to overwrite an existing output, decoding replaces it.
//! Either way the output only appears once it has been completely written.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use ppm_disguise::{decode_container, encode_container, ColorProfile, DecodeOptions};
use thiserror::Error;
use tracing::info;

pub use crate::exit_code::ErrorCode;
use crate::output::{already_exists, AtomicOutput, Overwrite};

mod exit_code;
mod output;

/// Disguise any file as a PPM image, or recover a file from one.
#[derive(Parser, Debug)]
#[command(name = "ppm-disguise", version)]
pub struct Opt {
  /// File to read from
  pub input: PathBuf,

  /// File to write to
  pub output: PathBuf,

  /// Encode or decode mode
  #[arg(short, long, value_enum)]
  pub mode: Mode,

  /// Single or double byte color mode, required when encoding
  #[arg(short, long, value_enum)]
  pub color: Option<Color>,

  /// Decode without checking the header against the pixel data
  #[arg(long)]
  pub lenient: bool,

  /// Log progress to stderr
  #[arg(short, long)]
  pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
  Encode,
  Decode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Color {
  /// 3 bytes per pixel, max channel value 255
  Single,
  /// 6 bytes per pixel, max channel value 65535
  Double,
}

impl From<Color> for ColorProfile {
  fn from(color: Color) -> Self {
    match color {
      Color::Single => ColorProfile::Single,
      Color::Double => ColorProfile::Double,
    }
  }
}

#[derive(Error, Debug)]
pub enum CliError {
  #[error("a --color mode is required when encoding")]
  MissingColor,
  #[error("{}: {source}", .path.display())]
  Io { path: PathBuf, source: io::Error },
  #[error("{}: {source}", .path.display())]
  Codec { path: PathBuf, source: ppm_disguise::Error },
}

impl CliError {
  fn io(path: &Path) -> impl FnOnce(io::Error) -> CliError + '_ {
    move |source| CliError::Io { path: path.to_path_buf(), source }
  }

  fn codec(path: &Path) -> impl FnOnce(ppm_disguise::Error) -> CliError + '_ {
    move |source| CliError::Codec { path: path.to_path_buf(), source }
  }
}

/// Runs one encode or decode as described by `opt`.
pub fn run(opt: &Opt) -> Result<(), CliError> {
  match opt.mode {
    Mode::Encode => {
      let color = opt.color.ok_or(CliError::MissingColor)?;
      encode_file(&opt.input, &opt.output, color.into())
    }
    Mode::Decode => {
      let options = if opt.lenient { DecodeOptions::lenient() } else { DecodeOptions::strict() };
      decode_file(&opt.input, &opt.output, &options)
    }
  }
}

/// Encodes the file at `input` into a new container at `output`.
pub fn encode_file(input: &Path, output: &Path, profile: ColorProfile) -> Result<(), CliError> {
  let source = File::open(input).map_err(CliError::io(input))?;
  let input_len = source.metadata().map_err(CliError::io(input))?.len();

  if output.exists() {
    return Err(CliError::Io { path: output.to_path_buf(), source: already_exists(output) });
  }

  let mut out = AtomicOutput::create(output).map_err(CliError::io(output))?;
  let meta = encode_container(BufReader::new(source), out.writer(), input_len, profile)
    .map_err(CliError::codec(input))?;
  out.commit(Overwrite::Refuse).map_err(CliError::io(output))?;

  info!(
    input = %input.display(),
    output = %output.display(),
    side_length = meta.side_length,
    payload_len = meta.payload_len,
    "encoded"
  );

  Ok(())
}

/// Decodes the container at `input`, replacing any file at `output`.
pub fn decode_file(input: &Path, output: &Path, options: &DecodeOptions) -> Result<(), CliError> {
  let source = fs::read(input).map_err(CliError::io(input))?;

  let mut out = AtomicOutput::create(output).map_err(CliError::io(output))?;
  let summary = decode_container(&source, out.writer(), options).map_err(CliError::codec(input))?;
  out.commit(Overwrite::Replace).map_err(CliError::io(output))?;

  info!(
    input = %input.display(),
    output = %output.display(),
    payload_len = summary.payload_len,
    written = summary.written,
    "decoded"
  );

  Ok(())
}
