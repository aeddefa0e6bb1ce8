use std::io;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
#[derive(Error, Debug)]
pub enum Error {
  /// Any `std::io::Error` that occurs during decoding or encoding. Typically
  /// these will arise from problems with reading a source or writing to a
  /// destination.
  #[error("{0}")]
  IoError(#[from] io::Error),
  /// The input source ran dry before the declared number of bytes was read.
  #[error("unexpectedly reached end of input before encoding was completed")]
  UnexpectedEof,
  /// Scanning backward from the end of a container never reached a `#`
  /// trailer marker.
  #[error("could not find the original file size trailer")]
  MissingTrailer,
  /// A `#` trailer marker was found, but the bytes following it are not a
  /// decimal length.
  #[error("could not read original file size from metadata")]
  InvalidTrailer,
  /// The container header is missing fields, has an unknown magic number,
  /// a non-square canvas, or a max channel value with no matching profile.
  #[error("invalid or malformed P6 header: {0}")]
  InvalidHeader(&'static str),
  /// The payload region between header and trailer disagrees with the
  /// header's geometry, or cannot hold the length recorded in the trailer.
  #[error("trailer claims {claimed} bytes but the canvas holds {capacity}")]
  CapacityMismatch { claimed: u64, capacity: u64 },
  /// The canvas needed for an input does not fit in 64-bit arithmetic.
  #[error("input of {0} bytes is too large to fit on a canvas")]
  TooLarge(u64),
}

/// Coarse grouping of [`Error`] values, used by callers that need to react
/// to a kind of failure rather than a specific one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
  /// Reading the source or writing the destination failed.
  Io,
  /// The size trailer could not be located or parsed.
  Format,
  /// The container is readable but inconsistent with itself.
  Validation,
}

impl Error {
  /// Returns the [`ErrorClass`] this error belongs to.
  pub fn class(&self) -> ErrorClass {
    match self {
      Error::IoError(_) | Error::UnexpectedEof => ErrorClass::Io,
      Error::MissingTrailer | Error::InvalidTrailer => ErrorClass::Format,
      Error::InvalidHeader(_) | Error::CapacityMismatch { .. } | Error::TooLarge(_) => {
        ErrorClass::Validation
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Error::IoError(a), Error::IoError(b)) => a.kind() == b.kind(),
      (Error::UnexpectedEof, Error::UnexpectedEof) => true,
      (Error::MissingTrailer, Error::MissingTrailer) => true,
      (Error::InvalidTrailer, Error::InvalidTrailer) => true,
      (Error::InvalidHeader(a), Error::InvalidHeader(b)) => a == b,
      (
        Error::CapacityMismatch { claimed: a, capacity: b },
        Error::CapacityMismatch { claimed: c, capacity: d },
      ) => a == c && b == d,
      (Error::TooLarge(a), Error::TooLarge(b)) => a == b,
      _ => false,
    }
  }
}
