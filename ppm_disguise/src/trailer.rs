use tracing::debug;

use crate::error::{Error, Result};
use crate::profile::{parse_decimal, PPM_TRAILER_MARKER, PPM_WHITESPACE};

// Digits in `u64::MAX`. Anything longer cannot be a valid length, so the
// scan stops collecting instead of buffering a whole marker-less file.
const MAX_TRAILER_DIGITS: usize = 20;

/// Outcome of scanning a container backward for its size trailer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailerScan {
  /// A `#` marker was found at `marker_offset`, and the digits after it
  /// read as `length`.
  Found { length: u64, marker_offset: usize },
  /// The start of the source was reached without seeing a `#` marker.
  NotFound,
}

/// Walks `source` from its last byte toward its first, skipping whitespace
/// and collecting every other byte until a `#` marker is met. The collected
/// bytes, restored to their original order, must be a decimal length.
///
/// Returns `TrailerScan::NotFound` when no marker exists, and
/// `Error::InvalidTrailer` when a marker exists but the bytes after it are
/// not a length that fits in a `u64`.
pub fn scan_trailer(source: &[u8]) -> Result<TrailerScan> {
  let mut digits = Vec::with_capacity(MAX_TRAILER_DIGITS);
  let mut overlong = false;

  for (offset, &byte) in source.iter().enumerate().rev() {
    match byte {
      PPM_WHITESPACE => continue,
      PPM_TRAILER_MARKER => {
        if overlong {
          return Err(Error::InvalidTrailer);
        }

        digits.reverse();
        let length: u64 = parse_decimal(&digits).ok_or(Error::InvalidTrailer)?;

        debug!(length, marker_offset = offset, "found size trailer");
        return Ok(TrailerScan::Found { length, marker_offset: offset });
      }
      _ if digits.len() < MAX_TRAILER_DIGITS => digits.push(byte),
      _ => overlong = true,
    }
  }

  Ok(TrailerScan::NotFound)
}
