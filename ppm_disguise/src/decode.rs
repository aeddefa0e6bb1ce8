use std::io;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::header::{CanvasHeader, HeaderScanner, RawHeader};
use crate::options::DecodeOptions;
use crate::profile::{ContainerMeta, PPM_WHITESPACE};
use crate::trailer::{scan_trailer, TrailerScan};

/// Describes what a decode found in a container and how much it wrote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedContainer {
  /// The canvas described by the header. Always present after a strict
  /// decode, and present after a lenient one when the header happens to
  /// parse.
  pub canvas: Option<CanvasHeader>,
  /// Length recorded in the trailer.
  pub payload_len: u64,
  /// Bytes written to the destination. Equal to `payload_len` unless a
  /// lenient decode ran out of source first.
  pub written: u64,
}

/// Decodes a P6 container produced by [`encode_container`], writing the
/// original bytes to `writer`.
///
/// The trailer is located first by scanning backward from the end of
/// `source`, so nothing is written when it is missing or unreadable. The
/// payload then starts after the fourth whitespace separator of the header.
/// See [`DecodeOptions`] for the checks applied in between.
///
/// Unlike encoding, decoding needs the whole container in memory since the
/// trailer sits at its end.
///
/// [`encode_container`]: crate::encode_container
pub fn decode_container<W: io::Write>(
  source: &[u8],
  mut writer: W,
  options: &DecodeOptions,
) -> Result<DecodedContainer> {
  let (payload_len, marker_offset) = match scan_trailer(source)? {
    TrailerScan::Found { length, marker_offset } => (length, marker_offset),
    TrailerScan::NotFound => return Err(Error::MissingTrailer),
  };

  let header = HeaderScanner::new(source).scan();

  let (payload, canvas) = if options.strict {
    let header = header.ok_or(Error::InvalidHeader("header ends before its fourth separator"))?;
    let (payload, canvas) = strict_payload(source, &header, payload_len, marker_offset)?;
    (payload, Some(canvas))
  } else {
    lenient_payload(source, header.as_ref(), payload_len)
  };

  writer.write_all(payload)?;
  writer.flush()?;

  Ok(DecodedContainer { canvas, payload_len, written: payload.len() as u64 })
}

/// Decodes an in-memory container, returning the original bytes.
pub fn decode_to_vec(source: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
  let mut dest = Vec::new();
  decode_container(source, &mut dest, options)?;
  Ok(dest)
}

// Validates the header against the pixel data between it and the trailer,
// and returns exactly `payload_len` bytes of it.
fn strict_payload<'a>(
  source: &'a [u8],
  header: &RawHeader<'_>,
  payload_len: u64,
  marker_offset: usize,
) -> Result<(&'a [u8], CanvasHeader)> {
  let canvas = header.parse()?;
  let meta = ContainerMeta { side_length: canvas.side_length, profile: canvas.profile, payload_len };
  let capacity = meta
    .checked_capacity()
    .ok_or(Error::InvalidHeader("canvas size overflows"))?;

  // The encoder always writes a separator between the pixel data and `#`.
  let pixels_end = marker_offset
    .checked_sub(1)
    .filter(|&end| source[end] == PPM_WHITESPACE)
    .ok_or(Error::InvalidTrailer)?;

  let pixels = source
    .get(header.payload_offset..pixels_end)
    .filter(|pixels| pixels.len() as u64 == capacity)
    .ok_or(Error::InvalidHeader("pixel data does not match the canvas size"))?;

  if payload_len > capacity {
    return Err(Error::CapacityMismatch { claimed: payload_len, capacity });
  }

  debug!(
    side_length = canvas.side_length,
    profile = ?canvas.profile,
    payload_len,
    filler_len = capacity - payload_len,
    "validated container"
  );

  Ok((&pixels[..payload_len as usize], canvas))
}

// Copies from after the fourth separator for `payload_len` bytes or until
// the source ends, without looking at the header fields or the trailer.
fn lenient_payload<'a>(
  source: &'a [u8],
  header: Option<&RawHeader<'_>>,
  payload_len: u64,
) -> (&'a [u8], Option<CanvasHeader>) {
  let start = header.map_or(source.len(), |header| header.payload_offset);
  let wanted = usize::try_from(payload_len).unwrap_or(usize::MAX);
  let end = start.saturating_add(wanted).min(source.len());
  let payload = &source[start..end];

  if (payload.len() as u64) < payload_len {
    warn!(
      payload_len,
      available = payload.len(),
      "source ended before the recorded payload length"
    );
  }

  let canvas = header.and_then(|header| header.parse().ok());

  (payload, canvas)
}
