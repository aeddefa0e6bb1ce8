use tracing::trace;

use crate::error::{Error, Result};
use crate::profile::{parse_decimal, ColorProfile, PPM_BYTES_MAGIC, PPM_WHITESPACE};

/// Where a forward scan over a container currently is. Every whitespace byte
/// moves the scan to the next state, and the fourth one starts the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
  InMagic = 0,
  InWidth = 1,
  InHeight = 2,
  InMaxVal = 3,
  InPayload = 4,
}

impl HeaderState {
  fn advance(self) -> Self {
    match self {
      HeaderState::InMagic => HeaderState::InWidth,
      HeaderState::InWidth => HeaderState::InHeight,
      HeaderState::InHeight => HeaderState::InMaxVal,
      HeaderState::InMaxVal | HeaderState::InPayload => HeaderState::InPayload,
    }
  }
}

/// The four header fields as they appear in the source, unparsed, and the
/// offset of the first payload byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawHeader<'a> {
  pub magic: &'a [u8],
  pub width: &'a [u8],
  pub height: &'a [u8],
  pub max_value: &'a [u8],
  pub payload_offset: usize,
}

/// A validated header: a square canvas with a known color profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasHeader {
  pub side_length: u64,
  pub profile: ColorProfile,
}

/// Forward, byte at a time scanner over a container header.
///
/// The scanner does not look at the content of the fields while scanning.
/// It only counts whitespace separators, so any payload byte, whitespace
/// included, can follow the fourth separator without confusing it.
#[derive(Debug)]
pub struct HeaderScanner<'a> {
  source: &'a [u8],
  offset: usize,
  field_start: usize,
  state: HeaderState,
  fields: [&'a [u8]; 4],
}

impl<'a> HeaderScanner<'a> {
  pub fn new(source: &'a [u8]) -> Self {
    Self {
      source,
      offset: 0,
      field_start: 0,
      state: HeaderState::InMagic,
      fields: [b"".as_slice(); 4],
    }
  }

  pub fn state(&self) -> HeaderState {
    self.state
  }

  /// Consumes one byte and returns the state after it, or `None` once the
  /// source is exhausted.
  pub fn step(&mut self) -> Option<HeaderState> {
    if self.state == HeaderState::InPayload {
      return Some(self.state);
    }

    let source = self.source;
    let byte = *source.get(self.offset)?;

    if byte == PPM_WHITESPACE {
      self.fields[self.state as usize] = &source[self.field_start..self.offset];
      self.state = self.state.advance();
      self.field_start = self.offset + 1;

      trace!(state = ?self.state, offset = self.offset, "header separator");
    }

    self.offset += 1;
    Some(self.state)
  }

  /// Runs the scanner up to the first payload byte. Returns `None` when the
  /// source ends before the fourth separator.
  pub fn scan(mut self) -> Option<RawHeader<'a>> {
    while self.step()? != HeaderState::InPayload {}

    let [magic, width, height, max_value] = self.fields;

    Some(RawHeader { magic, width, height, max_value, payload_offset: self.offset })
  }
}

impl RawHeader<'_> {
  /// Checks the magic number, requires a square canvas, and maps the max
  /// channel value to a `ColorProfile`.
  pub fn parse(&self) -> Result<CanvasHeader> {
    if self.magic != PPM_BYTES_MAGIC {
      return Err(Error::InvalidHeader("unknown magic number"));
    }

    let width: u64 = parse_decimal(self.width)
      .ok_or(Error::InvalidHeader("width is not a decimal number"))?;
    let height: u64 = parse_decimal(self.height)
      .ok_or(Error::InvalidHeader("height is not a decimal number"))?;

    if width != height {
      return Err(Error::InvalidHeader("canvas is not square"));
    }

    let profile = parse_decimal(self.max_value)
      .and_then(ColorProfile::from_max_channel_value)
      .ok_or(Error::InvalidHeader("max channel value has no matching color profile"))?;

    Ok(CanvasHeader { side_length: width, profile })
  }
}
