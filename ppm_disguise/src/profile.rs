use crate::error::{Error, Result};

pub const PPM_BYTES_MAGIC: &[u8] = b"P6";
pub const PPM_WHITESPACE: u8 = 0x20;
pub const PPM_TRAILER_MARKER: u8 = b'#';
/// Number of whitespace separators in a header, the last one directly
/// precedes the first payload byte.
pub const PPM_HEADER_SEPARATORS: usize = 4;

/// How many bytes make up one pixel of the canvas, and the max channel value
/// written to the header. Only the two RGB depths of the P6 format exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorProfile {
  /// One byte per channel, 3 bytes per pixel, max value 255.
  Single,
  /// Two bytes per channel, 6 bytes per pixel, max value 65535.
  Double,
}

impl ColorProfile {
  /// Bytes consumed per pixel.
  pub const fn divisor(self) -> u64 {
    match self {
      ColorProfile::Single => 3,
      ColorProfile::Double => 6,
    }
  }

  pub const fn max_channel_value(self) -> u32 {
    match self {
      ColorProfile::Single => 255,
      ColorProfile::Double => 65535,
    }
  }

  /// Maps a header's max channel value back to a profile. Values other than
  /// 255 and 65535 have no profile.
  pub fn from_max_channel_value(value: u32) -> Option<Self> {
    [ColorProfile::Single, ColorProfile::Double]
      .into_iter()
      .find(|profile| profile.max_channel_value() == value)
  }
}

/// Metadata describing a container: the square canvas and the payload it
/// carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerMeta {
  /// Width and height of the canvas in pixels.
  pub side_length: u64,
  /// The profile that sets how many bytes each pixel holds.
  pub profile: ColorProfile,
  /// Length of the original input, as recorded in the trailer.
  pub payload_len: u64,
}

impl ContainerMeta {
  /// Computes the smallest square canvas that holds `payload_len` bytes
  /// with the given `profile`. An empty payload still gets a one pixel
  /// canvas so the header never describes a zero-area image.
  pub fn for_payload(payload_len: u64, profile: ColorProfile) -> Result<Self> {
    let pixels = payload_len.div_ceil(profile.divisor());
    let side_length = ceil_sqrt(pixels).max(1);

    let meta = ContainerMeta { side_length, profile, payload_len };
    meta.checked_capacity().ok_or(Error::TooLarge(payload_len))?;

    Ok(meta)
  }

  /// Returns the total number of pixels that make up the canvas.
  pub fn num_pixels(&self) -> u64 {
    self.side_length * self.side_length
  }

  /// Number of bytes the canvas holds.
  pub fn payload_capacity(&self) -> u64 {
    self.num_pixels() * self.profile.divisor()
  }

  /// Number of filler bytes following the payload.
  pub fn filler_len(&self) -> u64 {
    self.payload_capacity().saturating_sub(self.payload_len)
  }

  pub(crate) fn checked_capacity(&self) -> Option<u64> {
    self
      .side_length
      .checked_mul(self.side_length)?
      .checked_mul(self.profile.divisor())
  }
}

// Parses ASCII decimal digits. `str::parse` alone would also accept a
// leading `+`, which no container ever contains.
pub(crate) fn parse_decimal<T: std::str::FromStr>(digits: &[u8]) -> Option<T> {
  if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
    return None;
  }

  std::str::from_utf8(digits).ok()?.parse().ok()
}

// Smallest `s` with `s * s >= n`. The float estimate is only a starting
// point and is corrected in integer arithmetic.
fn ceil_sqrt(n: u64) -> u64 {
  let mut s = (n as f64).sqrt() as u64;

  while s.checked_mul(s).map_or(true, |sq| sq > n) {
    s -= 1;
  }

  while s.checked_mul(s).map_or(false, |sq| sq < n) {
    s += 1;
  }

  s
}
