/// Options that control how strictly a container is checked while decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
  /// When set, the header must describe a square P6 canvas of a known
  /// color profile, the pixel data must fill exactly that canvas, and the
  /// trailer's length must fit in it.
  ///
  /// When cleared, header fields are skipped without being read and the
  /// payload is copied from after the fourth header separator for as many
  /// bytes as the trailer records, or until the source ends.
  pub strict: bool,
}

impl DecodeOptions {
  pub fn strict() -> Self {
    Self { strict: true }
  }

  pub fn lenient() -> Self {
    Self { strict: false }
  }
}

impl Default for DecodeOptions {
  fn default() -> Self {
    Self::strict()
  }
}
