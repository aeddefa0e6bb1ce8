use std::io;

/// Bytes used to pad the canvas after the payload, repeated byte by byte.
pub const FILLER_PATTERN: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

// Multiple of the pattern length, so every chunk starts at phase 0.
const FILLER_CHUNK_LEN: usize = 4096;

/// Returns the filler byte at `index` within the filler region. The pattern
/// always restarts at the first filler byte, whatever the payload length.
pub fn filler_byte(index: u64) -> u8 {
  FILLER_PATTERN[(index % FILLER_PATTERN.len() as u64) as usize]
}

// Writes `len` filler bytes to the writer.
pub(crate) fn write_filler<W: io::Write>(mut writer: W, len: u64) -> Result<(), io::Error> {
  let chunk: Vec<u8> = (0..FILLER_CHUNK_LEN as u64).map(filler_byte).collect();
  let mut remaining = len;

  while remaining > 0 {
    let n = remaining.min(FILLER_CHUNK_LEN as u64) as usize;
    writer.write_all(&chunk[..n])?;
    remaining -= n as u64;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_filler_byte_cycles() {
    let bytes: Vec<u8> = (0..9).map(filler_byte).collect();
    assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef, 0xde, 0xad, 0xbe, 0xef, 0xde]);
  }

  #[test]
  fn test_write_filler_across_chunks() {
    let mut dest = Vec::new();
    write_filler(&mut dest, FILLER_CHUNK_LEN as u64 + 3).expect("Failed to write filler");

    assert_eq!(dest.len(), FILLER_CHUNK_LEN + 3);
    assert_eq!(&dest[FILLER_CHUNK_LEN - 1..], &[0xef, 0xde, 0xad, 0xbe]);
  }

  #[test]
  fn test_write_no_filler() {
    let mut dest = Vec::new();
    write_filler(&mut dest, 0).expect("Failed to write filler");
    assert!(dest.is_empty());
  }
}
