use std::io;

use tracing::debug;

use crate::error::{Error, Result};
use crate::filler::write_filler;
use crate::profile::{
  ColorProfile, ContainerMeta, PPM_BYTES_MAGIC, PPM_TRAILER_MARKER, PPM_WHITESPACE,
};

/// Encodes `input_len` bytes read from `reader` into a P6 container written
/// to `writer`, and returns the `ContainerMeta` describing it.
///
/// The container is the header, the input bytes, filler up to the square
/// canvas' capacity, and a trailer recording `input_len`. The length must be
/// known up front because it determines the header; a reader that yields
/// fewer bytes fails with `Error::UnexpectedEof`, and bytes past
/// `input_len` are left unread.
///
/// This function supports reading and writing to in-memory structures or IO
/// streams by accepting a generic trait bound of `std::io::Read` for the
/// source, and `std::io::Write` for the container's destination. Buffered IO
/// such as `std::io::BufWriter` is recommended for files, since the header
/// and trailer are written in several small pieces.
pub fn encode_container<R: io::Read, W: io::Write>(
  reader: R,
  mut writer: W,
  input_len: u64,
  profile: ColorProfile,
) -> Result<ContainerMeta> {
  let meta = ContainerMeta::for_payload(input_len, profile)?;

  debug!(
    input_len,
    side_length = meta.side_length,
    filler_len = meta.filler_len(),
    "encoding container"
  );

  encode_header(&meta, &mut writer)?;

  let copied = io::copy(&mut reader.take(input_len), &mut writer)?;
  if copied != input_len {
    return Err(Error::UnexpectedEof);
  }

  write_filler(&mut writer, meta.filler_len())?;
  encode_trailer(&meta, &mut writer)?;
  writer.flush()?;

  Ok(meta)
}

/// Encodes an in-memory byte slice, returning the whole container.
pub fn encode_to_vec(data: &[u8], profile: ColorProfile) -> Result<Vec<u8>> {
  let mut dest = Vec::with_capacity(data.len() + 64);
  encode_container(data, &mut dest, data.len() as u64, profile)?;
  Ok(dest)
}

// Writes the magic number, width, height and max channel value, each
// followed by a single whitespace byte.
fn encode_header<W: io::Write>(meta: &ContainerMeta, mut writer: W) -> Result<(), io::Error> {
  let side_length = meta.side_length.to_string();
  let max_value = meta.profile.max_channel_value().to_string();

  writer.write_all(PPM_BYTES_MAGIC)?;

  for field in [&side_length, &side_length, &max_value] {
    writer.write_all(&[PPM_WHITESPACE])?;
    writer.write_all(field.as_bytes())?;
  }

  writer.write_all(&[PPM_WHITESPACE])?;
  Ok(())
}

// Writes ` #<payload_len> `.
fn encode_trailer<W: io::Write>(meta: &ContainerMeta, mut writer: W) -> Result<(), io::Error> {
  writer.write_all(&[PPM_WHITESPACE, PPM_TRAILER_MARKER])?;
  writer.write_all(meta.payload_len.to_string().as_bytes())?;
  writer.write_all(&[PPM_WHITESPACE])?;
  Ok(())
}
