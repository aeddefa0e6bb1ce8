use ppm_disguise::{encode_container, encode_to_vec, ColorProfile, ContainerMeta, Error};

#[test]
fn compare_encoded_container_to_reference() {
  let source = include_bytes!("./ten_bytes.bin");
  let mut dest = Vec::new();

  let meta = encode_container(source.as_slice(), &mut dest, 10, ColorProfile::Single)
    .expect("Failed to encode container");

  assert_eq!(meta, ContainerMeta { side_length: 2, profile: ColorProfile::Single, payload_len: 10 });
  assert_eq!(include_bytes!("./ten_bytes_single.ppm").as_slice(), dest.as_slice());
}

#[test]
fn test_encoding_empty_input() {
  let dest = encode_to_vec(&[], ColorProfile::Single).expect("Failed to encode container");

  assert_eq!(dest, b"P6 1 1 255 \xde\xad\xbe #0 ");
}

#[test]
fn test_encoding_double_profile() {
  let source = [0x42; 7];
  let dest = encode_to_vec(&source, ColorProfile::Double).expect("Failed to encode container");

  // ceil(sqrt(7 / 6)) = 2, so 24 bytes of pixels.
  let header = b"P6 2 2 65535 ";
  assert!(dest.starts_with(header));
  assert_eq!(&dest[header.len()..header.len() + 7], &source);
  assert_eq!(dest[header.len() + 7], 0xde);
  assert_eq!(dest.len(), header.len() + 24 + b" #7 ".len());
  assert!(dest.ends_with(b"\xbe\xef\xde #7 "));
}

#[test]
fn test_side_length_matches_real_square_root() {
  for len in 0..200u64 {
    let source = vec![0; len as usize];
    let dest = encode_to_vec(&source, ColorProfile::Single).expect("Failed to encode container");
    let expected = ((len as f64 / 3.0).sqrt().ceil() as u64).max(1);

    let mut fields = dest.split(|&byte| byte == b' ');
    assert_eq!(fields.next(), Some(b"P6".as_slice()));
    let width = fields.next().expect("Missing width");
    let height = fields.next().expect("Missing height");

    assert_eq!(width, height);
    assert_eq!(width, expected.to_string().as_bytes(), "input of {} bytes", len);
  }
}

#[test]
fn test_filler_always_starts_with_de() {
  for len in 1..=12usize {
    let dest = encode_to_vec(&vec![0x11; len], ColorProfile::Single).expect("Failed to encode container");
    let meta = ContainerMeta::for_payload(len as u64, ColorProfile::Single).expect("Bad geometry");

    if meta.filler_len() == 0 {
      continue;
    }

    let trailer_len = format!(" #{} ", len).len();
    let header_len = dest.len() - meta.payload_capacity() as usize - trailer_len;

    assert_eq!(dest[header_len + len], 0xde, "input of {} bytes", len);
  }
}

#[test]
fn test_trailer_records_input_length() {
  let dest = encode_to_vec(&[7; 1000], ColorProfile::Double).expect("Failed to encode container");
  assert!(dest.ends_with(b" #1000 "));
}

#[test]
fn test_encoding_short_reader() {
  let source = [1, 2, 3];
  let mut dest = Vec::new();

  let result = encode_container(source.as_slice(), &mut dest, 10, ColorProfile::Single);

  assert!(matches!(result, Err(Error::UnexpectedEof)));
}
