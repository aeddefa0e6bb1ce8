//! This crate disguises arbitrary bytes as a raw
//! [PPM "P6" image](https://netpbm.sourceforge.net/doc/ppm.html), and
//! recovers the original bytes from such an image.
//!
//! An encoded container is laid out as:
//!
//! ```text
//! "P6" SP <side> SP <side> SP <max value> SP
//! <input bytes> <DE AD BE EF filler up to side * side * bytes per pixel>
//! SP "#" <input length> SP
//! ```
//!
//! The canvas is the smallest square whose pixels hold the input, given the
//! bytes per pixel of the chosen [`ColorProfile`]. Image viewers stop reading
//! after the pixel data, so the trailing `#<length>` block goes unnoticed,
//! while the decoder finds it by scanning backward from the end.
//!
//! The two primary exports are the `encode_container` and `decode_container`
//! functions. Encoding streams from any `std::io::Read`, decoding needs the
//! container as a byte slice because the trailer sits at its end. Both write
//! to any `std::io::Write`.
//!
//! # In-memory example
//!
//! ```rust
//! use ppm_disguise::{decode_to_vec, encode_to_vec, ColorProfile, DecodeOptions};
//!
//! let secret = b"ten bytes!";
//!
//! let container = encode_to_vec(secret, ColorProfile::Single).unwrap();
//! assert!(container.starts_with(b"P6 2 2 255 "));
//! assert!(container.ends_with(b"\xde\xad #10 "));
//!
//! let recovered = decode_to_vec(&container, &DecodeOptions::default()).unwrap();
//! assert_eq!(recovered, secret);
//! ```
//!
//! # Streaming encode example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufWriter;
//! use ppm_disguise::{encode_container, ColorProfile};
//!
//! let source = File::open("archive.tar").expect("Failed to open input");
//! let input_len = source.metadata().expect("Failed to stat input").len();
//! let writer = BufWriter::new(File::create("archive.ppm").expect("Failed to create output"));
//!
//! match encode_container(source, writer, input_len, ColorProfile::Double) {
//!   Ok(meta) => {
//!     // A `side_length` x `side_length` image.
//!     dbg!(meta);
//!   }
//!   Err(e) => {
//!     // See `error.rs` for all possible errors.
//!     panic!("{}", e);
//!   }
//! }
//! ```

pub use crate::decode::{decode_container, decode_to_vec, DecodedContainer};
pub use crate::encode::{encode_container, encode_to_vec};
pub use crate::error::{Error, ErrorClass, Result};
pub use crate::filler::{filler_byte, FILLER_PATTERN};
pub use crate::header::{CanvasHeader, HeaderScanner, HeaderState, RawHeader};
pub use crate::options::DecodeOptions;
pub use crate::profile::{ColorProfile, ContainerMeta};
pub use crate::trailer::{scan_trailer, TrailerScan};

mod decode;
mod encode;
mod error;
mod filler;
mod header;
mod options;
mod profile;
mod trailer;
