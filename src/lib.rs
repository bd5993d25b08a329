//! `no_std` push-driven decoder for RIFF/WAVE PCM streams.
//!
//! [`StreamingDecoder`] takes the bytes of a WAV stream in slices of any size,
//! e.g. as they arrive from a socket, and hands out the PCM sample bytes as
//! soon as whole frames are available. Nothing has to be buffered by the
//! caller, and slice boundaries may split chunk headers, the format chunk or
//! sample frames anywhere.
//!
//! Decoding a stream fed in arbitrary pieces:
//! ```
//! use std::cell::RefCell;
//! use wavstream::StreamingDecoder;
//!
//! # let stream: Vec<u8> = [
//! #     &b"RIFF\x2c\x00\x00\x00WAVEfmt \x10\x00\x00\x00"[..],
//! #     &[0x01, 0x00, 0x02, 0x00, 0x80, 0xbb, 0x00, 0x00],
//! #     &[0x00, 0xee, 0x02, 0x00, 0x04, 0x00, 0x10, 0x00],
//! #     &b"data\x08\x00\x00\x00"[..],
//! #     &[1, 0, 2, 0, 3, 0, 0xff, 0xff],
//! # ].concat();
//! let left = RefCell::new(vec![]);
//! let right = RefCell::new(vec![]);
//!
//! let mut decoder = StreamingDecoder::new();
//! decoder.set_noninterleaved_listener(|channels: &[Vec<u8>]| {
//!     left.borrow_mut().extend_from_slice(&channels[0]);
//!     right.borrow_mut().extend_from_slice(&channels[1]);
//! });
//!
//! for piece in stream.chunks(3) {
//!     decoder.feed(piece).unwrap();
//! }
//!
//! let fmt = decoder.format().unwrap();
//! assert_eq!(fmt.num_channels, 2);
//! assert_eq!(fmt.bit_depth, 16);
//! assert_eq!(fmt.sample_rate, 48_000);
//!
//! assert_eq!(*left.borrow(), vec![1, 0, 3, 0]);
//! assert_eq!(*right.borrow(), vec![2, 0, 0xff, 0xff]);
//! ```
//!
//! The length of the `data` chunk is not enforced: every byte after the
//! `data` chunk header is treated as sample data, so a stream can be decoded
//! before its total length is known. Only PCM is supported.
//!
//! Errors are fatal. After [`StreamingDecoder::feed`] returned an error, every
//! further call fails with [`Error::ErrorState`]:
//! ```
//! use wavstream::{ChunkTag, Error, StreamingDecoder};
//!
//! let mut decoder = StreamingDecoder::new();
//!
//! assert_eq!(decoder.feed(&[0; 8]), Err(Error::ChunkNotFound(ChunkTag::Riff)));
//! assert_eq!(decoder.feed(b"RIFF"), Err(Error::ErrorState));
//! ```
//!
//! Feeding from a reader (requires the "io" feature):
//! ```
//! # #[cfg(feature = "io")]
//! # fn main() {
//! # let bytes: Vec<u8> = [
//! #     &b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00"[..],
//! #     &[0x01, 0x00, 0x01, 0x00, 0x40, 0x1f, 0x00, 0x00],
//! #     &[0x80, 0x3e, 0x00, 0x00, 0x02, 0x00, 0x10, 0x00],
//! #     &b"data\x00\x00\x00\x00"[..],
//! # ].concat();
//! let mut decoder = wavstream::StreamingDecoder::new();
//!
//! decoder.feed_reader_default(&bytes[..]).unwrap();
//!
//! assert_eq!(decoder.format().unwrap().sample_rate, 8_000);
//! # }
//! # #[cfg(not(feature = "io"))]
//! # fn main() {}
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod accumulator;
mod chunk;
mod decoder;
mod error;
mod fmt;
mod samples;

#[cfg(test)]
mod test_utils;

pub use chunk::{ChunkHeader, ChunkTag};
pub use decoder::StreamingDecoder;
pub use error::Error;
pub use fmt::Fmt;
pub use samples::{deinterleave, interleave};

#[cfg(feature = "io")]
mod pump;
#[cfg(feature = "io")]
pub use error::ReadError;
#[cfg(feature = "io")]
pub use pump::DEFAULT_BUFFER_SIZE;
