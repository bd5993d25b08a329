//! Synthetic WAV headers for tests.

use crate::fmt::WAVE_FORMAT_PCM;
use alloc::vec;
use alloc::vec::Vec;

/// Serialize a chunk: tag, little-endian length, body.
pub(crate) fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// Builds the 44 byte canonical header: `RIFF`/`WAVE`, a 16 byte `fmt `
/// chunk and the header of a `data` chunk. Sample bytes are appended by the
/// caller.
pub(crate) struct WavHeaderBuilder {
    audio_format: u16,
    num_channels: u16,
    sample_rate: u32,
    bit_depth: u16,
    data_len: u32,
}

impl WavHeaderBuilder {
    pub(crate) fn new() -> Self {
        Self {
            audio_format: WAVE_FORMAT_PCM,
            num_channels: 1,
            sample_rate: 8_000,
            bit_depth: 16,
            data_len: 0,
        }
    }

    pub(crate) fn audio_format(mut self, value: u16) -> Self {
        self.audio_format = value;
        self
    }

    pub(crate) fn num_channels(mut self, value: u16) -> Self {
        self.num_channels = value;
        self
    }

    pub(crate) fn sample_rate(mut self, value: u32) -> Self {
        self.sample_rate = value;
        self
    }

    pub(crate) fn bit_depth(mut self, value: u16) -> Self {
        self.bit_depth = value;
        self
    }

    pub(crate) fn data_len(mut self, value: u32) -> Self {
        self.data_len = value;
        self
    }

    /// Just the `fmt ` chunk, header included
    pub(crate) fn fmt_chunk(&self) -> Vec<u8> {
        let block_align = self.num_channels * self.bit_depth / 8;
        let br = (self.sample_rate * block_align as u32).to_le_bytes();
        let ba = block_align.to_le_bytes();
        let nc = self.num_channels.to_le_bytes();
        let sr = self.sample_rate.to_le_bytes();
        let bd = self.bit_depth.to_le_bytes();
        let af = self.audio_format.to_le_bytes();

        let body = vec![
            af[0], af[1], // audio format
            nc[0], nc[1], // num channels
            sr[0], sr[1], sr[2], sr[3], // sample rate
            br[0], br[1], br[2], br[3], // byte rate
            ba[0], ba[1], // block align
            bd[0], bd[1], // bits per sample
        ];

        chunk(b"fmt ", &body)
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut bytes = vec![
            0x52, 0x49, 0x46, 0x46, // RIFF
            0x00, 0x00, 0x00, 0x00, // chunk size (filled in below)
            0x57, 0x41, 0x56, 0x45, // WAVE
        ];

        bytes.extend_from_slice(&self.fmt_chunk());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&self.data_len.to_le_bytes());

        // riff length covers everything after the first two words
        let riff_len = (bytes.len() as u32 - 8 + self.data_len).to_le_bytes();
        bytes[4..8].copy_from_slice(&riff_len);

        bytes
    }
}

#[test]
fn builds_canonical_header() {
    let header = WavHeaderBuilder::new()
        .num_channels(2)
        .bit_depth(16)
        .sample_rate(48_000)
        .data_len(8)
        .build();

    let expected: [u8; 44] = [
        0x52, 0x49, 0x46, 0x46, // RIFF
        0x2c, 0x00, 0x00, 0x00, // chunk size
        0x57, 0x41, 0x56, 0x45, // WAVE
        0x66, 0x6d, 0x74, 0x20, // fmt_
        0x10, 0x00, 0x00, 0x00, // chunk size
        0x01, 0x00, // audio format
        0x02, 0x00, // num channels
        0x80, 0xbb, 0x00, 0x00, // sample rate
        0x00, 0xee, 0x02, 0x00, // byte rate
        0x04, 0x00, // block align
        0x10, 0x00, // bits per sample
        0x64, 0x61, 0x74, 0x61, // data
        0x08, 0x00, 0x00, 0x00, // chunk size
    ];

    assert_eq!(header, expected);
}
