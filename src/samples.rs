//! Conversion between interleaved and per-channel sample layouts.
//!
//! All functions work on raw little-endian sample bytes and never look at
//! sample values.

use crate::fmt::Fmt;
use alloc::vec;
use alloc::vec::Vec;

/// Split interleaved frames into one buffer per channel.
///
/// Byte `b` of sample `i` of channel `c` is taken from offset
/// `i * frame_size + c * bytes_per_sample + b` of `interleaved`. A trailing
/// incomplete frame is ignored.
///
/// ```
/// use wavstream::{Fmt, deinterleave};
///
/// let fmt = Fmt { sample_rate: 8_000, num_channels: 2, bit_depth: 16 };
/// let channels = deinterleave(&[1, 2, 3, 4, 5, 6, 7, 8], &fmt);
///
/// assert_eq!(channels, vec![vec![1, 2, 5, 6], vec![3, 4, 7, 8]]);
/// ```
pub fn deinterleave(interleaved: &[u8], fmt: &Fmt) -> Vec<Vec<u8>> {
    let bytes_per_sample = fmt.bytes_per_sample();
    let frame_size = fmt.frame_size();
    let frames = if frame_size == 0 {
        0
    } else {
        interleaved.len() / frame_size
    };

    let mut channels: Vec<Vec<u8>> = (0..fmt.num_channels)
        .map(|_| Vec::with_capacity(frames * bytes_per_sample))
        .collect();

    for frame in interleaved.chunks_exact(frame_size.max(1)).take(frames) {
        for (channel, sample) in channels.iter_mut().zip(frame.chunks_exact(bytes_per_sample)) {
            channel.extend_from_slice(sample);
        }
    }

    channels
}

/// Weave per-channel buffers back into interleaved frames.
///
/// Inverse of [`deinterleave`]. Only as many frames as the shortest channel
/// holds are produced.
pub fn interleave<B: AsRef<[u8]>>(channels: &[B], bytes_per_sample: usize) -> Vec<u8> {
    if bytes_per_sample == 0 {
        return vec![];
    }

    let frames = channels
        .iter()
        .map(|c| c.as_ref().len() / bytes_per_sample)
        .min()
        .unwrap_or(0);

    let mut out = Vec::with_capacity(frames * bytes_per_sample * channels.len());
    for i in 0..frames {
        let range = i * bytes_per_sample..(i + 1) * bytes_per_sample;
        for channel in channels {
            out.extend_from_slice(&channel.as_ref()[range.clone()]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(num_channels: u16, bit_depth: u16) -> Fmt {
        Fmt {
            sample_rate: 48_000,
            num_channels,
            bit_depth,
        }
    }

    #[test]
    fn deinterleave_stereo_16() {
        let channels = deinterleave(&[1, 2, 3, 4, 5, 6, 7, 8], &fmt(2, 16));

        assert_eq!(channels, vec![vec![1, 2, 5, 6], vec![3, 4, 7, 8]]);
    }

    #[test]
    fn deinterleave_mono_is_identity() {
        let bytes = [0x00, 0x24, 0x17, 0x1e, 0xf3, 0x3c];

        assert_eq!(deinterleave(&bytes, &fmt(1, 24)), vec![bytes.to_vec()]);
    }

    #[test]
    fn deinterleave_three_channels_24_bit() {
        let bytes: Vec<u8> = (0..18).collect();
        let channels = deinterleave(&bytes, &fmt(3, 24));

        assert_eq!(
            channels,
            vec![
                vec![0, 1, 2, 9, 10, 11],
                vec![3, 4, 5, 12, 13, 14],
                vec![6, 7, 8, 15, 16, 17],
            ]
        );
    }

    #[test]
    fn deinterleave_drops_trailing_partial_frame() {
        let channels = deinterleave(&[1, 2, 3, 4, 5], &fmt(2, 16));

        assert_eq!(channels, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn deinterleave_empty_input_gives_empty_channels() {
        let channels = deinterleave(&[], &fmt(4, 8));

        assert_eq!(channels.len(), 4);
        assert!(channels.iter().all(|c| c.is_empty()));
    }

    #[test]
    fn interleave_restores_original_bytes() {
        for num_channels in 1..=8u16 {
            for bit_depth in [8u16, 12, 16, 24, 32] {
                let fmt = fmt(num_channels, bit_depth);
                let bytes: Vec<u8> = (0..fmt.frame_size() * 5).map(|b| b as u8).collect();

                let channels = deinterleave(&bytes, &fmt);

                assert_eq!(interleave(&channels, fmt.bytes_per_sample()), bytes);
            }
        }
    }
}
