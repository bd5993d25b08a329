use crate::error::Error;

/// Minimal size of a PCM `fmt ` body
pub(crate) const PCM_FMT_LEN: usize = 16;

/// Format code for linear PCM, the only one the decoder accepts
pub(crate) const WAVE_FORMAT_PCM: u16 = 1;

/// Struct representing the `fmt ` section of a WAV stream
///
/// for more information see [`here`]
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fmt {
    /// sample rate, typical values are `44_100`, `48_000` or `96_000`
    pub sample_rate: u32,
    /// number of audio channels in the sample data, channels are interleaved
    pub num_channels: u16,
    /// bit depth for each sample, typical values are `16`, `24`, or `32`
    pub bit_depth: u16,
}

impl Fmt {
    /// Bytes taken by a single sample of a single channel.
    ///
    /// Bit depths that are not a multiple of 8 are rounded up, so a 12 bit
    /// stream uses 2 bytes per sample.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bit_depth as usize).div_ceil(8)
    }

    /// Bytes taken by one frame, i.e. one sample for every channel.
    pub fn frame_size(&self) -> usize {
        self.bytes_per_sample() * self.num_channels as usize
    }

    /// Parse a complete `fmt ` chunk body.
    ///
    /// Only the first 16 bytes are interpreted, anything after them (e.g. the
    /// `cbSize` extension) is ignored. Byte rate and block align are not
    /// checked against the other fields.
    pub(crate) fn from_body(body: &[u8]) -> Result<Self, Error> {
        if body.len() < PCM_FMT_LEN {
            return Err(Error::FmtChunkTooShort(body.len() as u32));
        }

        let audio_format = read_u16(body, 0);
        if audio_format != WAVE_FORMAT_PCM {
            return Err(Error::AudioFormatNotSupported(audio_format));
        }

        let num_channels = read_u16(body, 2);
        let sample_rate = read_u32(body, 4);
        // 8..12 byte rate, 12..14 block align
        let bit_depth = read_u16(body, 14);

        if num_channels == 0 {
            return Err(Error::InvalidChannelCount(num_channels));
        }
        if bit_depth == 0 {
            return Err(Error::UnsupportedBitDepth(bit_depth));
        }

        Ok(Fmt {
            sample_rate,
            num_channels,
            bit_depth,
        })
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEREO_16_22050: [u8; 16] = [
        0x01, 0x00, // audio format
        0x02, 0x00, // num channels
        0x22, 0x56, 0x00, 0x00, // sample rate
        0x88, 0x58, 0x01, 0x00, // byte rate
        0x04, 0x00, // block align
        0x10, 0x00, // bits per sample
    ];

    #[test]
    fn parse_pcm_body() {
        let fmt = Fmt::from_body(&STEREO_16_22050).unwrap();

        assert_eq!(fmt.sample_rate, 22050);
        assert_eq!(fmt.num_channels, 2);
        assert_eq!(fmt.bit_depth, 16);
        assert_eq!(fmt.bytes_per_sample(), 2);
        assert_eq!(fmt.frame_size(), 4);
    }

    #[test]
    fn ignores_extension_bytes() {
        let mut body = STEREO_16_22050.to_vec();
        body.extend_from_slice(&[0x00, 0x00]); // cbSize

        assert_eq!(
            Fmt::from_body(&body).unwrap(),
            Fmt::from_body(&STEREO_16_22050).unwrap()
        );
    }

    #[test]
    fn rejects_non_pcm() {
        let mut body = STEREO_16_22050;
        body[0] = 0x03; // IEEE float

        assert_eq!(Fmt::from_body(&body), Err(Error::AudioFormatNotSupported(3)));
    }

    #[test]
    fn rejects_short_body() {
        assert_eq!(
            Fmt::from_body(&STEREO_16_22050[..14]),
            Err(Error::FmtChunkTooShort(14))
        );
    }

    #[test]
    fn rejects_zero_channels_and_bit_depth() {
        let mut body = STEREO_16_22050;
        body[2] = 0;
        assert_eq!(Fmt::from_body(&body), Err(Error::InvalidChannelCount(0)));

        let mut body = STEREO_16_22050;
        body[14] = 0;
        assert_eq!(Fmt::from_body(&body), Err(Error::UnsupportedBitDepth(0)));
    }

    #[test]
    fn odd_bit_depths_round_up() {
        let fmt = Fmt {
            sample_rate: 8_000,
            num_channels: 3,
            bit_depth: 12,
        };

        assert_eq!(fmt.bytes_per_sample(), 2);
        assert_eq!(fmt.frame_size(), 6);
    }
}
