use crate::chunk::ChunkTag;

/// Error type for the fatal conditions a decoder can run into
///
/// Every variant except [`Error::ErrorState`] moves the decoder into its
/// terminal error state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required chunk was not where the stream needed it, e.g. the first
    /// chunk of the stream is not `RIFF`
    #[error("chunk with tag {0} not found")]
    ChunkNotFound(ChunkTag),
    /// The `RIFF` chunk does not carry the `WAVE` form type
    #[error("RIFF chunk is missing the WAVE identifier")]
    MissingWaveIdentifier,
    /// A `data` chunk appeared before any `fmt ` chunk
    #[error("data chunk found before the fmt chunk")]
    MissingFormatSpecification,
    /// The `fmt ` chunk declares an audio format other than PCM
    #[error("audio format {0} is not supported, only PCM (1) is")]
    AudioFormatNotSupported(u16),
    /// The `fmt ` chunk is shorter than the 16 bytes of a minimal PCM header
    #[error("fmt chunk is {0} bytes, at least 16 are required")]
    FmtChunkTooShort(u32),
    /// The `fmt ` chunk declares zero channels
    #[error("invalid channel count {0}")]
    InvalidChannelCount(u16),
    /// The `fmt ` chunk declares a bit depth of zero
    #[error("unsupported bit depth {0}")]
    UnsupportedBitDepth(u16),
    /// The decoder already failed and refuses further input
    #[error("decoder is in the error state")]
    ErrorState,
}

/// Error type for feeding a decoder from a reader
#[cfg(feature = "io")]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ReadError<E: core::fmt::Debug> {
    /// Error from the underlying reader
    #[error("reader failed: {0:?}")]
    Reader(E),
    /// Error from the decoder
    #[error(transparent)]
    Decoder(#[from] Error),
}
