//! Draining readers into a [`StreamingDecoder`].
//!
//! The pumps only move bytes. All parsing happens in
//! [`StreamingDecoder::feed`], so a pump sees exactly the behavior a caller
//! feeding the same bytes by hand would see.

use crate::decoder::StreamingDecoder;
use crate::error::ReadError;
use alloc::vec;

/// Buffer size used by the `_default` pump variants
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

impl StreamingDecoder<'_> {
    /// Feed everything `reader` produces until it reports end of stream.
    ///
    /// Reads at most `buffer_size` bytes at a time (a size of zero is treated
    /// as one). Returns the number of bytes fed.
    pub fn feed_reader<R>(
        &mut self,
        mut reader: R,
        buffer_size: usize,
    ) -> Result<usize, ReadError<R::Error>>
    where
        R: embedded_io::Read,
    {
        let mut buffer = vec![0; buffer_size.max(1)];
        let mut total = 0;

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => {
                    self.feed(&buffer[..n])?;
                    total += n;
                }
                Err(e) => return Err(ReadError::Reader(e)),
            }
        }

        Ok(total)
    }

    /// [`StreamingDecoder::feed_reader`] with a 4KB buffer
    pub fn feed_reader_default<R>(&mut self, reader: R) -> Result<usize, ReadError<R::Error>>
    where
        R: embedded_io::Read,
    {
        self.feed_reader(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Async version of [`StreamingDecoder::feed_reader`]
    pub async fn feed_reader_async<R>(
        &mut self,
        mut reader: R,
        buffer_size: usize,
    ) -> Result<usize, ReadError<R::Error>>
    where
        R: embedded_io_async::Read,
    {
        let mut buffer = vec![0; buffer_size.max(1)];
        let mut total = 0;

        loop {
            match reader.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => {
                    self.feed(&buffer[..n])?;
                    total += n;
                }
                Err(e) => return Err(ReadError::Reader(e)),
            }
        }

        Ok(total)
    }

    /// [`StreamingDecoder::feed_reader_async`] with a 4KB buffer
    pub async fn feed_reader_async_default<R>(
        &mut self,
        reader: R,
    ) -> Result<usize, ReadError<R::Error>>
    where
        R: embedded_io_async::Read,
    {
        self.feed_reader_async(reader, DEFAULT_BUFFER_SIZE).await
    }

    /// Feed everything a tokio reader (socket, file, pipe) produces until end
    /// of stream.
    #[cfg(feature = "std")]
    pub async fn feed_tokio_reader<R>(
        &mut self,
        mut reader: R,
        buffer_size: usize,
    ) -> Result<usize, ReadError<std::io::Error>>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        use tokio::io::AsyncReadExt;

        let mut buffer = vec![0; buffer_size.max(1)];
        let mut total = 0;

        loop {
            match reader.read(&mut buffer).await {
                Ok(0) => break,
                Ok(n) => {
                    self.feed(&buffer[..n])?;
                    total += n;
                }
                Err(e) => return Err(ReadError::Reader(e)),
            }
        }

        Ok(total)
    }
}

//-----------------------------------
// MARK: Tests
