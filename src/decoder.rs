use crate::accumulator::Accumulator;
use crate::chunk::{CHUNK_HEADER_LEN, ChunkHeader, ChunkTag};
use crate::error::Error;
use crate::fmt::Fmt;
use crate::samples::deinterleave;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use tracing::{debug, trace, warn};

const WAVE_ID: [u8; 4] = *b"WAVE";

type InterleavedListener<'a> = Box<dyn FnMut(&[u8]) + 'a>;
type NoninterleavedListener<'a> = Box<dyn FnMut(&[Vec<u8>]) + 'a>;

/// What the decoder expects the next input bytes to be
#[derive(Debug)]
enum State {
    /// Collecting the 8 bytes of the next chunk header
    ReadChunkHeader(Accumulator),
    /// A complete header is waiting to be dispatched on its tag
    InterpretChunkHeader(ChunkHeader),
    /// Collecting the form type of a `RIFF` chunk
    RiffIdentifier(Accumulator),
    /// Collecting the body of a `fmt ` chunk
    FmtChunk {
        header: ChunkHeader,
        body: Accumulator,
    },
    /// Everything from here on is sample data. The declared length of the
    /// `data` chunk is never enforced, so this state is never left.
    DataSamples {
        header: ChunkHeader,
        fmt: Fmt,
        incomplete_frame: Accumulator,
    },
    /// Discarding the body of a chunk the decoder has no use for
    SkipChunk { header: ChunkHeader, skipped: u32 },
    /// A fatal error happened, all further input is refused
    Error,
}

impl State {
    fn read_chunk_header() -> Self {
        State::ReadChunkHeader(Accumulator::new(CHUNK_HEADER_LEN))
    }

    fn skip(header: ChunkHeader) -> Self {
        State::SkipChunk { header, skipped: 0 }
    }
}

/// Outcome of running a single state
enum Step {
    /// The state finished, run the next one right away
    Continue(State),
    /// Out of input, park in this state until the next `feed`
    Suspend(State),
}

/// Push-driven decoder extracting PCM samples from a RIFF/WAVE byte stream
///
/// Bytes are pushed with [`StreamingDecoder::feed`] in slices of any size;
/// slice boundaries may fall anywhere, including inside a chunk header or a
/// sample frame. Complete frames are handed to the registered listeners as
/// soon as they are available.
///
/// ```
/// use std::cell::RefCell;
/// use wavstream::StreamingDecoder;
///
/// let header: [u8; 44] = [
///     0x52, 0x49, 0x46, 0x46, // RIFF
///     0x24, 0x00, 0x00, 0x00, // chunk size
///     0x57, 0x41, 0x56, 0x45, // WAVE
///     0x66, 0x6d, 0x74, 0x20, // fmt_
///     0x10, 0x00, 0x00, 0x00, // chunk size
///     0x01, 0x00, // audio format
///     0x02, 0x00, // num channels
///     0x40, 0x1f, 0x00, 0x00, // sample rate
///     0x00, 0x7d, 0x00, 0x00, // byte rate
///     0x04, 0x00, // block align
///     0x10, 0x00, // bits per sample
///     0x64, 0x61, 0x74, 0x61, // data
///     0x00, 0x00, 0x00, 0x00, // chunk size
/// ];
///
/// let received = RefCell::new(vec![]);
/// let mut decoder = StreamingDecoder::new();
/// decoder.set_interleaved_listener(|samples: &[u8]| {
///     received.borrow_mut().extend_from_slice(samples)
/// });
///
/// decoder.feed(&header[..20]).unwrap();
/// decoder.feed(&header[20..]).unwrap();
/// decoder.feed(&[1, 2, 3]).unwrap();
/// assert!(received.borrow().is_empty());
///
/// decoder.feed(&[4]).unwrap();
/// assert_eq!(*received.borrow(), vec![1, 2, 3, 4]);
/// assert_eq!(decoder.format().unwrap().sample_rate, 8_000);
/// ```
pub struct StreamingDecoder<'a> {
    state: State,
    riff_wave_found: bool,
    fmt: Option<Fmt>,
    frames_emitted: u64,
    on_interleaved: Option<InterleavedListener<'a>>,
    on_noninterleaved: Option<NoninterleavedListener<'a>>,
}

impl Default for StreamingDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StreamingDecoder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingDecoder")
            .field("state", &self.state)
            .field("riff_wave_found", &self.riff_wave_found)
            .field("fmt", &self.fmt)
            .field("frames_emitted", &self.frames_emitted)
            .finish_non_exhaustive()
    }
}

impl<'a> StreamingDecoder<'a> {
    /// Create a decoder expecting the very start of a WAV stream
    pub fn new() -> Self {
        Self {
            state: State::read_chunk_header(),
            riff_wave_found: false,
            fmt: None,
            frames_emitted: 0,
            on_interleaved: None,
            on_noninterleaved: None,
        }
    }

    /// Register the listener for interleaved samples, replacing any previous one.
    ///
    /// The listener receives whole frames only, with sample bytes in
    /// little-endian order exactly as they appeared in the stream. The slice
    /// is only valid for the duration of the call.
    pub fn set_interleaved_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&[u8]) + 'a,
    {
        self.on_interleaved = Some(Box::new(listener));
    }

    /// Remove the interleaved samples listener, if any
    pub fn remove_interleaved_listener(&mut self) {
        self.on_interleaved = None;
    }

    /// Register the listener for non-interleaved samples, replacing any previous one.
    ///
    /// The listener receives one buffer per channel, each holding that
    /// channel's samples for the same span of frames the interleaved listener
    /// sees.
    pub fn set_noninterleaved_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&[Vec<u8>]) + 'a,
    {
        self.on_noninterleaved = Some(Box::new(listener));
    }

    /// Remove the non-interleaved samples listener, if any
    pub fn remove_noninterleaved_listener(&mut self) {
        self.on_noninterleaved = None;
    }

    /// Format of the sample data, `None` until a `fmt ` chunk was parsed
    pub fn format(&self) -> Option<Fmt> {
        self.fmt
    }

    /// Whether the decoder has failed and refuses further input
    pub fn is_errored(&self) -> bool {
        matches!(self.state, State::Error)
    }

    /// Whether the decoder has reached the sample data
    pub fn in_data(&self) -> bool {
        matches!(self.state, State::DataSamples { .. })
    }

    /// Length announced by the `data` chunk header, once it has been reached.
    ///
    /// Purely informational, the decoder keeps treating input as samples past
    /// this length.
    pub fn data_chunk_len(&self) -> Option<u32> {
        match &self.state {
            State::DataSamples { header, .. } => Some(header.len),
            _ => None,
        }
    }

    /// Number of complete frames delivered so far
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Push the next bytes of the stream into the decoder.
    ///
    /// Parses as far as `bytes` allows and calls the listeners for every run
    /// of complete frames, at most twice per call. Bytes that do not yet form
    /// a complete structure are kept for the next call.
    ///
    /// A returned error is fatal: every later call fails with
    /// [`Error::ErrorState`].
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut input = bytes;

        loop {
            // Left as `Error` if the step fails
            let state = mem::replace(&mut self.state, State::Error);

            match self.step(state, &mut input) {
                Ok(Step::Continue(next)) => self.state = next,
                Ok(Step::Suspend(next)) => {
                    self.state = next;
                    return Ok(());
                }
                Err(Error::ErrorState) => return Err(Error::ErrorState),
                Err(e) => {
                    warn!(error = %e, "wav decoder entered the error state");
                    return Err(e);
                }
            }
        }
    }

    fn step(&mut self, state: State, input: &mut &[u8]) -> Result<Step, Error> {
        let next = match state {
            State::Error => return Err(Error::ErrorState),
            State::ReadChunkHeader(mut acc) => {
                if !acc.fill(input) {
                    return Ok(Step::Suspend(State::ReadChunkHeader(acc)));
                }

                State::InterpretChunkHeader(ChunkHeader::from_bytes(acc.into_array()))
            }
            State::InterpretChunkHeader(header) => self.interpret(header)?,
            State::RiffIdentifier(mut acc) => {
                if !acc.fill(input) {
                    return Ok(Step::Suspend(State::RiffIdentifier(acc)));
                }

                if acc.into_array::<4>() != WAVE_ID {
                    return Err(Error::MissingWaveIdentifier);
                }

                debug!("found RIFF/WAVE container");
                self.riff_wave_found = true;
                State::read_chunk_header()
            }
            State::FmtChunk { header, mut body } => {
                if !body.fill(input) {
                    return Ok(Step::Suspend(State::FmtChunk { header, body }));
                }

                let fmt = Fmt::from_body(body.as_slice())?;
                debug!(
                    len = header.len,
                    sample_rate = fmt.sample_rate,
                    num_channels = fmt.num_channels,
                    bit_depth = fmt.bit_depth,
                    "parsed fmt chunk"
                );
                self.fmt = Some(fmt);
                State::read_chunk_header()
            }
            State::SkipChunk { header, skipped } => {
                let remaining = (header.len - skipped) as usize;
                if remaining == 0 {
                    trace!(tag = %header.tag, len = header.len, "skipped chunk");
                    return Ok(Step::Continue(State::read_chunk_header()));
                }
                if input.is_empty() {
                    return Ok(Step::Suspend(State::SkipChunk { header, skipped }));
                }

                let n = remaining.min(input.len());
                *input = &input[n..];

                State::SkipChunk {
                    header,
                    skipped: skipped + n as u32,
                }
            }
            State::DataSamples {
                header,
                fmt,
                mut incomplete_frame,
            } => {
                self.consume_samples(&fmt, &mut incomplete_frame, input);

                return Ok(Step::Suspend(State::DataSamples {
                    header,
                    fmt,
                    incomplete_frame,
                }));
            }
        };

        Ok(Step::Continue(next))
    }

    fn interpret(&mut self, header: ChunkHeader) -> Result<State, Error> {
        match header.tag {
            ChunkTag::Riff => Ok(State::RiffIdentifier(Accumulator::new(WAVE_ID.len()))),
            ChunkTag::Fmt if self.fmt.is_some() => {
                debug!(len = header.len, "ignoring repeated fmt chunk");
                Ok(State::skip(header))
            }
            ChunkTag::Fmt => Ok(State::FmtChunk {
                header,
                body: Accumulator::new(header.len as usize),
            }),
            ChunkTag::Data => match self.fmt {
                Some(fmt) => {
                    debug!(len = header.len, "entering sample data");
                    Ok(State::DataSamples {
                        header,
                        fmt,
                        incomplete_frame: Accumulator::new(fmt.frame_size()),
                    })
                }
                None => Err(Error::MissingFormatSpecification),
            },
            ChunkTag::Other(_) if self.riff_wave_found => {
                debug!(tag = %header.tag, len = header.len, "skipping chunk");
                Ok(State::skip(header))
            }
            ChunkTag::Other(_) => Err(Error::ChunkNotFound(ChunkTag::Riff)),
        }
    }

    fn consume_samples(
        &mut self,
        fmt: &Fmt,
        incomplete_frame: &mut Accumulator,
        input: &mut &[u8],
    ) {
        if !incomplete_frame.is_empty() {
            if !incomplete_frame.fill(input) {
                return;
            }

            self.emit(fmt, incomplete_frame.as_slice());
            incomplete_frame.clear();
        }

        let whole = input.len() - input.len() % fmt.frame_size();
        let (frames, mut rest) = input.split_at(whole);

        if !frames.is_empty() {
            self.emit(fmt, frames);
        }

        incomplete_frame.fill(&mut rest);
        *input = rest;
    }

    fn emit(&mut self, fmt: &Fmt, frames: &[u8]) {
        let count = frames.len() / fmt.frame_size();
        self.frames_emitted += count as u64;
        trace!(frames = count, "emitting samples");

        if let Some(listener) = self.on_interleaved.as_mut() {
            listener(frames);
        }

        if let Some(listener) = self.on_noninterleaved.as_mut() {
            listener(&deinterleave(frames, fmt));
        }
    }
}
