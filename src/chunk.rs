use core::fmt;

/// Size of a chunk header on the wire: 4 tag bytes and a u32 length
pub(crate) const CHUNK_HEADER_LEN: usize = 8;

/// Four character code identifying a RIFF chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// `RIFF`, the outer container chunk
    Riff,
    /// `fmt `, the format description
    Fmt,
    /// `data`, the sample data
    Data,
    /// Any other tag, kept verbatim
    Other([u8; 4]),
}

impl ChunkTag {
    /// Classify four raw tag bytes
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"RIFF" => ChunkTag::Riff,
            b"fmt " => ChunkTag::Fmt,
            b"data" => ChunkTag::Data,
            _ => ChunkTag::Other(bytes),
        }
    }

    /// The four bytes of the tag as they appear in a stream
    pub fn to_bytes(self) -> [u8; 4] {
        match self {
            ChunkTag::Riff => *b"RIFF",
            ChunkTag::Fmt => *b"fmt ",
            ChunkTag::Data => *b"data",
            ChunkTag::Other(bytes) => bytes,
        }
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// Tag and body length of a chunk
///
/// For more information on the layout see [`here`]
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// chunk identifier
    pub tag: ChunkTag,
    /// length of the chunk body in bytes, excluding the header and any pad byte
    pub len: u32,
}

impl ChunkHeader {
    pub(crate) fn from_bytes(bytes: [u8; CHUNK_HEADER_LEN]) -> Self {
        let [t0, t1, t2, t3, l0, l1, l2, l3] = bytes;

        ChunkHeader {
            tag: ChunkTag::from_bytes([t0, t1, t2, t3]),
            len: u32::from_le_bytes([l0, l1, l2, l3]),
        }
    }
}
