use alloc::vec::Vec;

/// Collects bytes across `feed` calls until a fixed amount is available
///
/// The buffer only grows with bytes actually received, a large target does
/// not allocate up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Accumulator {
    bytes: Vec<u8>,
    target: usize,
}

impl Accumulator {
    pub(crate) fn new(target: usize) -> Self {
        Self {
            bytes: Vec::new(),
            target,
        }
    }

    /// Move bytes from the front of `input` until the target is reached.
    ///
    /// `input` is advanced past the consumed bytes. Returns `true` once the
    /// accumulator holds exactly `target` bytes.
    pub(crate) fn fill(&mut self, input: &mut &[u8]) -> bool {
        let wanted = self.missing().min(input.len());
        let (taken, rest) = input.split_at(wanted);

        self.bytes.extend_from_slice(taken);
        *input = rest;

        self.is_full()
    }

    pub(crate) fn missing(&self) -> usize {
        self.target - self.bytes.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.bytes.len() == self.target
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Forget the collected bytes, keeping the target and the allocation.
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    pub(crate) fn into_array<const N: usize>(self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.bytes[..N]);
        out
    }
}
