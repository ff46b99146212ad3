use std::fmt;
use std::ops::RangeInclusive;

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// Flat, byte-addressable 8080 memory.
///
/// Addresses are `u16`, so every address on the 16-bit bus is valid and
/// address arithmetic wraps instead of faulting. The buffer is allocated once
/// and zero-initialised.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }

    /// Read a little-endian word. The high byte address wraps past 0xFFFF.
    #[inline]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    #[inline]
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    /// Copy `data` into memory starting at `addr`.
    ///
    /// At most `MEMORY_SIZE` bytes are copied; writes past 0xFFFF wrap around
    /// to 0x0000. Returns the number of bytes written.
    pub fn load(&mut self, addr: u16, data: &[u8]) -> usize {
        let len = data.len().min(MEMORY_SIZE);
        if len < data.len() {
            log::warn!(
                "Program image of {} bytes truncated to {} bytes",
                data.len(),
                len
            );
        }

        let start = addr as usize;
        let first = len.min(MEMORY_SIZE - start);
        self.bytes[start..start + first].copy_from_slice(&data[..first]);
        if first < len {
            // Remainder wraps to the bottom of the address space.
            self.bytes[..len - first].copy_from_slice(&data[first..len]);
        }
        len
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrow a window of memory, e.g. a frame buffer for a renderer.
    ///
    /// Both ends are inclusive, so `0x0000..=0xFFFF` is the whole address
    /// space. Panics if the start lies past the end.
    pub fn range(&self, range: RangeInclusive<u16>) -> &[u8] {
        let (start, end) = range.into_inner();
        assert!(start <= end, "reversed memory window {:04X}..={:04X}", start, end);
        &self.bytes[start as usize..=end as usize]
    }

    /// Zero the whole address space.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.bytes.len())
            .finish()
    }
}
