//! Bounds-checked access to guest linear memory.
//!
//! The guest's memory can grow between calls, so nothing here caches an
//! address or a length: a [`MemoryView`] is built for one call and every
//! access is checked against the extent the memory reports at that moment.
//!
//! WASM linear memory is little-endian; typed accesses copy element bytes
//! verbatim, which is only correct on little-endian hosts.

use bytemuck::Pod;

use crate::error::{BridgeError, Result};

#[cfg(target_endian = "big")]
compile_error!("wio-bridge assumes a little-endian host to match WASM linear memory");

/// Raw guest linear memory.
///
/// Implementors only copy bytes; bounds are validated by [`MemoryView`]
/// before `read`/`write` are called.
pub trait GuestMemory {
    /// Current extent of the memory in bytes.
    fn size(&self) -> usize;

    /// Copy `dst.len()` bytes starting at `offset` into `dst`.
    fn read(&self, offset: usize, dst: &mut [u8]);

    /// Copy `src` into memory starting at `offset`.
    fn write(&mut self, offset: usize, src: &[u8]);

    /// Position of the first `byte` in `[offset, offset + limit)`, relative to `offset`.
    fn find(&self, offset: usize, limit: usize, byte: u8) -> Option<usize> {
        let mut chunk = [0u8; 256];
        let mut scanned = 0;
        while scanned < limit {
            let n = chunk.len().min(limit - scanned);
            self.read(offset + scanned, &mut chunk[..n]);
            if let Some(pos) = chunk[..n].iter().position(|&b| b == byte) {
                return Some(scanned + pos);
            }
            scanned += n;
        }
        None
    }
}

impl GuestMemory for [u8] {
    fn size(&self) -> usize {
        self.len()
    }

    fn read(&self, offset: usize, dst: &mut [u8]) {
        dst.copy_from_slice(&self[offset..offset + dst.len()]);
    }

    fn write(&mut self, offset: usize, src: &[u8]) {
        self[offset..offset + src.len()].copy_from_slice(src);
    }

    fn find(&self, offset: usize, limit: usize, byte: u8) -> Option<usize> {
        self[offset..offset + limit].iter().position(|&b| b == byte)
    }
}

impl GuestMemory for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read(&self, offset: usize, dst: &mut [u8]) {
        self.as_slice().read(offset, dst)
    }

    fn write(&mut self, offset: usize, src: &[u8]) {
        self.as_mut_slice().write(offset, src)
    }

    fn find(&self, offset: usize, limit: usize, byte: u8) -> Option<usize> {
        self.as_slice().find(offset, limit, byte)
    }
}

/// A per-call view over guest memory.
pub struct MemoryView<'m, M: GuestMemory + ?Sized> {
    memory: &'m mut M,
    max_cstr_len: usize,
}

impl<'m, M: GuestMemory + ?Sized> MemoryView<'m, M> {
    /// `max_cstr_len` bounds how far a null-terminated read may scan.
    pub fn new(memory: &'m mut M, max_cstr_len: usize) -> Self {
        Self {
            memory,
            max_cstr_len,
        }
    }

    /// Current extent of the underlying memory in bytes.
    pub fn size(&self) -> usize {
        self.memory.size()
    }

    /// Validate `[offset, offset + len)` and return the start as a `usize`.
    fn check(&self, offset: u32, len: u64) -> Result<usize> {
        let size = self.memory.size();
        let end = offset as u64 + len;
        if end > size as u64 {
            return Err(BridgeError::OutOfBounds {
                offset: offset as u64,
                len,
                size,
            });
        }
        Ok(offset as usize)
    }

    /// Copy `len` bytes out of guest memory.
    pub fn read_bytes(&self, offset: u32, len: u32) -> Result<Vec<u8>> {
        let start = self.check(offset, len as u64)?;
        let mut out = vec![0u8; len as usize];
        self.memory.read(start, &mut out);
        Ok(out)
    }

    /// Decode `len` bytes of UTF-8. Invalid sequences become U+FFFD.
    pub fn read_str(&self, offset: u32, len: u32) -> Result<String> {
        let bytes = self.read_bytes(offset, len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Bytes from `offset` up to (not including) the first zero byte.
    ///
    /// The scan stops at the end of memory or after `max_cstr_len` bytes,
    /// whichever comes first.
    pub fn read_cstr_bytes(&self, offset: u32) -> Result<Vec<u8>> {
        let start = self.check(offset, 0)?;
        let limit = (self.memory.size() - start).min(self.max_cstr_len);
        match self.memory.find(start, limit, 0) {
            Some(len) => {
                let mut out = vec![0u8; len];
                self.memory.read(start, &mut out);
                Ok(out)
            }
            None => Err(BridgeError::UnterminatedString {
                offset,
                scanned: limit,
            }),
        }
    }

    /// Decode a null-terminated UTF-8 string.
    pub fn read_cstr(&self, offset: u32) -> Result<String> {
        let bytes = self.read_cstr_bytes(offset)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Copy `bytes` into guest memory. Writing nothing is a no-op, even at
    /// an offset past the end of memory.
    pub fn write_bytes(&mut self, offset: u32, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let start = self.check(offset, bytes.len() as u64)?;
        self.memory.write(start, bytes);
        Ok(())
    }

    /// Read `count` elements of `T`. `offset` need not be aligned.
    pub fn read_slice<T: Pod>(&self, offset: u32, count: u32) -> Result<Vec<T>> {
        let len = count as u64 * std::mem::size_of::<T>() as u64;
        let start = self.check(offset, len)?;
        let mut bytes = vec![0u8; len as usize];
        self.memory.read(start, &mut bytes);
        Ok(bytemuck::pod_collect_to_vec(&bytes))
    }

    /// Write `values` as consecutive elements starting at `offset`.
    pub fn write_slice<T: Pod>(&mut self, offset: u32, values: &[T]) -> Result<()> {
        self.write_bytes(offset, bytemuck::cast_slice(values))
    }

    /// Fail unless `count` elements of `T` fit at `offset`.
    pub fn ensure_slice<T: Pod>(&self, offset: u32, count: u32) -> Result<()> {
        self.check(offset, count as u64 * std::mem::size_of::<T>() as u64)
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(offset: usize, bytes: &[u8]) -> Vec<u8> {
        let mut mem = vec![0xAAu8; 64];
        mem[offset..offset + bytes.len()].copy_from_slice(bytes);
        mem
    }

    #[test]
    fn reads_fixed_length_string() {
        let mut mem = memory_with(8, b"hello world");
        let view = MemoryView::new(&mut mem, 1024);
        assert_eq!(view.read_str(8, 5).unwrap(), "hello");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut mem = memory_with(0, &[b'a', 0xFF, b'b']);
        let view = MemoryView::new(&mut mem, 1024);
        assert_eq!(view.read_str(0, 3).unwrap(), "a\u{FFFD}b");
    }

    #[test]
    fn read_past_end_fails() {
        let mut mem = vec![0u8; 16];
        let view = MemoryView::new(&mut mem, 1024);
        assert!(view.read_bytes(10, 6).is_ok());
        match view.read_bytes(10, 7) {
            Err(BridgeError::OutOfBounds { offset, len, size }) => {
                assert_eq!((offset, len, size), (10, 7, 16));
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn offset_overflow_does_not_wrap() {
        let mut mem = vec![0u8; 16];
        let view = MemoryView::new(&mut mem, 1024);
        assert!(view.read_bytes(u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn reads_null_terminated_string() {
        let mut mem = memory_with(4, b"position\0junk");
        let view = MemoryView::new(&mut mem, 1024);
        assert_eq!(view.read_cstr(4).unwrap(), "position");
    }

    #[test]
    fn empty_cstr() {
        let mut mem = memory_with(0, b"\0");
        let view = MemoryView::new(&mut mem, 1024);
        assert_eq!(view.read_cstr(0).unwrap(), "");
    }

    #[test]
    fn unterminated_string_at_end_of_memory_fails() {
        let mut mem = vec![b'x'; 32];
        let view = MemoryView::new(&mut mem, 1024);
        match view.read_cstr(20) {
            Err(BridgeError::UnterminatedString { offset, scanned }) => {
                assert_eq!(offset, 20);
                assert_eq!(scanned, 12);
            }
            other => panic!("expected UnterminatedString, got {:?}", other),
        }
    }

    #[test]
    fn cstr_scan_is_capped() {
        let mut mem = vec![b'x'; 1024];
        mem[1000] = 0;
        let view = MemoryView::new(&mut mem, 100);
        match view.read_cstr(0) {
            Err(BridgeError::UnterminatedString { scanned, .. }) => assert_eq!(scanned, 100),
            other => panic!("expected UnterminatedString, got {:?}", other),
        }
    }

    #[test]
    fn zero_length_write_is_noop_anywhere() {
        let mut mem = vec![0u8; 8];
        let mut view = MemoryView::new(&mut mem, 1024);
        view.write_bytes(4096, &[]).unwrap();
        assert_eq!(mem, vec![0u8; 8]);
    }

    #[test]
    fn writes_bytes_in_place() {
        let mut mem = vec![0u8; 8];
        let mut view = MemoryView::new(&mut mem, 1024);
        view.write_bytes(2, b"abc").unwrap();
        assert!(view.write_bytes(6, b"abc").is_err());
        assert_eq!(&mem[..6], b"\0\0abc\0");
    }

    #[test]
    fn typed_slices_are_little_endian_and_unaligned() {
        let mut mem = vec![0u8; 16];
        let mut view = MemoryView::new(&mut mem, 1024);
        view.write_slice::<u32>(1, &[1, 0x0102_0304]).unwrap();
        assert_eq!(view.read_slice::<u32>(1, 2).unwrap(), vec![1, 0x0102_0304]);
        assert_eq!(view.read_slice::<i32>(5, 1).unwrap(), vec![0x0102_0304]);
        assert_eq!(&mem[1..9], &[1, 0, 0, 0, 4, 3, 2, 1]);
    }

    #[test]
    fn ensure_slice_checks_element_width() {
        let mut mem = vec![0u8; 16];
        let view = MemoryView::new(&mut mem, 1024);
        assert!(view.ensure_slice::<u32>(8, 2).is_ok());
        assert!(view.ensure_slice::<u32>(8, 3).is_err());
    }

    #[test]
    fn chunked_find_spans_chunks() {
        struct Chunked(Vec<u8>);
        impl GuestMemory for Chunked {
            fn size(&self) -> usize {
                self.0.len()
            }
            fn read(&self, offset: usize, dst: &mut [u8]) {
                dst.copy_from_slice(&self.0[offset..offset + dst.len()]);
            }
            fn write(&mut self, offset: usize, src: &[u8]) {
                self.0[offset..offset + src.len()].copy_from_slice(src);
            }
        }

        let mut bytes = vec![b'y'; 700];
        bytes[600] = 0;
        let mut mem = Chunked(bytes);
        let view = MemoryView::new(&mut mem, 4096);
        assert_eq!(view.read_cstr_bytes(10).unwrap().len(), 590);
    }
}
