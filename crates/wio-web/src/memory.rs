use js_sys::{Uint8Array, WebAssembly};
use wio_bridge::GuestMemory;

/// The guest's linear memory, resolved for a single call.
///
/// `memory.grow` detaches the previous `ArrayBuffer`, so a `WasmMemory` must
/// not outlive the import call it was created for.
pub struct WasmMemory {
    bytes: Uint8Array,
}

impl WasmMemory {
    pub fn current(memory: &WebAssembly::Memory) -> Self {
        Self {
            bytes: Uint8Array::new(&memory.buffer()),
        }
    }
}

impl GuestMemory for WasmMemory {
    fn size(&self) -> usize {
        self.bytes.length() as usize
    }

    fn read(&self, offset: usize, dst: &mut [u8]) {
        self.bytes
            .subarray(offset as u32, (offset + dst.len()) as u32)
            .copy_to(dst);
    }

    fn write(&mut self, offset: usize, src: &[u8]) {
        self.bytes
            .subarray(offset as u32, (offset + src.len()) as u32)
            .copy_from(src);
    }
}
