pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod memory;
pub mod devices;
pub mod renderer;
pub mod error;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::config::BridgeConfig;
pub use api::host::HostDevices;
pub use api::session::Session;
pub use api::types::WindowGeometry;
pub use bridge::protocol::{Event, Operand};
pub use core::frame::{FrameDriver, FrameScheduler, FrameState, Guest};
pub use devices::{Cursor, CursorMode, CursorState, GamepadSnapshot, GamepadState};
pub use error::{BridgeError, Result};
pub use input::queue::EventQueue;
pub use memory::{GuestMemory, MemoryView};
pub use renderer::{HandleTable, ObjectKind, RenderDevice, RenderObject, RenderProxy};
