pub mod view;

pub use view::{GuestMemory, MemoryView};
