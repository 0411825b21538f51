pub mod handles;
pub mod proxy;
pub mod traits;

// Re-export key types for convenient access
pub use handles::{HandleTable, ObjectKind};
pub use proxy::{RenderObject, RenderProxy};
pub use traits::RenderDevice;
