use thiserror::Error;

use crate::renderer::handles::ObjectKind;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Failures surfaced by guest-initiated calls.
///
/// Every variant is fatal to the call that produced it; the host decides
/// whether that traps the guest. Soft failures (absent gamepads, rejected
/// clipboard writes) never show up here.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("guest memory access out of bounds (offset={offset}, len={len}, memory size={size})")]
    OutOfBounds { offset: u64, len: u64, size: usize },

    #[error("no null terminator within {scanned} bytes of guest offset {offset}")]
    UnterminatedString { offset: u32, scanned: usize },

    #[error("invalid handle {index} (table holds {len} objects)")]
    InvalidHandle { index: u32, len: usize },

    #[error("handle {index} is not a {expected}")]
    WrongObjectKind { index: u32, expected: ObjectKind },

    #[error("handle {index} refers to an object the rendering device failed to create")]
    LostObject { index: u32 },

    #[error("invalid bridge config: {0}")]
    Config(#[from] serde_json::Error),
}
