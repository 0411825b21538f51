pub mod cursor;
pub mod gamepad;

pub use cursor::{Cursor, CursorMode, CursorState};
pub use gamepad::{GamepadSnapshot, GamepadState};
