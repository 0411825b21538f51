use crate::devices::gamepad::GamepadState;

/// Devices the host owns and the guest may drive through the bridge.
///
/// Every method is synchronous. Failures the host cannot report (a clipboard
/// write rejected by policy, say) are the implementor's to swallow.
pub trait HostDevices {
    /// Apply a CSS cursor value to the guest's surface.
    fn set_cursor_style(&mut self, style: &str);

    /// Current state of every gamepad port, `None` for vacant ports.
    fn gamepads(&mut self) -> Vec<Option<GamepadState>>;

    /// Show `text` in a modal dialog. Blocks until dismissed.
    fn message_box(&mut self, text: &str);

    /// Write `text` to the system clipboard, fire and forget.
    fn write_clipboard(&mut self, text: &str);
}
