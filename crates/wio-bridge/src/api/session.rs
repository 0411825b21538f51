use glam::DVec2;

use crate::api::config::BridgeConfig;
use crate::api::host::HostDevices;
use crate::api::types::WindowGeometry;
use crate::devices::cursor::{Cursor, CursorMode, CursorState};
use crate::devices::gamepad::GamepadSnapshot;
use crate::error::Result;
use crate::input::queue::EventQueue;
use crate::input::translate;
use crate::memory::view::{GuestMemory, MemoryView};
use crate::renderer::proxy::RenderProxy;
use crate::renderer::traits::RenderDevice;

/// All bridge state for one guest, passed explicitly to every operation.
///
/// Host callbacks use the `on_*` methods to enqueue events. Guest imports use
/// the rest; those that touch guest memory take the memory for that one call.
pub struct Session<H: HostDevices, D: RenderDevice> {
    config: BridgeConfig,
    events: EventQueue,
    log: String,
    cursor: CursorState,
    gamepads: GamepadSnapshot,
    render: RenderProxy<D>,
    host: H,
}

impl<H: HostDevices, D: RenderDevice> Session<H, D> {
    pub fn new(config: BridgeConfig, host: H, device: D) -> Self {
        Self {
            events: EventQueue::with_capacity(config.queue_capacity),
            config,
            log: String::new(),
            cursor: CursorState::default(),
            gamepads: GamepadSnapshot::new(),
            render: RenderProxy::new(device),
            host,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn render(&self) -> &RenderProxy<D> {
        &self.render
    }

    /// Rendering proxy for guest GL calls.
    pub fn render_mut(&mut self) -> &mut RenderProxy<D> {
        &mut self.render
    }

    /// A view over guest memory for the current call.
    pub fn view<'m, M: GuestMemory + ?Sized>(&self, memory: &'m mut M) -> MemoryView<'m, M> {
        MemoryView::new(memory, self.config.max_cstr_len)
    }

    // ---- Host callbacks ----

    /// Deliver the initial geometry and the ready marker.
    pub fn bootstrap(&mut self, geometry: &WindowGeometry) {
        log::debug!("bootstrap {:?}", geometry);
        translate::bootstrap(&mut self.events, geometry);
    }

    pub fn on_resize(&mut self, geometry: &WindowGeometry) {
        translate::resize(&mut self.events, geometry);
    }

    pub fn on_key_down(&mut self, code: &str, text: &str, repeat: bool) {
        translate::key_down(&mut self.events, code, text, repeat);
    }

    pub fn on_key_up(&mut self, code: &str) {
        translate::key_up(&mut self.events, code);
    }

    pub fn on_button_down(&mut self, button: i16) {
        translate::button_down(&mut self.events, button);
    }

    pub fn on_button_up(&mut self, button: i16) {
        translate::button_up(&mut self.events, button);
    }

    pub fn on_pointer_move(&mut self, position: DVec2) {
        translate::pointer_move(&mut self.events, position);
    }

    pub fn on_gamepad_changed(&mut self) {
        translate::gamepad_changed(&mut self.events);
    }

    // ---- Guest log ----

    /// Append guest text to the pending log line.
    pub fn write<M: GuestMemory + ?Sized>(&mut self, memory: &mut M, ptr: u32, len: u32) -> Result<()> {
        let text = self.view(memory).read_str(ptr, len)?;
        self.log.push_str(&text);
        Ok(())
    }

    /// Emit the pending log text as one record and clear it.
    pub fn flush(&mut self) {
        log::info!(target: self.config.guest_log_target.as_str(), "{}", self.log);
        self.log.clear();
    }

    /// Text written since the last flush.
    pub fn pending_log(&self) -> &str {
        &self.log
    }

    // ---- Event queue ----

    pub fn shift(&mut self) -> i32 {
        self.events.pull_int()
    }

    pub fn shift_float(&mut self) -> f32 {
        self.events.pull_float()
    }

    // ---- Cursor ----

    /// Unknown shape codes are ignored.
    pub fn set_cursor(&mut self, code: u32) {
        let Some(shape) = Cursor::from_code(code) else {
            log::warn!("ignoring unknown cursor shape {}", code);
            return;
        };
        if let Some(style) = self.cursor.set_shape(shape) {
            self.host.set_cursor_style(style);
        }
    }

    /// Unknown mode codes are ignored.
    pub fn set_cursor_mode(&mut self, code: u32) {
        let Some(mode) = CursorMode::from_code(code) else {
            log::warn!("ignoring unknown cursor mode {}", code);
            return;
        };
        let style = self.cursor.set_mode(mode);
        self.host.set_cursor_style(style);
    }

    // ---- Gamepads ----

    /// Refresh the gamepad snapshot; returns the number of ports.
    pub fn get_joysticks(&mut self) -> u32 {
        let ports = self.host.gamepads();
        self.gamepads.refresh(ports)
    }

    pub fn get_joystick_id_len(&self, port: u32) -> u32 {
        self.gamepads.id(port).len() as u32
    }

    /// Copy the port's UTF-8 id to `ptr`. The guest sizes the destination
    /// with [`Session::get_joystick_id_len`].
    pub fn get_joystick_id<M: GuestMemory + ?Sized>(&self, memory: &mut M, port: u32, ptr: u32) -> Result<()> {
        self.view(memory).write_bytes(ptr, self.gamepads.id(port))
    }

    /// Write `[axis count, button count]` as two `u32`s at `ptr`.
    /// `false` if the port holds no connected gamepad.
    pub fn open_joystick<M: GuestMemory + ?Sized>(&self, memory: &mut M, port: u32, ptr: u32) -> Result<bool> {
        let Some(counts) = self.gamepads.counts(port) else {
            return Ok(false);
        };
        self.view(memory).write_slice(ptr, &counts[..])?;
        Ok(true)
    }

    /// Write `axes_len` scaled `u16` axes and `buttons_len` 0/1 bytes.
    /// `false` if the port holds no connected gamepad.
    pub fn get_joystick_state<M: GuestMemory + ?Sized>(
        &self,
        memory: &mut M,
        port: u32,
        axes_ptr: u32,
        axes_len: u32,
        buttons_ptr: u32,
        buttons_len: u32,
    ) -> Result<bool> {
        let (Some(axes), Some(buttons)) = (
            self.gamepads.axes(port, axes_len as usize),
            self.gamepads.buttons(port, buttons_len as usize),
        ) else {
            return Ok(false);
        };
        let mut view = self.view(memory);
        view.ensure_slice::<u16>(axes_ptr, axes_len)?;
        view.ensure_slice::<u8>(buttons_ptr, buttons_len)?;
        view.write_slice(axes_ptr, axes.as_slice())?;
        view.write_bytes(buttons_ptr, &buttons)?;
        Ok(true)
    }

    // ---- Dialogs and clipboard ----

    /// Blocks the host until the dialog is dismissed.
    pub fn message_box<M: GuestMemory + ?Sized>(&mut self, memory: &mut M, ptr: u32, len: u32) -> Result<()> {
        let text = self.view(memory).read_str(ptr, len)?;
        self.host.message_box(&text);
        Ok(())
    }

    /// Fire and forget: host-side rejection is never reported back.
    pub fn set_clipboard_text<M: GuestMemory + ?Sized>(&mut self, memory: &mut M, ptr: u32, len: u32) -> Result<()> {
        let text = self.view(memory).read_str(ptr, len)?;
        self.host.write_clipboard(&text);
        Ok(())
    }
}
