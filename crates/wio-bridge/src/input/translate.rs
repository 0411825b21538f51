//! Host device callbacks → queued events.
//!
//! Each function is a pure translation of one host notification into zero or
//! more complete events appended to the queue.

use glam::DVec2;

use crate::api::types::WindowGeometry;
use crate::bridge::protocol::Event;
use crate::input::keys::{button_code, key_code};
use crate::input::queue::EventQueue;

/// Initial geometry followed by the ready marker.
pub fn bootstrap(queue: &mut EventQueue, geometry: &WindowGeometry) {
    resize(queue, geometry);
    queue.push(Event::Ready);
}

/// Logical size, physical size, then scale. Emitted on every layout change,
/// redundant or not.
pub fn resize(queue: &mut EventQueue, geometry: &WindowGeometry) {
    queue.push(Event::LogicalResize(geometry.logical));
    queue.push(Event::PhysicalResize(geometry.physical));
    queue.push(Event::ScaleChanged(geometry.scale));
}

/// `code` is the physical key identifier, `text` what the key typed.
///
/// The key event and the text event are independent: an unmapped key can
/// still type a character, and a mapped key may type nothing.
pub fn key_down(queue: &mut EventQueue, code: &str, text: &str, repeat: bool) {
    if let Some(key) = key_code(code) {
        queue.push(if repeat { Event::Repeat(key) } else { Event::Down(key) });
    }
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        queue.push(Event::Char(c as u32));
    }
}

pub fn key_up(queue: &mut EventQueue, code: &str) {
    if let Some(key) = key_code(code) {
        queue.push(Event::Up(key));
    }
}

pub fn button_down(queue: &mut EventQueue, button: i16) {
    if let Some(button) = button_code(button) {
        queue.push(Event::Down(button));
    }
}

pub fn button_up(queue: &mut EventQueue, button: i16) {
    if let Some(button) = button_code(button) {
        queue.push(Event::Up(button));
    }
}

/// Pointer position relative to the canvas.
pub fn pointer_move(queue: &mut EventQueue, position: DVec2) {
    queue.push(Event::PointerMove(position));
}

/// Any gamepad connect or disconnect.
pub fn gamepad_changed(queue: &mut EventQueue) {
    queue.push(Event::GamepadChanged);
}
