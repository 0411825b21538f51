//! Event wire protocol.
//! Must stay in sync with every guest's event decoder.
//!
//! The queue the guest drains is a flat stream of numeric scalars:
//! ```text
//! [tag][operand 0]..[operand n-1][tag][operand 0]..
//! ```
//! The number and type of operands is fixed per tag. [`operands`] is the only
//! place that table lives; encoding and decoding both go through it.

use glam::{DVec2, UVec2};

pub const TAG_READY: u32 = 1;
pub const TAG_LOGICAL_RESIZE: u32 = 5;
pub const TAG_PHYSICAL_RESIZE: u32 = 7;
pub const TAG_SCALE_CHANGED: u32 = 8;
pub const TAG_CHAR: u32 = 9;
pub const TAG_DOWN: u32 = 10;
pub const TAG_REPEAT: u32 = 11;
pub const TAG_UP: u32 = 12;
pub const TAG_POINTER_MOVE: u32 = 13;
pub const TAG_GAMEPAD_CHANGED: u32 = 16;

/// How the guest is expected to pull an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Pulled with the integer view.
    Int,
    /// Pulled with the float view.
    Float,
}

use Operand::{Float, Int};

/// Operand layout for a tag, or `None` for tags outside the protocol.
pub fn operands(tag: u32) -> Option<&'static [Operand]> {
    let layout: &'static [Operand] = match tag {
        TAG_READY => &[],
        TAG_LOGICAL_RESIZE => &[Int, Int],
        TAG_PHYSICAL_RESIZE => &[Int, Int],
        TAG_SCALE_CHANGED => &[Float],
        TAG_CHAR => &[Int],
        TAG_DOWN => &[Int],
        TAG_REPEAT => &[Int],
        TAG_UP => &[Int],
        TAG_POINTER_MOVE => &[Int, Int],
        TAG_GAMEPAD_CHANGED => &[],
        _ => return None,
    };
    Some(layout)
}

/// Number of scalars that follow `tag`.
pub fn arity(tag: u32) -> Option<usize> {
    operands(tag).map(<[Operand]>::len)
}

/// An event the host delivers to the guest.
///
/// Keyboard keys and pointer buttons share the down/up tags; the code ranges
/// keep them apart (buttons 0..=4, keys 5..=130).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Initial geometry has been delivered.
    Ready,
    /// Canvas size in CSS pixels.
    LogicalResize(UVec2),
    /// Canvas backing store size in device pixels.
    PhysicalResize(UVec2),
    /// Device pixel ratio.
    ScaleChanged(f64),
    /// A single code point of text input.
    Char(u32),
    /// A key or pointer button was pressed.
    Down(u32),
    /// A held key auto-repeated.
    Repeat(u32),
    /// A key or pointer button was released.
    Up(u32),
    /// Pointer position, element-local.
    PointerMove(DVec2),
    /// A gamepad was connected or disconnected; re-enumerate.
    GamepadChanged,
}

impl Event {
    pub fn tag(&self) -> u32 {
        match self {
            Event::Ready => TAG_READY,
            Event::LogicalResize(_) => TAG_LOGICAL_RESIZE,
            Event::PhysicalResize(_) => TAG_PHYSICAL_RESIZE,
            Event::ScaleChanged(_) => TAG_SCALE_CHANGED,
            Event::Char(_) => TAG_CHAR,
            Event::Down(_) => TAG_DOWN,
            Event::Repeat(_) => TAG_REPEAT,
            Event::Up(_) => TAG_UP,
            Event::PointerMove(_) => TAG_POINTER_MOVE,
            Event::GamepadChanged => TAG_GAMEPAD_CHANGED,
        }
    }

    /// Append the tag followed by every operand.
    pub fn encode(&self, out: &mut impl Extend<f64>) {
        let mut operands = [0.0; 2];
        let used = match *self {
            Event::Ready | Event::GamepadChanged => 0,
            Event::LogicalResize(size) | Event::PhysicalResize(size) => {
                operands = [size.x as f64, size.y as f64];
                2
            }
            Event::ScaleChanged(ratio) => {
                operands[0] = ratio;
                1
            }
            Event::Char(code) | Event::Down(code) | Event::Repeat(code) | Event::Up(code) => {
                operands[0] = code as f64;
                1
            }
            Event::PointerMove(pos) => {
                operands = [pos.x, pos.y];
                2
            }
        };
        debug_assert_eq!(arity(self.tag()), Some(used));
        out.extend(std::iter::once(self.tag() as f64).chain(operands[..used].iter().copied()));
    }

    /// Decode one event from a scalar stream, the way a guest would.
    ///
    /// Returns `None` when the stream is empty, truncated, or starts with an
    /// unknown tag.
    pub fn decode(scalars: &mut impl Iterator<Item = f64>) -> Option<Event> {
        let tag = scalars.next()? as u32;
        let layout = operands(tag)?;
        let mut values = [0.0; 2];
        for value in values.iter_mut().take(layout.len()) {
            *value = scalars.next()?;
        }
        let [a, b] = values;
        Some(match tag {
            TAG_READY => Event::Ready,
            TAG_LOGICAL_RESIZE => Event::LogicalResize(UVec2::new(a as u32, b as u32)),
            TAG_PHYSICAL_RESIZE => Event::PhysicalResize(UVec2::new(a as u32, b as u32)),
            TAG_SCALE_CHANGED => Event::ScaleChanged(a),
            TAG_CHAR => Event::Char(a as u32),
            TAG_DOWN => Event::Down(a as u32),
            TAG_REPEAT => Event::Repeat(a as u32),
            TAG_UP => Event::Up(a as u32),
            TAG_POINTER_MOVE => Event::PointerMove(DVec2::new(a, b)),
            TAG_GAMEPAD_CHANGED => Event::GamepadChanged,
            _ => return None,
        })
    }
}
