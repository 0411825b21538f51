//! Physical key and pointer button codes.
//!
//! Codes are part of the wire protocol and must never be renumbered.

/// `KeyboardEvent.code` → guest key code.
pub const KEYS: [(&str, u32); 126] = [
    ("KeyA", 5),
    ("KeyB", 6),
    ("KeyC", 7),
    ("KeyD", 8),
    ("KeyE", 9),
    ("KeyF", 10),
    ("KeyG", 11),
    ("KeyH", 12),
    ("KeyI", 13),
    ("KeyJ", 14),
    ("KeyK", 15),
    ("KeyL", 16),
    ("KeyM", 17),
    ("KeyN", 18),
    ("KeyO", 19),
    ("KeyP", 20),
    ("KeyQ", 21),
    ("KeyR", 22),
    ("KeyS", 23),
    ("KeyT", 24),
    ("KeyU", 25),
    ("KeyV", 26),
    ("KeyW", 27),
    ("KeyX", 28),
    ("KeyY", 29),
    ("KeyZ", 30),
    ("Digit1", 31),
    ("Digit2", 32),
    ("Digit3", 33),
    ("Digit4", 34),
    ("Digit5", 35),
    ("Digit6", 36),
    ("Digit7", 37),
    ("Digit8", 38),
    ("Digit9", 39),
    ("Digit0", 40),
    ("Enter", 41),
    ("Escape", 42),
    ("Backspace", 43),
    ("Tab", 44),
    ("Space", 45),
    ("Minus", 46),
    ("Equal", 47),
    ("BracketLeft", 48),
    ("BracketRight", 49),
    ("Backslash", 50),
    ("Semicolon", 51),
    ("Quote", 52),
    ("Backquote", 53),
    ("Comma", 54),
    ("Period", 55),
    ("Slash", 56),
    ("CapsLock", 57),
    ("F1", 58),
    ("F2", 59),
    ("F3", 60),
    ("F4", 61),
    ("F5", 62),
    ("F6", 63),
    ("F7", 64),
    ("F8", 65),
    ("F9", 66),
    ("F10", 67),
    ("F11", 68),
    ("F12", 69),
    ("PrintScreen", 70),
    ("ScrollLock", 71),
    ("Pause", 72),
    ("Insert", 73),
    ("Home", 74),
    ("PageUp", 75),
    ("Delete", 76),
    ("End", 77),
    ("PageDown", 78),
    ("ArrowRight", 79),
    ("ArrowLeft", 80),
    ("ArrowDown", 81),
    ("ArrowUp", 82),
    ("NumLock", 83),
    ("NumpadDivide", 84),
    ("NumpadMultiply", 85),
    ("NumpadSubtract", 86),
    ("NumpadAdd", 87),
    ("NumpadEnter", 88),
    ("Numpad1", 89),
    ("Numpad2", 90),
    ("Numpad3", 91),
    ("Numpad4", 92),
    ("Numpad5", 93),
    ("Numpad6", 94),
    ("Numpad7", 95),
    ("Numpad8", 96),
    ("Numpad9", 97),
    ("Numpad0", 98),
    ("NumpadDecimal", 99),
    ("IntlBackslash", 100),
    ("ContextMenu", 101),
    ("NumpadEqual", 102),
    ("F13", 103),
    ("F14", 104),
    ("F15", 105),
    ("F16", 106),
    ("F17", 107),
    ("F18", 108),
    ("F19", 109),
    ("F20", 110),
    ("F21", 111),
    ("F22", 112),
    ("F23", 113),
    ("F24", 114),
    ("NumpadComma", 115),
    ("IntlRo", 116),
    ("KanaMode", 117),
    ("IntlYen", 118),
    ("Convert", 119),
    ("NonConvert", 120),
    ("Lang1", 121),
    ("Lang2", 122),
    ("ControlLeft", 123),
    ("ShiftLeft", 124),
    ("AltLeft", 125),
    ("MetaLeft", 126),
    ("ControlRight", 127),
    ("ShiftRight", 128),
    ("AltRight", 129),
    ("MetaRight", 130),
];

/// Host button ordinal (`MouseEvent.button`) → guest button.
/// The host orders left, middle, right; the guest orders left, right, middle.
pub const BUTTONS: [u32; 5] = [0, 2, 1, 3, 4];

/// Look up the guest code for a physical key identifier.
pub fn key_code(code: &str) -> Option<u32> {
    KEYS.iter().find(|(name, _)| *name == code).map(|&(_, key)| key)
}

/// Look up the guest button for a host button ordinal.
pub fn button_code(button: i16) -> Option<u32> {
    usize::try_from(button)
        .ok()
        .and_then(|i| BUTTONS.get(i))
        .copied()
}
