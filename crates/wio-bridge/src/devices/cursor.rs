/// Canonical cursor shapes, numbered as the guest sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Cursor {
    #[default]
    Default = 0,
    Progress = 1,
    Wait = 2,
    Text = 3,
    Pointer = 4,
    Crosshair = 5,
    NotAllowed = 6,
    Move = 7,
    ResizeVertical = 8,
    ResizeHorizontal = 9,
    ResizeDiagonal1 = 10,
    ResizeDiagonal2 = 11,
}

impl Cursor {
    pub const ALL: [Cursor; 12] = [
        Cursor::Default,
        Cursor::Progress,
        Cursor::Wait,
        Cursor::Text,
        Cursor::Pointer,
        Cursor::Crosshair,
        Cursor::NotAllowed,
        Cursor::Move,
        Cursor::ResizeVertical,
        Cursor::ResizeHorizontal,
        Cursor::ResizeDiagonal1,
        Cursor::ResizeDiagonal2,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// CSS `cursor` value.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Progress => "progress",
            Cursor::Wait => "wait",
            Cursor::Text => "text",
            Cursor::Pointer => "pointer",
            Cursor::Crosshair => "crosshair",
            Cursor::NotAllowed => "not-allowed",
            Cursor::Move => "move",
            Cursor::ResizeVertical => "ns-resize",
            Cursor::ResizeHorizontal => "ew-resize",
            Cursor::ResizeDiagonal1 => "nesw-resize",
            Cursor::ResizeDiagonal2 => "nwse-resize",
        }
    }
}

/// Cursor visibility as set by the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Visible = 0,
    Hidden = 1,
}

impl CursorMode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CursorMode::Visible),
            1 => Some(CursorMode::Hidden),
            _ => None,
        }
    }
}

/// CSS value that hides the cursor.
pub const HIDDEN_STYLE: &str = "none";

/// Last shape the guest asked for, plus whether it is currently hidden.
/// Hiding never forgets the shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorState {
    shape: Cursor,
    hidden: bool,
}

impl CursorState {
    pub fn shape(&self) -> Cursor {
        self.shape
    }

    pub fn mode(&self) -> CursorMode {
        if self.hidden {
            CursorMode::Hidden
        } else {
            CursorMode::Visible
        }
    }

    /// CSS value the cursor should currently show.
    pub fn style(&self) -> &'static str {
        if self.hidden {
            HIDDEN_STYLE
        } else {
            self.shape.css_name()
        }
    }

    /// Record a new shape. Returns the style to apply, or `None` while hidden.
    pub fn set_shape(&mut self, shape: Cursor) -> Option<&'static str> {
        self.shape = shape;
        (!self.hidden).then(|| shape.css_name())
    }

    /// Switch visibility. Returns the style to apply.
    pub fn set_mode(&mut self, mode: CursorMode) -> &'static str {
        self.hidden = mode == CursorMode::Hidden;
        self.style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for (code, cursor) in Cursor::ALL.iter().enumerate() {
            assert_eq!(*cursor as u32, code as u32);
            assert_eq!(Cursor::from_code(code as u32), Some(*cursor));
        }
        assert_eq!(Cursor::from_code(12), None);
        assert_eq!(Cursor::from_code(11).map(Cursor::css_name), Some("nwse-resize"));
    }

    #[test]
    fn hiding_preserves_shape() {
        let mut state = CursorState::default();
        assert_eq!(state.set_shape(Cursor::Crosshair), Some("crosshair"));
        assert_eq!(state.set_mode(CursorMode::Hidden), "none");
        assert_eq!(state.set_mode(CursorMode::Hidden), "none");
        assert_eq!(state.mode(), CursorMode::Hidden);
        assert_eq!(state.shape(), Cursor::Crosshair);
        assert_eq!(state.set_mode(CursorMode::Visible), "crosshair");
        assert_eq!(state.mode(), CursorMode::Visible);
    }

    #[test]
    fn shape_set_while_hidden_applies_on_show() {
        let mut state = CursorState::default();
        state.set_mode(CursorMode::Hidden);
        assert_eq!(state.set_shape(Cursor::Text), None);
        assert_eq!(state.style(), "none");
        assert_eq!(state.set_mode(CursorMode::Visible), "text");
    }

    #[test]
    fn mode_codes() {
        assert_eq!(CursorMode::from_code(0), Some(CursorMode::Visible));
        assert_eq!(CursorMode::from_code(1), Some(CursorMode::Hidden));
        assert_eq!(CursorMode::from_code(2), None);
    }
}
