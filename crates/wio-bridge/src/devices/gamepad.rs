/// One gamepad as reported by the host at enumeration time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GamepadState {
    pub id: String,
    pub connected: bool,
    /// Raw axis values in [-1, 1].
    pub axes: Vec<f64>,
    /// Pressed state per button.
    pub buttons: Vec<bool>,
}

/// Map a raw axis value from [-1, 1] onto the full `u16` range.
/// Truncates; values outside the range saturate, NaN maps to 0.
pub fn scale_axis(value: f64) -> u16 {
    ((value + 1.0) * 32767.5) as u16
}

/// Point-in-time copy of every gamepad port.
///
/// Only [`GamepadSnapshot::refresh`] changes it; per-port queries always
/// answer from the last refresh.
#[derive(Debug, Default)]
pub struct GamepadSnapshot {
    ports: Vec<Option<GamepadState>>,
    /// UTF-8 encoded ids, empty for vacant ports.
    ids: Vec<Vec<u8>>,
}

impl GamepadSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot. Returns the number of ports, vacant ones included.
    pub fn refresh(&mut self, ports: Vec<Option<GamepadState>>) -> u32 {
        self.ids = ports
            .iter()
            .map(|port| port.as_ref().map(|pad| pad.id.as_bytes().to_vec()).unwrap_or_default())
            .collect();
        self.ports = ports;
        self.ports.len() as u32
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Encoded id of a port; empty for vacant or unknown ports.
    pub fn id(&self, port: u32) -> &[u8] {
        self.ids.get(port as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The gamepad at `port`, if present and connected.
    pub fn connected(&self, port: u32) -> Option<&GamepadState> {
        if port as usize >= self.ports.len() {
            log::debug!("gamepad port {} out of range ({} ports)", port, self.ports.len());
        }
        self.ports
            .get(port as usize)
            .and_then(Option::as_ref)
            .filter(|pad| pad.connected)
    }

    /// `[axis count, button count]` of a connected gamepad.
    pub fn counts(&self, port: u32) -> Option<[u32; 2]> {
        self.connected(port)
            .map(|pad| [pad.axes.len() as u32, pad.buttons.len() as u32])
    }

    /// Exactly `len` scaled axis values; axes the pad lacks read as 0.
    pub fn axes(&self, port: u32, len: usize) -> Option<Vec<u16>> {
        self.connected(port).map(|pad| {
            (0..len)
                .map(|i| pad.axes.get(i).map_or(0, |&v| scale_axis(v)))
                .collect()
        })
    }

    /// Exactly `len` button states as 0/1; buttons the pad lacks read as 0.
    pub fn buttons(&self, port: u32, len: usize) -> Option<Vec<u8>> {
        self.connected(port).map(|pad| {
            (0..len)
                .map(|i| pad.buttons.get(i).copied().unwrap_or(false) as u8)
                .collect()
        })
    }
}
