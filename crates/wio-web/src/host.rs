use glam::UVec2;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Gamepad, GamepadButton, HtmlCanvasElement, Window};
use wio_bridge::{GamepadState, HostDevices, WindowGeometry};

/// Browser-side devices: canvas cursor, navigator gamepads, alert and clipboard.
pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    on_clipboard_error: Closure<dyn FnMut(JsValue)>,
}

impl WebHost {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        let on_clipboard_error = Closure::new(|err: JsValue| {
            log::warn!("clipboard write rejected: {:?}", err);
        });
        Self {
            window,
            canvas,
            on_clipboard_error,
        }
    }
}

impl HostDevices for WebHost {
    fn set_cursor_style(&mut self, style: &str) {
        if let Err(err) = self.canvas.style().set_property("cursor", style) {
            log::warn!("failed to set cursor {}: {:?}", style, err);
        }
    }

    fn gamepads(&mut self) -> Vec<Option<GamepadState>> {
        let pads = match self.window.navigator().get_gamepads() {
            Ok(pads) => pads,
            Err(err) => {
                log::warn!("getGamepads failed: {:?}", err);
                return Vec::new();
            }
        };
        pads.iter()
            .map(|pad| pad.dyn_into::<Gamepad>().ok().map(|pad| gamepad_state(&pad)))
            .collect()
    }

    fn message_box(&mut self, text: &str) {
        if let Err(err) = self.window.alert_with_message(text) {
            log::warn!("alert failed: {:?}", err);
        }
    }

    fn write_clipboard(&mut self, text: &str) {
        let navigator = self.window.navigator();
        let written = Reflect::get(&navigator, &JsValue::from_str("clipboard")).and_then(|clipboard| {
            let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
            write.call1(&clipboard, &JsValue::from_str(text))
        });
        match written {
            Ok(promise) => {
                if let Ok(promise) = promise.dyn_into::<Promise>() {
                    let _ = promise.catch(&self.on_clipboard_error);
                }
            }
            Err(err) => log::warn!("clipboard unavailable: {:?}", err),
        }
    }
}

fn gamepad_state(pad: &Gamepad) -> GamepadState {
    GamepadState {
        id: pad.id(),
        connected: pad.connected(),
        axes: pad.axes().iter().map(|axis| axis.as_f64().unwrap_or(0.0)).collect(),
        buttons: pad
            .buttons()
            .iter()
            .map(|button| {
                button
                    .dyn_into::<GamepadButton>()
                    .map(|button| button.pressed())
                    .unwrap_or(false)
            })
            .collect(),
    }
}

/// Pin the canvas' CSS size to its attribute size, then scale the backing
/// store by the device pixel ratio.
pub fn scale_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    style.set_property("width", &format!("{}px", canvas.width()))?;
    style.set_property("height", &format!("{}px", canvas.height()))?;
    let ratio = window.device_pixel_ratio();
    canvas.set_width((canvas.width() as f64 * ratio) as u32);
    canvas.set_height((canvas.height() as f64 * ratio) as u32);
    Ok(())
}

/// Current canvas geometry: CSS size, backing-store size and pixel ratio.
pub fn geometry(window: &Window, canvas: &HtmlCanvasElement) -> WindowGeometry {
    let style = canvas.style();
    let logical = UVec2::new(
        parse_px(&style.get_property_value("width").unwrap_or_default()),
        parse_px(&style.get_property_value("height").unwrap_or_default()),
    );
    WindowGeometry {
        logical,
        physical: UVec2::new(canvas.width(), canvas.height()),
        scale: window.device_pixel_ratio(),
    }
}

/// Leading decimal digits of a CSS length, `0` when there are none.
pub fn parse_px(value: &str) -> u32 {
    value
        .trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, digit| acc.saturating_mul(10).saturating_add(u32::from(digit - b'0')))
}
