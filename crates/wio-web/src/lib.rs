//! Browser host for wio guests.
//!
//! `imports()` builds the object the guest module is instantiated with, and
//! `run()` wires the instantiated guest to a canvas:
//!
//! ```ignore
//! const { instance } = await WebAssembly.instantiate(bytes, wio.imports());
//! wio.run(instance, canvas, JSON.stringify({ log_level: "debug" }));
//! ```

pub mod env;
pub mod events;
pub mod gl;
pub mod host;
pub mod memory;
pub mod runner;

use std::cell::RefCell;

use js_sys::{Object, Reflect, WebAssembly};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext};
use wio_bridge::{BridgeConfig, Session};

use crate::gl::WebGlDevice;
use crate::host::WebHost;
use crate::memory::WasmMemory;
use crate::runner::{FrameLoop, WasmGuest};

pub type WebSession = Session<WebHost, WebGlDevice>;

struct Live {
    session: WebSession,
    memory: WebAssembly::Memory,
}

thread_local! {
    static LIVE: RefCell<Option<Live>> = RefCell::new(None);
}

/// Run a guest import against the live session.
///
/// A bridge error is thrown into the guest once the session borrow has been
/// released; a JS throw unwinds past Rust frames without dropping them.
fn with_session<R>(
    f: impl FnOnce(&mut WebSession, &mut WasmMemory) -> wio_bridge::Result<R>,
) -> R {
    let result = LIVE.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(live) => {
                let mut memory = WasmMemory::current(&live.memory);
                f(&mut live.session, &mut memory).map_err(|err| err.to_string())
            }
            None => Err("guest called an import before run()".to_string()),
        }
    });
    match result {
        Ok(value) => value,
        Err(message) => {
            log::error!("{}", message);
            wasm_bindgen::throw_str(&message)
        }
    }
}

/// Deliver a host event to the live session, if there is one.
fn deliver(f: impl FnOnce(&mut WebSession)) {
    LIVE.with(|cell| {
        if let Some(live) = cell.borrow_mut().as_mut() {
            f(&mut live.session);
        }
    });
}

/// The import object to instantiate a guest module with.
#[wasm_bindgen]
pub fn imports() -> Result<Object, JsValue> {
    let imports = Object::new();
    let env = env::build()?;
    Reflect::set(&imports, &JsValue::from_str("env"), &env)?;
    Ok(imports)
}

/// Start an instantiated guest on `canvas`.
///
/// `config` is an optional JSON [`BridgeConfig`].
#[wasm_bindgen]
pub fn run(
    instance: WebAssembly::Instance,
    canvas: HtmlCanvasElement,
    config: Option<String>,
) -> Result<(), JsValue> {
    let config = match config {
        Some(json) => BridgeConfig::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => BridgeConfig::default(),
    };
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(config.level());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let gl = canvas
        .get_context("webgl")?
        .ok_or_else(|| JsValue::from_str("webgl is unavailable"))?
        .dyn_into::<WebGlRenderingContext>()?;
    let memory = Reflect::get(&instance.exports(), &JsValue::from_str("memory"))?
        .dyn_into::<WebAssembly::Memory>()?;
    let guest = WasmGuest::from_instance(&instance)?;

    let session = Session::new(config, WebHost::new(window.clone(), canvas.clone()), WebGlDevice::new(gl));
    LIVE.with(|cell| *cell.borrow_mut() = Some(Live { session, memory }));

    FrameLoop::start(guest, window.clone());

    host::scale_canvas(&window, &canvas)?;
    let geometry = host::geometry(&window, &canvas);
    deliver(|session| session.bootstrap(&geometry));

    events::attach(&window, &canvas)?;
    log::info!("guest running on {}x{} canvas", geometry.physical.x, geometry.physical.y);
    Ok(())
}
