use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect, WebAssembly};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;
use wio_bridge::{FrameDriver, FrameScheduler, FrameState, Guest};

/// The guest's exported entry points.
pub struct WasmGuest {
    start: Function,
    frame: Function,
}

impl WasmGuest {
    pub fn from_instance(instance: &WebAssembly::Instance) -> Result<Self, JsValue> {
        let exports = instance.exports();
        let export = |name: &str| -> Result<Function, JsValue> {
            Reflect::get(&exports, &JsValue::from_str(name))?
                .dyn_into::<Function>()
                .map_err(|_| JsValue::from_str(&format!("guest does not export {}", name)))
        };
        Ok(Self {
            start: export("_start")?,
            frame: export("wioLoop")?,
        })
    }
}

impl Guest for WasmGuest {
    fn start(&mut self) {
        if let Err(err) = self.start.call0(&JsValue::UNDEFINED) {
            log::error!("guest start failed: {:?}", err);
        }
    }

    fn frame(&mut self) -> bool {
        match self.frame.call0(&JsValue::UNDEFINED) {
            Ok(keep_going) => keep_going.as_f64().map_or(false, |value| value != 0.0),
            Err(err) => {
                log::error!("guest frame failed: {:?}", err);
                false
            }
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules frames with `requestAnimationFrame`.
pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            if let Err(err) = self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }
}

/// Frame loop state shared with the animation frame callback.
pub struct FrameLoop {
    driver: Option<FrameDriver>,
    guest: WasmGuest,
    frames: AnimationFrames,
}

impl FrameLoop {
    /// Call the guest's start entry point and schedule its first frame.
    ///
    /// The loop keeps itself alive through its own callback for as long as
    /// the page lives.
    pub fn start(guest: WasmGuest, window: Window) -> Rc<RefCell<FrameLoop>> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let state = Rc::new(RefCell::new(FrameLoop {
            driver: None,
            guest,
            frames: AnimationFrames {
                window,
                callback: callback.clone(),
            },
        }));

        let frame_state = state.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            let mut guard = frame_state.borrow_mut();
            let FrameLoop { driver, guest, frames } = &mut *guard;
            if let Some(driver) = driver {
                if driver.on_frame(guest, frames) == FrameState::Stopped {
                    log::debug!("frame loop finished");
                }
            }
        }));

        {
            let mut guard = state.borrow_mut();
            let FrameLoop { driver, guest, frames } = &mut *guard;
            *driver = Some(FrameDriver::start(guest, frames));
        }
        state
    }
}
