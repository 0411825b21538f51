use glam::DVec2;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, ResizeObserver, Window};

use crate::{deliver, host, WebSession};

/// Register the DOM listeners that feed the event queue.
pub fn attach(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let resize_window = window.clone();
    let resize_canvas = canvas.clone();
    let on_resize = Closure::<dyn FnMut(Array)>::new(move |_entries: Array| {
        let geometry = host::geometry(&resize_window, &resize_canvas);
        deliver(|session| session.on_resize(&geometry));
    });
    ResizeObserver::new(on_resize.as_ref().unchecked_ref())?.observe(canvas);
    on_resize.forget();

    listen(canvas, "contextmenu", |event: Event| event.prevent_default())?;
    listen(canvas, "keydown", |event: KeyboardEvent| {
        event.prevent_default();
        let (code, key, repeat) = (event.code(), event.key(), event.repeat());
        deliver(|session| session.on_key_down(&code, &key, repeat));
    })?;
    listen(canvas, "keyup", |event: KeyboardEvent| {
        let code = event.code();
        deliver(|session| session.on_key_up(&code));
    })?;
    listen(canvas, "mousedown", |event: MouseEvent| {
        deliver(|session| session.on_button_down(event.button()));
    })?;
    listen(canvas, "mouseup", |event: MouseEvent| {
        deliver(|session| session.on_button_up(event.button()));
    })?;
    listen(canvas, "mousemove", |event: MouseEvent| {
        let position = DVec2::new(f64::from(event.offset_x()), f64::from(event.offset_y()));
        deliver(|session| session.on_pointer_move(position));
    })?;

    listen(window, "gamepadconnected", |_: Event| deliver(WebSession::on_gamepad_changed))?;
    listen(window, "gamepaddisconnected", |_: Event| deliver(WebSession::on_gamepad_changed))?;
    Ok(())
}

/// Add a listener for the life of the page.
fn listen<E, F>(target: &EventTarget, name: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| match event.dyn_into::<E>() {
        Ok(event) => handler(event),
        Err(_) => log::warn!("unexpected event type"),
    });
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
