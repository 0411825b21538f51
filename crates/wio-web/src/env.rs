//! The guest's `env` import namespace.

use js_sys::{Object, Reflect};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;

use crate::with_session;

/// Build the `env` object. Each import borrows the live session for the
/// duration of the call.
pub fn build() -> Result<Object, JsValue> {
    let env = Object::new();

    // ---- Log, events, cursor ----

    export(&env, "write", Closure::<dyn Fn(u32, u32)>::new(|ptr: u32, len: u32| {
        with_session(|session, memory| session.write(memory, ptr, len))
    }))?;
    export(&env, "flush", Closure::<dyn Fn()>::new(|| {
        with_session(|session, _| {
            session.flush();
            Ok(())
        })
    }))?;
    export(&env, "shift", Closure::<dyn Fn() -> i32>::new(|| {
        with_session(|session, _| Ok(session.shift()))
    }))?;
    export(&env, "shiftFloat", Closure::<dyn Fn() -> f32>::new(|| {
        with_session(|session, _| Ok(session.shift_float()))
    }))?;
    export(&env, "setCursor", Closure::<dyn Fn(u32)>::new(|code: u32| {
        with_session(|session, _| {
            session.set_cursor(code);
            Ok(())
        })
    }))?;
    export(&env, "setCursorMode", Closure::<dyn Fn(u32)>::new(|code: u32| {
        with_session(|session, _| {
            session.set_cursor_mode(code);
            Ok(())
        })
    }))?;

    // ---- Gamepads ----

    export(&env, "getJoysticks", Closure::<dyn Fn() -> u32>::new(|| {
        with_session(|session, _| Ok(session.get_joysticks()))
    }))?;
    export(&env, "getJoystickIdLen", Closure::<dyn Fn(u32) -> u32>::new(|port: u32| {
        with_session(|session, _| Ok(session.get_joystick_id_len(port)))
    }))?;
    export(&env, "getJoystickId", Closure::<dyn Fn(u32, u32)>::new(|port: u32, ptr: u32| {
        with_session(|session, memory| session.get_joystick_id(memory, port, ptr))
    }))?;
    export(&env, "openJoystick", Closure::<dyn Fn(u32, u32) -> bool>::new(|port: u32, ptr: u32| {
        with_session(|session, memory| session.open_joystick(memory, port, ptr))
    }))?;
    export(
        &env,
        "getJoystickState",
        Closure::<dyn Fn(u32, u32, u32, u32, u32) -> bool>::new(
            |port: u32, axes_ptr: u32, axes_len: u32, buttons_ptr: u32, buttons_len: u32| {
                with_session(|session, memory| {
                    session.get_joystick_state(memory, port, axes_ptr, axes_len, buttons_ptr, buttons_len)
                })
            },
        ),
    )?;

    // ---- Dialogs ----

    export(&env, "messageBox", Closure::<dyn Fn(u32, u32)>::new(|ptr: u32, len: u32| {
        with_session(|session, memory| session.message_box(memory, ptr, len))
    }))?;
    export(&env, "setClipboardText", Closure::<dyn Fn(u32, u32)>::new(|ptr: u32, len: u32| {
        with_session(|session, memory| session.set_clipboard_text(memory, ptr, len))
    }))?;

    // ---- GL ----

    export(&env, "glAttachShader", Closure::<dyn Fn(u32, u32)>::new(|program: u32, shader: u32| {
        with_session(|session, _| session.render_mut().attach_shader(program, shader))
    }))?;
    export(&env, "glBindBuffer", Closure::<dyn Fn(u32, u32)>::new(|target: u32, buffer: u32| {
        with_session(|session, _| session.render_mut().bind_buffer(target, buffer))
    }))?;
    export(&env, "glBufferData", Closure::<dyn Fn(u32, u32, u32, u32)>::new(|target: u32, size: u32, ptr: u32, usage: u32| {
        with_session(|session, memory| {
            let view = session.view(memory);
            session.render_mut().buffer_data(&view, target, size, ptr, usage)
        })
    }))?;
    export(&env, "glClear", Closure::<dyn Fn(u32)>::new(|mask: u32| {
        with_session(|session, _| {
            session.render_mut().clear(mask);
            Ok(())
        })
    }))?;
    export(&env, "glClearColor", Closure::<dyn Fn(f32, f32, f32, f32)>::new(|red: f32, green: f32, blue: f32, alpha: f32| {
        with_session(|session, _| {
            session.render_mut().clear_color(red, green, blue, alpha);
            Ok(())
        })
    }))?;
    export(&env, "glCompileShader", Closure::<dyn Fn(u32)>::new(|shader: u32| {
        with_session(|session, _| session.render_mut().compile_shader(shader))
    }))?;
    export(&env, "glCreateProgram", Closure::<dyn Fn() -> u32>::new(|| {
        with_session(|session, _| Ok(session.render_mut().create_program()))
    }))?;
    export(&env, "glCreateShader", Closure::<dyn Fn(u32) -> u32>::new(|kind: u32| {
        with_session(|session, _| Ok(session.render_mut().create_shader(kind)))
    }))?;
    export(&env, "glDrawArrays", Closure::<dyn Fn(u32, i32, i32)>::new(|mode: u32, first: i32, count: i32| {
        with_session(|session, _| {
            session.render_mut().draw_arrays(mode, first, count);
            Ok(())
        })
    }))?;
    export(&env, "glEnableVertexAttribArray", Closure::<dyn Fn(u32)>::new(|index: u32| {
        with_session(|session, _| {
            session.render_mut().enable_vertex_attrib_array(index);
            Ok(())
        })
    }))?;
    export(&env, "glGenBuffers", Closure::<dyn Fn(u32, u32)>::new(|n: u32, ptr: u32| {
        with_session(|session, memory| {
            let mut view = session.view(memory);
            session.render_mut().gen_buffers(&mut view, n, ptr)
        })
    }))?;
    export(&env, "glGetAttribLocation", Closure::<dyn Fn(u32, u32) -> i32>::new(|program: u32, name_ptr: u32| {
        with_session(|session, memory| {
            let view = session.view(memory);
            session.render_mut().get_attrib_location(&view, program, name_ptr)
        })
    }))?;
    export(&env, "glLinkProgram", Closure::<dyn Fn(u32)>::new(|program: u32| {
        with_session(|session, _| session.render_mut().link_program(program))
    }))?;
    export(
        &env,
        "glShaderSource",
        Closure::<dyn Fn(u32, u32, u32, u32)>::new(|shader: u32, count: u32, strings_ptr: u32, lengths_ptr: u32| {
            with_session(|session, memory| {
                let view = session.view(memory);
                session
                    .render_mut()
                    .shader_source(&view, shader, count, strings_ptr, lengths_ptr)
            })
        }),
    )?;
    export(&env, "glUseProgram", Closure::<dyn Fn(u32)>::new(|program: u32| {
        with_session(|session, _| session.render_mut().use_program(program))
    }))?;
    export(
        &env,
        "glVertexAttribPointer",
        Closure::<dyn Fn(u32, i32, u32, u32, i32, i32)>::new(|index: u32, size: i32, kind: u32, normalized: u32, stride: i32, offset: i32| {
            with_session(|session, _| {
                session
                    .render_mut()
                    .vertex_attrib_pointer(index, size, kind, normalized != 0, stride, offset);
                Ok(())
            })
        }),
    )?;
    export(&env, "glViewport", Closure::<dyn Fn(i32, i32, i32, i32)>::new(|x: i32, y: i32, width: i32, height: i32| {
        with_session(|session, _| {
            session.render_mut().viewport(x, y, width, height);
            Ok(())
        })
    }))?;

    Ok(env)
}

/// Attach `closure` to `env` under `name` for the life of the page.
fn export<T: ?Sized + WasmClosure>(env: &Object, name: &str, closure: Closure<T>) -> Result<(), JsValue> {
    Reflect::set(env, &JsValue::from_str(name), closure.as_ref())?;
    closure.forget();
    Ok(())
}
