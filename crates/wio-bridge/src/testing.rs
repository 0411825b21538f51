//! In-memory fakes shared by unit tests.

use crate::api::host::HostDevices;
use crate::devices::gamepad::GamepadState;
use crate::renderer::traits::RenderDevice;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShaderSource { shader: u32, source: String },
    CompileShader(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(u32),
    GetAttribLocation { program: u32, name: String },
    BindBuffer { target: u32, buffer: u32 },
    BufferData { target: u32, data: Vec<u8>, usage: u32 },
    Clear(u32),
    ClearColor([f32; 4]),
    DrawArrays { mode: u32, first: i32, count: i32 },
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, size: i32, kind: u32, normalized: bool, stride: i32, offset: i32 },
    Viewport([i32; 4]),
}

/// Device whose objects are serial numbers and which records every call.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<Call>,
    pub fail_creates: bool,
    pub attrib_location: i32,
    next_id: u32,
}

impl RecordingDevice {
    fn next(&mut self) -> Option<u32> {
        if self.fail_creates {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        Some(id)
    }
}

impl RenderDevice for RecordingDevice {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;

    fn create_shader(&mut self, _kind: u32) -> Option<u32> {
        self.next()
    }

    fn create_program(&mut self) -> Option<u32> {
        self.next()
    }

    fn create_buffer(&mut self) -> Option<u32> {
        self.next()
    }

    fn shader_source(&mut self, shader: &u32, source: &str) {
        self.calls.push(Call::ShaderSource { shader: *shader, source: source.to_string() });
    }

    fn compile_shader(&mut self, shader: &u32) {
        self.calls.push(Call::CompileShader(*shader));
    }

    fn attach_shader(&mut self, program: &u32, shader: &u32) {
        self.calls.push(Call::AttachShader { program: *program, shader: *shader });
    }

    fn link_program(&mut self, program: &u32) {
        self.calls.push(Call::LinkProgram(*program));
    }

    fn use_program(&mut self, program: &u32) {
        self.calls.push(Call::UseProgram(*program));
    }

    fn get_attrib_location(&mut self, program: &u32, name: &str) -> i32 {
        self.calls.push(Call::GetAttribLocation { program: *program, name: name.to_string() });
        self.attrib_location
    }

    fn bind_buffer(&mut self, target: u32, buffer: &u32) {
        self.calls.push(Call::BindBuffer { target, buffer: *buffer });
    }

    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32) {
        self.calls.push(Call::BufferData { target, data: data.to_vec(), usage });
    }

    fn clear(&mut self, mask: u32) {
        self.calls.push(Call::Clear(mask));
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.calls.push(Call::ClearColor([red, green, blue, alpha]));
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        self.calls.push(Call::DrawArrays { mode, first, count });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.calls.push(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.calls.push(Call::VertexAttribPointer { index, size, kind, normalized, stride, offset });
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::Viewport([x, y, width, height]));
    }
}

/// Host whose gamepads are fixed by the test and which records outputs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub pads: Vec<Option<GamepadState>>,
    pub cursor_styles: Vec<String>,
    pub message_boxes: Vec<String>,
    pub clipboard: Vec<String>,
}

impl HostDevices for RecordingHost {
    fn set_cursor_style(&mut self, style: &str) {
        self.cursor_styles.push(style.to_string());
    }

    fn gamepads(&mut self) -> Vec<Option<GamepadState>> {
        self.pads.clone()
    }

    fn message_box(&mut self, text: &str) {
        self.message_boxes.push(text.to_string());
    }

    fn write_clipboard(&mut self, text: &str) {
        self.clipboard.push(text.to_string());
    }
}
