use web_sys::{WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader};
use wio_bridge::RenderDevice;

/// WebGL 1 context as a rendering device.
pub struct WebGlDevice {
    gl: WebGlRenderingContext,
}

impl WebGlDevice {
    pub fn new(gl: WebGlRenderingContext) -> Self {
        Self { gl }
    }
}

impl RenderDevice for WebGlDevice {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;

    fn create_shader(&mut self, kind: u32) -> Option<WebGlShader> {
        self.gl.create_shader(kind)
    }

    fn create_program(&mut self) -> Option<WebGlProgram> {
        self.gl.create_program()
    }

    fn create_buffer(&mut self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn shader_source(&mut self, shader: &WebGlShader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    fn compile_shader(&mut self, shader: &WebGlShader) {
        self.gl.compile_shader(shader);
    }

    fn attach_shader(&mut self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.attach_shader(program, shader);
    }

    fn link_program(&mut self, program: &WebGlProgram) {
        self.gl.link_program(program);
    }

    fn use_program(&mut self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn get_attrib_location(&mut self, program: &WebGlProgram, name: &str) -> i32 {
        self.gl.get_attrib_location(program, name)
    }

    fn bind_buffer(&mut self, target: u32, buffer: &WebGlBuffer) {
        self.gl.bind_buffer(target, Some(buffer));
    }

    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32) {
        self.gl.buffer_data_with_u8_array(target, data, usage);
    }

    fn clear(&mut self, mask: u32) {
        self.gl.clear(mask);
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.gl.clear_color(red, green, blue, alpha);
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        self.gl.draw_arrays(mode, first, count);
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.gl.enable_vertex_attrib_array(index);
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
        self.gl
            .vertex_attrib_pointer_with_i32(index, size, kind, normalized, stride, offset);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }
}
