//! Rendering device contract.
//!
//! The guest speaks a small WebGL 1 subset. This trait is that subset, with
//! object parameters already resolved to device objects and buffer/string
//! parameters already copied out of guest memory. Enum-typed parameters
//! (`target`, `usage`, `mode`, ...) are passed through untouched.

/// An immediate-mode rendering device.
///
/// # Example Implementation
///
/// ```ignore
/// impl RenderDevice for WebGlDevice {
///     type Shader = WebGlShader;
///     type Program = WebGlProgram;
///     type Buffer = WebGlBuffer;
///
///     fn create_shader(&mut self, kind: u32) -> Option<WebGlShader> {
///         self.gl.create_shader(kind)
///     }
///     // ...
/// }
/// ```
pub trait RenderDevice {
    type Shader;
    type Program;
    type Buffer;

    /// `None` when the device could not create the object (e.g. context loss).
    fn create_shader(&mut self, kind: u32) -> Option<Self::Shader>;
    fn create_program(&mut self) -> Option<Self::Program>;
    fn create_buffer(&mut self) -> Option<Self::Buffer>;

    fn shader_source(&mut self, shader: &Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: &Self::Shader);
    fn attach_shader(&mut self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&mut self, program: &Self::Program);
    fn use_program(&mut self, program: &Self::Program);
    fn get_attrib_location(&mut self, program: &Self::Program, name: &str) -> i32;

    fn bind_buffer(&mut self, target: u32, buffer: &Self::Buffer);
    fn buffer_data(&mut self, target: u32, data: &[u8], usage: u32);

    fn clear(&mut self, mask: u32);
    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);
    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32);
    fn enable_vertex_attrib_array(&mut self, index: u32);
    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
}
