//! Guest rendering calls → [`RenderDevice`] calls.
//!
//! One proxy call is exactly one device call. Object parameters are guest
//! handles resolved through the session's [`HandleTable`]; pointer parameters
//! are resolved through a [`MemoryView`] built for the current call.

use crate::error::{BridgeError, Result};
use crate::memory::view::{GuestMemory, MemoryView};
use crate::renderer::handles::{HandleTable, ObjectKind};
use crate::renderer::traits::RenderDevice;

/// A slot in the handle table.
pub enum RenderObject<D: RenderDevice> {
    Shader(D::Shader),
    Program(D::Program),
    Buffer(D::Buffer),
    /// The device failed to create the object; the index is still taken.
    Lost(ObjectKind),
}

impl<D: RenderDevice> RenderObject<D> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            RenderObject::Shader(_) => ObjectKind::Shader,
            RenderObject::Program(_) => ObjectKind::Program,
            RenderObject::Buffer(_) => ObjectKind::Buffer,
            RenderObject::Lost(kind) => *kind,
        }
    }

    fn lost_or_wrong(&self, index: u32, expected: ObjectKind) -> BridgeError {
        match self {
            RenderObject::Lost(kind) if *kind == expected => BridgeError::LostObject { index },
            _ => BridgeError::WrongObjectKind { index, expected },
        }
    }

    fn as_shader(&self, index: u32) -> Result<&D::Shader> {
        match self {
            RenderObject::Shader(shader) => Ok(shader),
            other => Err(other.lost_or_wrong(index, ObjectKind::Shader)),
        }
    }

    fn as_program(&self, index: u32) -> Result<&D::Program> {
        match self {
            RenderObject::Program(program) => Ok(program),
            other => Err(other.lost_or_wrong(index, ObjectKind::Program)),
        }
    }

    fn as_buffer(&self, index: u32) -> Result<&D::Buffer> {
        match self {
            RenderObject::Buffer(buffer) => Ok(buffer),
            other => Err(other.lost_or_wrong(index, ObjectKind::Buffer)),
        }
    }
}

/// Stateless forwarding layer owning the device and its handle table.
pub struct RenderProxy<D: RenderDevice> {
    device: D,
    objects: HandleTable<RenderObject<D>>,
}

impl<D: RenderDevice> RenderProxy<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            objects: HandleTable::new(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn objects(&self) -> &HandleTable<RenderObject<D>> {
        &self.objects
    }

    fn store(&mut self, object: Option<RenderObject<D>>, kind: ObjectKind) -> u32 {
        let object = object.unwrap_or_else(|| {
            log::warn!("rendering device failed to create a {}", kind);
            RenderObject::Lost(kind)
        });
        self.objects.create(object)
    }

    // ---- Object creation ----

    pub fn create_shader(&mut self, kind: u32) -> u32 {
        let shader = self.device.create_shader(kind).map(RenderObject::Shader);
        self.store(shader, ObjectKind::Shader)
    }

    pub fn create_program(&mut self) -> u32 {
        let program = self.device.create_program().map(RenderObject::Program);
        self.store(program, ObjectKind::Program)
    }

    /// Create `n` buffers and write their handles, in creation order, as
    /// `u32`s at `out_ptr`. Nothing is created if the output does not fit.
    pub fn gen_buffers<M: GuestMemory + ?Sized>(
        &mut self,
        memory: &mut MemoryView<'_, M>,
        n: u32,
        out_ptr: u32,
    ) -> Result<()> {
        memory.ensure_slice::<u32>(out_ptr, n)?;
        let mut handles = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let buffer = self.device.create_buffer().map(RenderObject::Buffer);
            handles.push(self.store(buffer, ObjectKind::Buffer));
        }
        memory.write_slice(out_ptr, handles.as_slice())
    }

    // ---- Shaders and programs ----

    /// Assemble `count` source fragments and hand them to the shader.
    ///
    /// `strings_ptr` points at `count` fragment pointers. When `lengths_ptr`
    /// is non-zero it points at `count` signed lengths; a non-negative length
    /// delimits its fragment, a negative one (or a null `lengths_ptr`) means
    /// the fragment is null-terminated.
    pub fn shader_source<M: GuestMemory + ?Sized>(
        &mut self,
        memory: &MemoryView<'_, M>,
        shader: u32,
        count: u32,
        strings_ptr: u32,
        lengths_ptr: u32,
    ) -> Result<()> {
        let target = self.objects.resolve(shader)?.as_shader(shader)?;
        let strings: Vec<u32> = memory.read_slice(strings_ptr, count)?;
        let lengths: Vec<i32> = if lengths_ptr != 0 {
            memory.read_slice(lengths_ptr, count)?
        } else {
            Vec::new()
        };

        let mut source = Vec::new();
        for (i, &ptr) in strings.iter().enumerate() {
            match lengths.get(i) {
                Some(&len) if len >= 0 => source.extend(memory.read_bytes(ptr, len as u32)?),
                _ => source.extend(memory.read_cstr_bytes(ptr)?),
            }
        }
        self.device
            .shader_source(target, &String::from_utf8_lossy(&source));
        Ok(())
    }

    pub fn compile_shader(&mut self, shader: u32) -> Result<()> {
        let shader = self.objects.resolve(shader)?.as_shader(shader)?;
        self.device.compile_shader(shader);
        Ok(())
    }

    pub fn attach_shader(&mut self, program: u32, shader: u32) -> Result<()> {
        let program = self.objects.resolve(program)?.as_program(program)?;
        let shader = self.objects.resolve(shader)?.as_shader(shader)?;
        self.device.attach_shader(program, shader);
        Ok(())
    }

    pub fn link_program(&mut self, program: u32) -> Result<()> {
        let program = self.objects.resolve(program)?.as_program(program)?;
        self.device.link_program(program);
        Ok(())
    }

    pub fn use_program(&mut self, program: u32) -> Result<()> {
        let program = self.objects.resolve(program)?.as_program(program)?;
        self.device.use_program(program);
        Ok(())
    }

    /// `name_ptr` is a null-terminated attribute name.
    pub fn get_attrib_location<M: GuestMemory + ?Sized>(
        &mut self,
        memory: &MemoryView<'_, M>,
        program: u32,
        name_ptr: u32,
    ) -> Result<i32> {
        let program = self.objects.resolve(program)?.as_program(program)?;
        let name = memory.read_cstr(name_ptr)?;
        Ok(self.device.get_attrib_location(program, &name))
    }

    // ---- Buffers ----

    pub fn bind_buffer(&mut self, target: u32, buffer: u32) -> Result<()> {
        let buffer = self.objects.resolve(buffer)?.as_buffer(buffer)?;
        self.device.bind_buffer(target, buffer);
        Ok(())
    }

    /// Upload `size` raw bytes from `data_ptr` to the buffer bound at `target`.
    pub fn buffer_data<M: GuestMemory + ?Sized>(
        &mut self,
        memory: &MemoryView<'_, M>,
        target: u32,
        size: u32,
        data_ptr: u32,
        usage: u32,
    ) -> Result<()> {
        let data = memory.read_bytes(data_ptr, size)?;
        self.device.buffer_data(target, &data, usage);
        Ok(())
    }

    // ---- State and drawing ----

    pub fn clear(&mut self, mask: u32) {
        self.device.clear(mask);
    }

    pub fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.device.clear_color(red, green, blue, alpha);
    }

    pub fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) {
        self.device.draw_arrays(mode, first, count);
    }

    pub fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.device.enable_vertex_attrib_array(index);
    }

    pub fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        kind: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.device
            .vertex_attrib_pointer(index, size, kind, normalized, stride, offset);
    }

    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.device.viewport(x, y, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingDevice};

    const VERTEX_SHADER: u32 = 0x8B31;
    const ARRAY_BUFFER: u32 = 0x8892;
    const STATIC_DRAW: u32 = 0x88E4;

    fn proxy() -> RenderProxy<RecordingDevice> {
        RenderProxy::new(RecordingDevice::default())
    }

    #[test]
    fn creates_share_one_index_space() {
        let mut p = proxy();
        assert_eq!(p.create_shader(VERTEX_SHADER), 0);
        assert_eq!(p.create_program(), 1);
        assert_eq!(p.create_shader(VERTEX_SHADER), 2);
        assert_eq!(p.objects().len(), 3);
        assert_eq!(p.objects().resolve(1).unwrap().kind(), ObjectKind::Program);
    }

    #[test]
    fn gen_buffers_writes_ascending_handles() {
        let mut p = proxy();
        p.create_program();
        let mut mem = vec![0u8; 64];
        let mut view = MemoryView::new(&mut mem, 64);
        p.gen_buffers(&mut view, 3, 16).unwrap();
        assert_eq!(view.read_slice::<u32>(16, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(p.objects().len(), 4);
    }

    #[test]
    fn gen_buffers_that_do_not_fit_create_nothing() {
        let mut p = proxy();
        let mut mem = vec![0u8; 8];
        let mut view = MemoryView::new(&mut mem, 64);
        assert!(p.gen_buffers(&mut view, 3, 0).is_err());
        assert!(p.objects().is_empty());
    }

    #[test]
    fn unknown_handle_is_rejected() {
        let mut p = proxy();
        p.create_program();
        assert!(matches!(
            p.link_program(1),
            Err(BridgeError::InvalidHandle { index: 1, len: 1 })
        ));
        assert!(p.device().calls.is_empty());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut p = proxy();
        let shader = p.create_shader(VERTEX_SHADER);
        assert!(matches!(
            p.use_program(shader),
            Err(BridgeError::WrongObjectKind { index: 0, expected: ObjectKind::Program })
        ));
    }

    #[test]
    fn lost_objects_keep_their_index() {
        let mut p = proxy();
        p.device_mut().fail_creates = true;
        assert_eq!(p.create_program(), 0);
        p.device_mut().fail_creates = false;
        assert_eq!(p.create_program(), 1);
        assert!(matches!(p.link_program(0), Err(BridgeError::LostObject { index: 0 })));
        p.link_program(1).unwrap();
    }

    #[test]
    fn attach_resolves_both_handles() {
        let mut p = proxy();
        let program = p.create_program();
        let shader = p.create_shader(VERTEX_SHADER);
        p.attach_shader(program, shader).unwrap();
        assert_eq!(
            p.device().calls.last(),
            Some(&Call::AttachShader { program: 0, shader: 1 })
        );
    }

    #[test]
    fn shader_source_mixes_sized_and_terminated_fragments() {
        let mut mem = vec![0u8; 128];
        mem[32..42].copy_from_slice(b"void main(");
        mem[48..57].copy_from_slice(b") {}\0\0\0\0\0");
        // fragment pointers at 0, lengths at 16
        mem[0..4].copy_from_slice(&32u32.to_le_bytes());
        mem[4..8].copy_from_slice(&48u32.to_le_bytes());
        mem[16..20].copy_from_slice(&5i32.to_le_bytes());
        mem[20..24].copy_from_slice(&(-1i32).to_le_bytes());

        let mut p = proxy();
        let shader = p.create_shader(VERTEX_SHADER);
        let view = MemoryView::new(&mut mem, 1024);
        p.shader_source(&view, shader, 2, 0, 16).unwrap();
        assert_eq!(
            p.device().calls.last(),
            Some(&Call::ShaderSource { shader: 0, source: "void ) {}".to_string() })
        );
    }

    #[test]
    fn shader_source_without_lengths_reads_c_strings() {
        let mut mem = vec![0u8; 64];
        mem[16..20].copy_from_slice(b"abc\0");
        mem[24..27].copy_from_slice(b"de\0");
        mem[0..4].copy_from_slice(&16u32.to_le_bytes());
        mem[4..8].copy_from_slice(&24u32.to_le_bytes());

        let mut p = proxy();
        let shader = p.create_shader(VERTEX_SHADER);
        let view = MemoryView::new(&mut mem, 1024);
        p.shader_source(&view, shader, 2, 0, 0).unwrap();
        assert_eq!(
            p.device().calls.last(),
            Some(&Call::ShaderSource { shader: 0, source: "abcde".to_string() })
        );
    }

    #[test]
    fn buffer_upload_copies_raw_bytes() {
        let mut mem: Vec<u8> = (0..32).collect();
        let mut p = proxy();
        let view = MemoryView::new(&mut mem, 1024);
        p.buffer_data(&view, ARRAY_BUFFER, 4, 10, STATIC_DRAW).unwrap();
        assert_eq!(
            p.device().calls.last(),
            Some(&Call::BufferData { target: ARRAY_BUFFER, data: vec![10, 11, 12, 13], usage: STATIC_DRAW })
        );
        assert!(p.buffer_data(&view, ARRAY_BUFFER, 4, 30, STATIC_DRAW).is_err());
    }

    #[test]
    fn attrib_location_reads_name() {
        let mut mem = vec![0u8; 32];
        mem[8..13].copy_from_slice(b"a_uv\0");
        let mut p = proxy();
        let program = p.create_program();
        let view = MemoryView::new(&mut mem, 1024);
        p.device_mut().attrib_location = 3;
        assert_eq!(p.get_attrib_location(&view, program, 8).unwrap(), 3);
        assert_eq!(
            p.device().calls.last(),
            Some(&Call::GetAttribLocation { program: 0, name: "a_uv".to_string() })
        );
    }

    #[test]
    fn stateless_calls_forward_verbatim() {
        let mut p = proxy();
        p.clear_color(0.1, 0.2, 0.3, 1.0);
        p.clear(0x4000);
        p.viewport(0, 0, 800, 600);
        p.enable_vertex_attrib_array(2);
        p.vertex_attrib_pointer(2, 3, 0x1406, false, 12, 0);
        p.draw_arrays(4, 0, 3);
        assert_eq!(
            p.device().calls,
            vec![
                Call::ClearColor([0.1, 0.2, 0.3, 1.0]),
                Call::Clear(0x4000),
                Call::Viewport([0, 0, 800, 600]),
                Call::EnableVertexAttribArray(2),
                Call::VertexAttribPointer { index: 2, size: 3, kind: 0x1406, normalized: false, stride: 12, offset: 0 },
                Call::DrawArrays { mode: 4, first: 0, count: 3 },
            ]
        );
    }
}
