use std::fmt;

use crate::error::{BridgeError, Result};

/// Append-only arena mapping small integers to host objects.
///
/// Indices are handed out in strictly increasing order starting at 0 and are
/// never reused: objects live until the session ends.
pub struct HandleTable<T> {
    objects: Vec<T>,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Store an object and return its index.
    pub fn create(&mut self, object: T) -> u32 {
        self.objects.push(object);
        (self.objects.len() - 1) as u32
    }

    /// Store several objects; returns their consecutive indices in order.
    pub fn create_many<I: IntoIterator<Item = T>>(&mut self, objects: I) -> Vec<u32> {
        objects.into_iter().map(|object| self.create(object)).collect()
    }

    /// Look up an object by index.
    pub fn resolve(&self, index: u32) -> Result<&T> {
        self.objects
            .get(index as usize)
            .ok_or(BridgeError::InvalidHandle {
                index,
                len: self.objects.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The kinds of rendering objects a handle can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Shader,
    Program,
    Buffer,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Shader => "shader",
            ObjectKind::Program => "program",
            ObjectKind::Buffer => "buffer",
        })
    }
}
