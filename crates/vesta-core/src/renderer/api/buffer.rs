// Copyright 2026 the Vesta authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GPU buffer handles and descriptors.

use std::borrow::Cow;

use super::pipeline::VertexFormat;

/// Indices per polygon in index buffers (triangle lists).
pub const INDICES_PER_POLYGON: usize = 3;

/// An opaque handle to a GPU buffer resource, issued by the
/// [`GraphicsDevice`](crate::renderer::GraphicsDevice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// What a buffer binds as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// A vertex buffer.
    Vertex,
    /// An index buffer (u16 indices).
    Index,
}

/// A descriptor used to create a GPU buffer.
#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    /// An optional debug label for the buffer.
    pub label: Option<Cow<'a, str>>,
    /// The total size of the buffer in bytes. Fixed for the buffer's
    /// lifetime; resizing requires destroy + recreate.
    pub size: u64,
    /// What the buffer binds as.
    pub kind: BufferKind,
    /// Whether the contents may be rewritten across frames. Static buffers
    /// are written once after creation.
    pub dynamic: bool,
}

/// A caller-visible vertex buffer created through the buffer manager.
///
/// The handle itself is plain data; lock state lives in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBuffer {
    /// The underlying device buffer.
    pub id: BufferId,
    /// Capacity in vertices.
    pub capacity: u32,
    /// The vertex memory layout, which fixes the element stride.
    pub format: VertexFormat,
    /// Whether the contents may be rewritten across frames.
    pub dynamic: bool,
}

impl VertexBuffer {
    /// The buffer capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> u64 {
        self.capacity as u64 * self.format.stride() as u64
    }
}

/// A caller-visible index buffer created through the buffer manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBuffer {
    /// The underlying device buffer.
    pub id: BufferId,
    /// Capacity in u16 indices.
    pub capacity: u32,
}

impl IndexBuffer {
    /// The buffer capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> u64 {
        self.capacity as u64 * std::mem::size_of::<u16>() as u64
    }
}
