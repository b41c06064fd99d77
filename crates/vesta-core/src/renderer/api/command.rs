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

//! The batched draw command record and the per-frame descriptor.

use std::sync::Arc;

use super::buffer::BufferId;
use super::key::PipelineKey;
use super::pipeline::FragmentMode;
use super::texture::{TextureId, TEXTURE_SLOTS};
use crate::math::{Extent2D, Mat4, Origin2D, Rect, Rgba};
use crate::renderer::traits::GraphicsDevice;

/// A buffer reference held by a draw command, tagged with ownership.
///
/// An owned buffer is destroyed through the device when the command list is
/// cleared; an external one belongs to the buffer manager or the recorder
/// and must outlive the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRef {
    /// The command exclusively owns the buffer.
    Owned(BufferId),
    /// The buffer belongs to a longer-lived owner.
    External(BufferId),
}

impl BufferRef {
    /// The underlying device buffer.
    #[inline]
    pub const fn id(&self) -> BufferId {
        match self {
            BufferRef::Owned(id) | BufferRef::External(id) => *id,
        }
    }

    /// Whether the command is responsible for destroying the buffer.
    #[inline]
    pub const fn is_owned(&self) -> bool {
        matches!(self, BufferRef::Owned(_))
    }
}

/// A model-view-projection reference held by a draw command.
///
/// Owned matrices are compared by value, shared ones by identity: two
/// commands batch together only when they reference the *same* shared
/// matrix, not merely equal ones, since the owner may rewrite it between
/// frames.
#[derive(Debug, Clone)]
pub enum MatrixRef {
    /// A matrix the command carries itself.
    Owned(Mat4),
    /// A matrix owned by the camera layer or the device.
    Shared(Arc<Mat4>),
}

impl MatrixRef {
    /// The referenced matrix value.
    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        match self {
            MatrixRef::Owned(m) => m,
            MatrixRef::Shared(m) => m,
        }
    }
}

impl PartialEq for MatrixRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MatrixRef::Owned(a), MatrixRef::Owned(b)) => a == b,
            (MatrixRef::Shared(a), MatrixRef::Shared(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One batched draw unit.
///
/// Created empty when a batch starts, extended while the recorded state
/// stays compatible, and immutable once pushed onto the command list.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// The encoded pipeline state.
    pub key: PipelineKey,
    /// Byte distance between the command's vertices.
    pub vertex_stride: usize,
    /// Number of vertices the command covers.
    pub vertices: usize,
    /// Number of indices the command covers; zero for non-indexed draws.
    pub indices: usize,
    /// The bound texture slots. Empty slots bind the device's placeholder
    /// texture at submission.
    pub textures: [Option<TextureId>; TEXTURE_SLOTS],
    /// The vertex buffer the command draws from.
    pub vertex_buffer: Option<BufferRef>,
    /// The index buffer the command draws from.
    pub index_buffer: Option<BufferRef>,
    /// Byte offset of the command's first vertex in the vertex buffer.
    pub vertex_offset: usize,
    /// Element offset of the command's first index in the index buffer.
    pub first_index: usize,
    /// The draw transform; `None` means the device orthographic matrix.
    pub mvp: Option<MatrixRef>,
    /// The fragment-stage flag.
    pub fragment_mode: FragmentMode,
}

impl DrawCommand {
    /// Creates an empty command for the given pipeline state.
    pub fn new(key: PipelineKey, vertex_stride: usize) -> Self {
        Self {
            key,
            vertex_stride,
            vertices: 0,
            indices: 0,
            textures: [None; TEXTURE_SLOTS],
            vertex_buffer: None,
            index_buffer: None,
            vertex_offset: 0,
            first_index: 0,
            mvp: None,
            fragment_mode: FragmentMode::default(),
        }
    }

    /// Whether the command covers no geometry yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices == 0 && self.indices == 0
    }

    /// Destroys every resource the command owns and drops all references.
    ///
    /// External buffers are left untouched; a failed destroy is logged
    /// rather than propagated since release runs on teardown paths.
    pub fn release(&mut self, device: &dyn GraphicsDevice) {
        for buffer in [self.vertex_buffer.take(), self.index_buffer.take()]
            .into_iter()
            .flatten()
        {
            if buffer.is_owned() {
                if let Err(err) = device.destroy_buffer(buffer.id()) {
                    log::warn!("failed to destroy command-owned buffer: {err}");
                }
            }
        }
        self.textures = [None; TEXTURE_SLOTS];
        self.mvp = None;
        self.vertices = 0;
        self.indices = 0;
    }
}

/// Per-frame state handed to the backend when submission begins.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescriptor {
    /// The clear color applied to the target.
    pub clear_color: Rgba,
    /// The viewport origin in pixels.
    pub viewport_origin: Origin2D,
    /// The viewport size in pixels.
    pub viewport_extent: Extent2D,
    /// The scissor rectangle.
    pub clip: Rect,
    /// Display gamma applied by the fragment stage.
    pub gamma: f32,
}
