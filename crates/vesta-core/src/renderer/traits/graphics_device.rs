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

//! The seam between the batching layer and a concrete GPU backend.

use std::fmt;
use std::ops::Range;

use crate::math::Mat4;
use crate::renderer::api::{
    BufferDescriptor, BufferId, FragmentMode, FrameDescriptor, RenderPipelineDescriptor,
    RenderPipelineId, ShaderModuleDescriptor, ShaderModuleId, TextureDescriptor, TextureId,
    TEXTURE_SLOTS,
};
use crate::renderer::error::ResourceError;

/// Abstraction over a GPU backend able to create resources and replay a
/// recorded frame.
///
/// All methods take `&self`; implementations handle their own interior
/// mutability so the batching layer can hold the device behind a shared
/// reference.
pub trait GraphicsDevice: fmt::Debug {
    /// Compiles a shader module from source.
    fn create_shader_module(
        &self,
        desc: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModuleId, ResourceError>;

    /// Destroys a shader module.
    fn destroy_shader_module(&self, id: ShaderModuleId) -> Result<(), ResourceError>;

    /// Creates a render pipeline for a shader and a fixed-function state.
    fn create_render_pipeline(
        &self,
        desc: &RenderPipelineDescriptor<'_>,
    ) -> Result<RenderPipelineId, ResourceError>;

    /// Destroys a render pipeline.
    fn destroy_render_pipeline(&self, id: RenderPipelineId) -> Result<(), ResourceError>;

    /// Allocates a GPU buffer.
    fn create_buffer(&self, desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError>;

    /// Destroys a GPU buffer.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    /// Uploads bytes into a buffer at the given offset.
    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError>;

    /// Creates a texture and uploads its initial RGBA8 contents.
    fn create_texture(
        &self,
        desc: &TextureDescriptor<'_>,
        data: &[u8],
    ) -> Result<TextureId, ResourceError>;

    /// Destroys a texture.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// The 1x1 white texture bound to slots a command left empty.
    fn placeholder_texture(&self) -> TextureId;

    /// Opens a render pass over the frame target.
    fn begin_frame(
        &self,
        frame: &FrameDescriptor,
    ) -> Result<Box<dyn RenderPass + '_>, ResourceError>;

    /// Blocks until all submitted GPU work has completed.
    fn flush(&self) -> Result<(), ResourceError>;
}

/// A render pass in flight; encodes state changes and draws in order.
pub trait RenderPass {
    /// Binds a pipeline.
    fn set_pipeline(&mut self, id: RenderPipelineId) -> Result<(), ResourceError>;

    /// Binds the vertex buffer for subsequent draws.
    fn set_vertex_buffer(&mut self, id: BufferId) -> Result<(), ResourceError>;

    /// Binds the index buffer for subsequent indexed draws.
    fn set_index_buffer(&mut self, id: BufferId) -> Result<(), ResourceError>;

    /// Binds both texture slots.
    fn bind_textures(&mut self, textures: [TextureId; TEXTURE_SLOTS])
        -> Result<(), ResourceError>;

    /// Uploads the per-draw transform and fragment flag.
    fn set_uniforms(&mut self, mvp: &Mat4, mode: FragmentMode) -> Result<(), ResourceError>;

    /// Issues an indexed draw with a base-vertex offset.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32)
        -> Result<(), ResourceError>;

    /// Issues a non-indexed draw.
    fn draw(&mut self, vertices: Range<u32>) -> Result<(), ResourceError>;

    /// Ends the pass and submits the encoded work.
    fn finish(self: Box<Self>) -> Result<(), ResourceError>;
}
