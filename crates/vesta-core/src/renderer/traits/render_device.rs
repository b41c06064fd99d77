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

//! The immediate-mode surface the game layer draws through.

use crate::math::{Extent2D, Mat4, Rect, Rgba, Rgba8};
use crate::renderer::api::{
    BlendMode, ColorMode, IndexBuffer, TextureId, VertexBuffer, VertexFormat,
};
use crate::renderer::error::RenderError;

/// Capability trait for a batching 2D render device.
///
/// Draw calls are recorded between [`begin_scene`] and [`end_scene`] and
/// submitted in order at the scene close. Sprite coordinates are pixels with
/// the origin at the top-left; texture coordinates are normalized.
///
/// [`begin_scene`]: RenderDevice::begin_scene
/// [`end_scene`]: RenderDevice::end_scene
pub trait RenderDevice {
    /// Releases every GPU resource the device owns. The device is unusable
    /// afterwards.
    fn done(&mut self) -> Result<(), RenderError>;

    /// Resizes the frame target. Invalid while a scene is active; on
    /// success the orthographic matrix and clip rect are recomputed and all
    /// cached pipelines are discarded.
    fn change_size(&mut self, extent: Extent2D) -> Result<(), RenderError>;

    /// Opens a scene. Draw calls are only valid between this and
    /// [`end_scene`](RenderDevice::end_scene).
    fn begin_scene(&mut self) -> Result<(), RenderError>;

    /// Closes the scene, submitting every recorded command in order.
    fn end_scene(&mut self) -> Result<(), RenderError>;

    /// Blocks until all submitted GPU work has completed.
    fn flush(&mut self) -> Result<(), RenderError>;

    /// Sets the scissor rectangle applied to subsequent scenes.
    fn set_clip_rect(&mut self, rect: Rect);

    /// The current scissor rectangle.
    fn get_clip_rect(&self) -> Rect;

    /// Sets the clear color applied when the next scene begins.
    fn fill(&mut self, color: Rgba);

    /// Sets the display gamma applied by the backend at frame time.
    fn set_gamma(&mut self, gamma: f32);

    /// Sets the transform applied to subsequent draws. Passing the value
    /// already in effect keeps the current batch open.
    fn set_draw_transform(&mut self, mvp: &Mat4);

    /// Primes blend, texture and color-mode state for the primitive paths
    /// without going through a material.
    fn set_no_material(
        &mut self,
        blend: BlendMode,
        texture0: Option<TextureId>,
        texture1: Option<TextureId>,
        color_mode: ColorMode,
    ) -> Result<(), RenderError>;

    /// Creates a caller-visible vertex buffer of `count` elements.
    fn create_vertex_buffer(
        &mut self,
        count: u32,
        format: VertexFormat,
        dynamic: bool,
    ) -> Result<VertexBuffer, RenderError>;

    /// Destroys a caller-visible vertex buffer. Fails while locked.
    fn delete_vertex_buffer(&mut self, buffer: VertexBuffer) -> Result<(), RenderError>;

    /// Locks a vertex buffer for writing, returning the staging bytes.
    fn lock_vertex_buffer(&mut self, buffer: &VertexBuffer) -> Result<&mut [u8], RenderError>;

    /// Unlocks a vertex buffer, uploading the staged bytes.
    fn unlock_vertex_buffer(&mut self, buffer: &VertexBuffer) -> Result<(), RenderError>;

    /// Creates a caller-visible index buffer covering `polygons` triangles.
    fn create_index_buffer(&mut self, polygons: u32) -> Result<IndexBuffer, RenderError>;

    /// Destroys a caller-visible index buffer. Fails while locked.
    fn delete_index_buffer(&mut self, buffer: IndexBuffer) -> Result<(), RenderError>;

    /// Locks an index buffer for writing, returning the staging indices.
    fn lock_index_buffer(&mut self, buffer: &IndexBuffer) -> Result<&mut [u16], RenderError>;

    /// Unlocks an index buffer, uploading the staged indices.
    fn unlock_index_buffer(&mut self, buffer: &IndexBuffer) -> Result<(), RenderError>;

    /// Creates a texture from RGBA8 pixels.
    fn create_texture(
        &mut self,
        size: Extent2D,
        data: &[u8],
        label: Option<&str>,
    ) -> Result<TextureId, RenderError>;

    /// Destroys a texture.
    fn delete_texture(&mut self, id: TextureId) -> Result<(), RenderError>;

    /// Draws a textured quad at `(x, y)` of size `(dx, dy)` with the uv
    /// window `(u, v) .. (u + du, v + dv)`.
    #[allow(clippy::too_many_arguments)]
    fn draw_sprite(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        u: f32,
        v: f32,
        du: f32,
        dv: f32,
        texture: TextureId,
        color: Rgba8,
    ) -> Result<(), RenderError>;

    /// Draws a dual-textured quad; `color_mode` selects how the second
    /// sample combines with the first.
    #[allow(clippy::too_many_arguments)]
    fn draw_sprite2(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        u: f32,
        v: f32,
        du: f32,
        dv: f32,
        u2: f32,
        v2: f32,
        du2: f32,
        dv2: f32,
        texture0: TextureId,
        texture1: TextureId,
        color: Rgba8,
        color_mode: ColorMode,
    ) -> Result<(), RenderError>;

    /// Draws a solid or outline rectangle. Translucent colors select alpha
    /// blending; outline rectangles use the line-list topology.
    fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        color: Rgba8,
        outline: bool,
    ) -> Result<(), RenderError>;

    /// Closes the batch in flight so later draws start a fresh command.
    fn flush_primitive_2d(&mut self) -> Result<(), RenderError>;
}
