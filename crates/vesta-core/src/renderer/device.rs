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

//! The frame driver: scene bracketing, frame state and ordered submission.

use std::sync::Arc;

use crate::math::{Extent2D, Mat4, Origin2D, Rect, Rgba, Rgba8};
use crate::renderer::api::{
    BlendMode, ColorMode, FlatVertex, FrameDescriptor, IndexBuffer, MatrixRef, PipelineState,
    PrimitiveTopology, ShaderModuleDescriptor, ShaderModuleId, Sprite2Vertex, SpriteVertex,
    TextureDescriptor, TextureId, VertexBuffer, VertexFormat, TEXTURE_SLOTS,
};
use crate::renderer::buffers::BufferManager;
use crate::renderer::error::{RenderError, UsageError};
use crate::renderer::pipeline_cache::PipelineCache;
use crate::renderer::recorder::CommandRecorder;
use crate::renderer::traits::{GraphicsDevice, RenderDevice};

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 3, 2];
const OUTLINE_INDICES: [u16; 8] = [0, 1, 1, 3, 3, 2, 2, 0];

/// A batching 2D render device over any [`GraphicsDevice`] backend.
#[derive(Debug)]
pub struct BatchRenderer<D: GraphicsDevice> {
    device: D,
    cache: PipelineCache,
    buffers: BufferManager,
    recorder: CommandRecorder,

    extent: Extent2D,
    clip: Rect,
    fill_color: Rgba,
    gamma: f32,
    ortho: Mat4,
    draw_transform: Option<Arc<Mat4>>,
    no_material_blend: BlendMode,
    scene_active: bool,
    frame: Option<FrameDescriptor>,
}

impl<D: GraphicsDevice> BatchRenderer<D> {
    /// Creates a renderer over `device` targeting a `width` x `height`
    /// frame.
    pub fn new(device: D, width: u32, height: u32) -> Self {
        let extent = Extent2D { width, height };
        Self {
            device,
            cache: PipelineCache::new(),
            buffers: BufferManager::new(),
            recorder: CommandRecorder::new(),
            extent,
            clip: Rect::from_extent(extent),
            fill_color: Rgba::BLACK,
            gamma: 1.0,
            ortho: Mat4::orthographic_screen(width, height),
            draw_transform: None,
            no_material_blend: BlendMode::None,
            scene_active: false,
            frame: None,
        }
    }

    /// The backend the renderer drives.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Number of pipelines built since construction.
    pub fn pipelines_created(&self) -> usize {
        self.cache.created_count()
    }

    /// Commands finalized so far in the current scene.
    pub fn command_count(&self) -> usize {
        self.recorder.commands().len()
    }

    /// The current frame size.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// Compiles a shader module and registers it under `name` for pipeline
    /// construction. Re-registering a name destroys the displaced module.
    pub fn register_shader(
        &mut self,
        name: &str,
        desc: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModuleId, RenderError> {
        let module = self.device.create_shader_module(desc)?;
        self.cache.register_shader(&self.device, name, module)?;
        Ok(module)
    }

    fn ensure_scene(&self) -> Result<(), UsageError> {
        if self.scene_active {
            Ok(())
        } else {
            Err(UsageError::SceneNotActive)
        }
    }

    fn current_transform(&self) -> Option<MatrixRef> {
        self.draw_transform.clone().map(MatrixRef::Shared)
    }

    fn push_quad<V: bytemuck::Pod>(
        &mut self,
        state: PipelineState,
        vertices: &[V; 4],
        indices: &[u16],
    ) -> Result<(), RenderError> {
        let stride = state.vertex_format().stride();
        self.recorder.set_pipeline_state(state.encode(), stride);
        self.recorder.set_uniform_matrix(self.current_transform());
        self.recorder.prepare(&self.device, 4, indices.len())?;
        self.recorder
            .push(bytemuck::cast_slice(vertices), indices)?;
        Ok(())
    }

    fn submit(&mut self) -> Result<(), RenderError> {
        let frame = match self.frame.take() {
            Some(frame) => frame,
            None => return Err(UsageError::SceneNotActive.into()),
        };
        let mut pass = self.device.begin_frame(&frame)?;
        for cmd in self.recorder.commands() {
            let pipeline = self.cache.get_or_create(&self.device, cmd.key)?;
            pass.set_pipeline(pipeline)?;
            if let Some(vb) = cmd.vertex_buffer {
                pass.set_vertex_buffer(vb.id())?;
            }
            if let Some(ib) = cmd.index_buffer {
                pass.set_index_buffer(ib.id())?;
            }
            let mut slots = [self.device.placeholder_texture(); TEXTURE_SLOTS];
            for (slot, bound) in slots.iter_mut().zip(cmd.textures) {
                if let Some(id) = bound {
                    *slot = id;
                }
            }
            pass.bind_textures(slots)?;
            let mvp = cmd
                .mvp
                .as_ref()
                .map(MatrixRef::matrix)
                .unwrap_or(&self.ortho);
            pass.set_uniforms(mvp, cmd.fragment_mode)?;
            let base_vertex = (cmd.vertex_offset / cmd.vertex_stride) as i32;
            if cmd.indices > 0 {
                let first = cmd.first_index as u32;
                pass.draw_indexed(first..first + cmd.indices as u32, base_vertex)?;
            } else {
                let first = base_vertex as u32;
                pass.draw(first..first + cmd.vertices as u32)?;
            }
        }
        pass.finish()?;
        Ok(())
    }
}

impl<D: GraphicsDevice> RenderDevice for BatchRenderer<D> {
    fn done(&mut self) -> Result<(), RenderError> {
        self.scene_active = false;
        self.frame = None;
        self.recorder.release(&self.device)?;
        self.buffers.release(&self.device)?;
        self.cache.release(&self.device)?;
        Ok(())
    }

    fn change_size(&mut self, extent: Extent2D) -> Result<(), RenderError> {
        if self.scene_active {
            return Err(UsageError::ResizeDuringScene.into());
        }
        self.cache.clear(&self.device)?;
        self.extent = extent;
        self.clip = Rect::from_extent(extent);
        self.ortho = Mat4::orthographic_screen(extent.width, extent.height);
        log::debug!("frame target resized to {}x{}", extent.width, extent.height);
        Ok(())
    }

    fn begin_scene(&mut self) -> Result<(), RenderError> {
        if self.scene_active {
            return Err(UsageError::SceneAlreadyActive.into());
        }
        self.scene_active = true;
        self.frame = Some(FrameDescriptor {
            clear_color: self.fill_color,
            viewport_origin: Origin2D { x: 0, y: 0 },
            viewport_extent: self.extent,
            clip: self.clip,
            gamma: self.gamma,
        });
        Ok(())
    }

    fn end_scene(&mut self) -> Result<(), RenderError> {
        self.ensure_scene()?;
        self.recorder.finish();
        self.recorder.flush_staging(&self.device)?;
        let result = self.submit();
        self.recorder.clear_commands(&self.device);
        self.scene_active = false;
        result
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.device.flush()?;
        Ok(())
    }

    fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = rect;
    }

    fn get_clip_rect(&self) -> Rect {
        self.clip
    }

    fn fill(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn set_gamma(&mut self, gamma: f32) {
        self.gamma = gamma;
    }

    fn set_draw_transform(&mut self, mvp: &Mat4) {
        // Keeping the Arc when the value is unchanged preserves reference
        // identity, so the batch in flight stays open.
        if let Some(current) = &self.draw_transform {
            if **current == *mvp {
                return;
            }
        }
        self.draw_transform = Some(Arc::new(*mvp));
    }

    fn set_no_material(
        &mut self,
        blend: BlendMode,
        texture0: Option<TextureId>,
        texture1: Option<TextureId>,
        color_mode: ColorMode,
    ) -> Result<(), RenderError> {
        self.ensure_scene()?;
        self.no_material_blend = blend;
        self.recorder.set_textures([texture0, texture1]);
        self.recorder.set_fragment_mode(color_mode.fragment_mode());
        Ok(())
    }

    fn create_vertex_buffer(
        &mut self,
        count: u32,
        format: VertexFormat,
        dynamic: bool,
    ) -> Result<VertexBuffer, RenderError> {
        self.buffers
            .create_vertex_buffer(&self.device, count, format, dynamic)
    }

    fn delete_vertex_buffer(&mut self, buffer: VertexBuffer) -> Result<(), RenderError> {
        self.buffers.delete(&self.device, buffer.id)
    }

    fn lock_vertex_buffer(&mut self, buffer: &VertexBuffer) -> Result<&mut [u8], RenderError> {
        self.buffers.lock_vertex(buffer)
    }

    fn unlock_vertex_buffer(&mut self, buffer: &VertexBuffer) -> Result<(), RenderError> {
        self.buffers.unlock_vertex(&self.device, buffer)
    }

    fn create_index_buffer(&mut self, polygons: u32) -> Result<IndexBuffer, RenderError> {
        self.buffers.create_index_buffer(&self.device, polygons)
    }

    fn delete_index_buffer(&mut self, buffer: IndexBuffer) -> Result<(), RenderError> {
        self.buffers.delete(&self.device, buffer.id)
    }

    fn lock_index_buffer(&mut self, buffer: &IndexBuffer) -> Result<&mut [u16], RenderError> {
        self.buffers.lock_index(buffer)
    }

    fn unlock_index_buffer(&mut self, buffer: &IndexBuffer) -> Result<(), RenderError> {
        self.buffers.unlock_index(&self.device, buffer)
    }

    fn create_texture(
        &mut self,
        size: Extent2D,
        data: &[u8],
        label: Option<&str>,
    ) -> Result<TextureId, RenderError> {
        let id = self.device.create_texture(
            &TextureDescriptor {
                label: label.map(|l| l.to_owned().into()),
                size,
            },
            data,
        )?;
        Ok(id)
    }

    fn delete_texture(&mut self, id: TextureId) -> Result<(), RenderError> {
        self.device.destroy_texture(id)?;
        Ok(())
    }

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
    ) -> Result<(), RenderError> {
        self.set_no_material(BlendMode::Blend, Some(texture), None, ColorMode::Mod)?;
        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = ((x + dx) as f32, (y + dy) as f32);
        let vertices = [
            SpriteVertex { pos: [x0, y0, 0.0], color, uv: [u, v] },
            SpriteVertex { pos: [x1, y0, 0.0], color, uv: [u + du, v] },
            SpriteVertex { pos: [x0, y1, 0.0], color, uv: [u, v + dv] },
            SpriteVertex { pos: [x1, y1, 0.0], color, uv: [u + du, v + dv] },
        ];
        self.push_quad(
            PipelineState::full(
                PrimitiveTopology::TriangleList,
                VertexFormat::V3fC4bT2f,
                self.no_material_blend,
                false,
                true,
            ),
            &vertices,
            &QUAD_INDICES,
        )
    }

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
    ) -> Result<(), RenderError> {
        self.set_no_material(
            BlendMode::Blend,
            Some(texture0),
            Some(texture1),
            color_mode,
        )?;
        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = ((x + dx) as f32, (y + dy) as f32);
        let vertices = [
            Sprite2Vertex {
                pos: [x0, y0, 0.0],
                color,
                uv: [u, v],
                uv2: [u2, v2],
            },
            Sprite2Vertex {
                pos: [x1, y0, 0.0],
                color,
                uv: [u + du, v],
                uv2: [u2 + du2, v2],
            },
            Sprite2Vertex {
                pos: [x0, y1, 0.0],
                color,
                uv: [u, v + dv],
                uv2: [u2, v2 + dv2],
            },
            Sprite2Vertex {
                pos: [x1, y1, 0.0],
                color,
                uv: [u + du, v + dv],
                uv2: [u2 + du2, v2 + dv2],
            },
        ];
        self.push_quad(
            PipelineState::full(
                PrimitiveTopology::TriangleList,
                VertexFormat::V3fC4bT2fT2f,
                self.no_material_blend,
                false,
                true,
            ),
            &vertices,
            &QUAD_INDICES,
        )
    }

    fn draw_rectangle(
        &mut self,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        color: Rgba8,
        outline: bool,
    ) -> Result<(), RenderError> {
        let blend = if color.is_translucent() {
            BlendMode::Blend
        } else {
            BlendMode::None
        };
        self.set_no_material(blend, None, None, ColorMode::Mod)?;
        let (x0, y0) = (x as f32, y as f32);
        let (x1, y1) = ((x + dx) as f32, (y + dy) as f32);
        let vertices = [
            FlatVertex { pos: [x0, y0, 0.0], color },
            FlatVertex { pos: [x1, y0, 0.0], color },
            FlatVertex { pos: [x0, y1, 0.0], color },
            FlatVertex { pos: [x1, y1, 0.0], color },
        ];
        let (topology, indices): (_, &[u16]) = if outline {
            (PrimitiveTopology::LineList, &OUTLINE_INDICES)
        } else {
            (PrimitiveTopology::TriangleList, &QUAD_INDICES)
        };
        self.push_quad(
            PipelineState::full(topology, VertexFormat::V3fC4b, blend, false, true),
            &vertices,
            indices,
        )
    }

    fn flush_primitive_2d(&mut self) -> Result<(), RenderError> {
        self.ensure_scene()?;
        self.recorder.finish();
        Ok(())
    }
}
