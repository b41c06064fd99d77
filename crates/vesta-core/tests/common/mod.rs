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

//! A recording [`GraphicsDevice`] mock used by the integration suites.

// Each suite compiles its own copy of this module and uses a different
// slice of it.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::ops::Range;

use vesta_core::math::Mat4;
use vesta_core::renderer::api::{
    BufferDescriptor, BufferId, FragmentMode, FrameDescriptor, RenderPipelineDescriptor,
    RenderPipelineId, ShaderModuleDescriptor, ShaderModuleId, TextureDescriptor, TextureId,
    TEXTURE_SLOTS,
};
use vesta_core::renderer::error::ResourceError;
use vesta_core::renderer::traits::{GraphicsDevice, RenderPass};

/// One recorded render-pass call.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    SetPipeline(RenderPipelineId),
    SetVertexBuffer(BufferId),
    SetIndexBuffer(BufferId),
    BindTextures([TextureId; TEXTURE_SLOTS]),
    SetUniforms(Mat4, FragmentMode),
    DrawIndexed(Range<u32>, i32),
    Draw(Range<u32>),
    FinishPass,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: usize,
    shaders_alive: HashSet<ShaderModuleId>,
    shaders_destroyed: Vec<ShaderModuleId>,
    pipelines_alive: HashSet<RenderPipelineId>,
    pipelines_created: usize,
    buffers_alive: HashSet<BufferId>,
    buffers_destroyed: Vec<BufferId>,
    textures_alive: HashSet<TextureId>,
    writes: Vec<(BufferId, u64, usize)>,
    frames: Vec<FrameDescriptor>,
    trace: Vec<TraceEvent>,
    fail_pipeline_creation: bool,
    fail_pipeline_destruction: bool,
}

/// A `GraphicsDevice` that records every call instead of touching a GPU.
#[derive(Debug)]
pub struct RecordingDevice {
    inner: RefCell<Inner>,
    placeholder: TextureId,
}

impl RecordingDevice {
    pub fn new() -> Self {
        let device = Self {
            inner: RefCell::new(Inner::default()),
            placeholder: TextureId(0),
        };
        {
            let mut inner = device.inner.borrow_mut();
            inner.next_id = 1;
            inner.textures_alive.insert(TextureId(0));
        }
        device
    }

    fn next_id(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        id
    }

    /// Makes the next `create_render_pipeline` call fail.
    pub fn fail_next_pipeline(&self) {
        self.inner.borrow_mut().fail_pipeline_creation = true;
    }

    /// Makes the next `destroy_render_pipeline` call fail, leaving the
    /// pipeline alive.
    pub fn fail_next_pipeline_destroy(&self) {
        self.inner.borrow_mut().fail_pipeline_destruction = true;
    }

    pub fn trace(&self) -> Vec<TraceEvent> {
        self.inner.borrow().trace.clone()
    }

    pub fn clear_trace(&self) {
        self.inner.borrow_mut().trace.clear();
    }

    pub fn pipelines_created(&self) -> usize {
        self.inner.borrow().pipelines_created
    }

    pub fn pipelines_alive(&self) -> usize {
        self.inner.borrow().pipelines_alive.len()
    }

    pub fn buffers_alive(&self) -> usize {
        self.inner.borrow().buffers_alive.len()
    }

    pub fn buffers_destroyed(&self) -> Vec<BufferId> {
        self.inner.borrow().buffers_destroyed.clone()
    }

    pub fn shaders_destroyed(&self) -> Vec<ShaderModuleId> {
        self.inner.borrow().shaders_destroyed.clone()
    }

    pub fn writes(&self) -> Vec<(BufferId, u64, usize)> {
        self.inner.borrow().writes.clone()
    }

    pub fn frames(&self) -> Vec<FrameDescriptor> {
        self.inner.borrow().frames.clone()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_shader_module(
        &self,
        _desc: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModuleId, ResourceError> {
        let id = ShaderModuleId(self.next_id());
        self.inner.borrow_mut().shaders_alive.insert(id);
        Ok(id)
    }

    fn destroy_shader_module(&self, id: ShaderModuleId) -> Result<(), ResourceError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.shaders_alive.remove(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        inner.shaders_destroyed.push(id);
        Ok(())
    }

    fn create_render_pipeline(
        &self,
        _desc: &RenderPipelineDescriptor<'_>,
    ) -> Result<RenderPipelineId, ResourceError> {
        if std::mem::take(&mut self.inner.borrow_mut().fail_pipeline_creation) {
            return Err(ResourceError::Backend("induced pipeline failure".into()));
        }
        let id = RenderPipelineId(self.next_id());
        let mut inner = self.inner.borrow_mut();
        inner.pipelines_alive.insert(id);
        inner.pipelines_created += 1;
        Ok(id)
    }

    fn destroy_render_pipeline(&self, id: RenderPipelineId) -> Result<(), ResourceError> {
        if std::mem::take(&mut self.inner.borrow_mut().fail_pipeline_destruction) {
            return Err(ResourceError::Backend("induced destroy failure".into()));
        }
        if !self.inner.borrow_mut().pipelines_alive.remove(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        Ok(())
    }

    fn create_buffer(&self, _desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError> {
        let id = BufferId(self.next_id());
        self.inner.borrow_mut().buffers_alive.insert(id);
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.buffers_alive.remove(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        inner.buffers_destroyed.push(id);
        Ok(())
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.buffers_alive.contains(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        inner.writes.push((id, offset, data.len()));
        Ok(())
    }

    fn create_texture(
        &self,
        _desc: &TextureDescriptor<'_>,
        _data: &[u8],
    ) -> Result<TextureId, ResourceError> {
        let id = TextureId(self.next_id());
        self.inner.borrow_mut().textures_alive.insert(id);
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        if !self.inner.borrow_mut().textures_alive.remove(&id) {
            return Err(ResourceError::InvalidHandle);
        }
        Ok(())
    }

    fn placeholder_texture(&self) -> TextureId {
        self.placeholder
    }

    fn begin_frame(
        &self,
        frame: &FrameDescriptor,
    ) -> Result<Box<dyn RenderPass + '_>, ResourceError> {
        self.inner.borrow_mut().frames.push(frame.clone());
        Ok(Box::new(RecordingPass { device: self }))
    }

    fn flush(&self) -> Result<(), ResourceError> {
        Ok(())
    }
}

struct RecordingPass<'a> {
    device: &'a RecordingDevice,
}

impl RecordingPass<'_> {
    fn record(&self, event: TraceEvent) {
        self.device.inner.borrow_mut().trace.push(event);
    }
}

impl RenderPass for RecordingPass<'_> {
    fn set_pipeline(&mut self, id: RenderPipelineId) -> Result<(), ResourceError> {
        self.record(TraceEvent::SetPipeline(id));
        Ok(())
    }

    fn set_vertex_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        self.record(TraceEvent::SetVertexBuffer(id));
        Ok(())
    }

    fn set_index_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        self.record(TraceEvent::SetIndexBuffer(id));
        Ok(())
    }

    fn bind_textures(
        &mut self,
        textures: [TextureId; TEXTURE_SLOTS],
    ) -> Result<(), ResourceError> {
        self.record(TraceEvent::BindTextures(textures));
        Ok(())
    }

    fn set_uniforms(&mut self, mvp: &Mat4, mode: FragmentMode) -> Result<(), ResourceError> {
        self.record(TraceEvent::SetUniforms(*mvp, mode));
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        indices: Range<u32>,
        base_vertex: i32,
    ) -> Result<(), ResourceError> {
        self.record(TraceEvent::DrawIndexed(indices, base_vertex));
        Ok(())
    }

    fn draw(&mut self, vertices: Range<u32>) -> Result<(), ResourceError> {
        self.record(TraceEvent::Draw(vertices));
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), ResourceError> {
        self.record(TraceEvent::FinishPass);
        Ok(())
    }
}

/// Builds a renderer with the four built-in shader names registered.
pub fn renderer(
    width: u32,
    height: u32,
) -> vesta_core::renderer::device::BatchRenderer<RecordingDevice> {
    use std::borrow::Cow;
    use vesta_core::renderer::api::ShaderSourceData;

    let mut renderer =
        vesta_core::renderer::device::BatchRenderer::new(RecordingDevice::new(), width, height);
    for name in ["flat", "unlit_tex", "sprite", "sprite_dual"] {
        renderer
            .register_shader(
                name,
                &ShaderModuleDescriptor {
                    label: Some(name),
                    source: ShaderSourceData::Wgsl(Cow::Borrowed("")),
                    vs_entry: "vs_main",
                    fs_entry: "fs_main",
                },
            )
            .expect("shader registration");
    }
    renderer
}
