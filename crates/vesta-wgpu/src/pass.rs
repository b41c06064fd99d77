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

//! The in-flight frame pass: encodes recorded commands into a wgpu render
//! pass and submits on finish.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use vesta_core::math::Mat4;
use vesta_core::renderer::api::{
    BufferId, FragmentMode, RenderPipelineId, TextureId, TEXTURE_SLOTS,
};
use vesta_core::renderer::error::ResourceError;
use vesta_core::renderer::traits::RenderPass;

use crate::device::WgpuDevice;

/// Spacing of per-draw uniform records in the ring buffer; matches the
/// minimum dynamic-offset alignment wgpu guarantees on all backends.
pub(crate) const UNIFORM_STRIDE: u32 = 256;

/// The per-draw uniform record; layout matches the WGSL `Uniforms` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub mvp: [f32; 16],
    pub fs_mode: u32,
    pub gamma: f32,
    pub _pad: [u32; 2],
}

/// A recording render pass over the offscreen frame target.
pub struct WgpuFramePass<'a> {
    device: &'a WgpuDevice,
    pass: wgpu::RenderPass<'static>,
    encoder: wgpu::CommandEncoder,
    gamma: f32,
}

impl<'a> WgpuFramePass<'a> {
    pub(crate) fn new(
        device: &'a WgpuDevice,
        pass: wgpu::RenderPass<'static>,
        encoder: wgpu::CommandEncoder,
        gamma: f32,
    ) -> Self {
        Self {
            device,
            pass,
            encoder,
            gamma,
        }
    }
}

impl RenderPass for WgpuFramePass<'_> {
    fn set_pipeline(&mut self, id: RenderPipelineId) -> Result<(), ResourceError> {
        let pipeline = self.device.pipeline(id)?;
        self.pass.set_pipeline(&pipeline);
        Ok(())
    }

    fn set_vertex_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        let buffer = self.device.buffer(id)?;
        self.pass.set_vertex_buffer(0, buffer.slice(..));
        Ok(())
    }

    fn set_index_buffer(&mut self, id: BufferId) -> Result<(), ResourceError> {
        let buffer = self.device.buffer(id)?;
        self.pass
            .set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint16);
        Ok(())
    }

    fn bind_textures(
        &mut self,
        textures: [TextureId; TEXTURE_SLOTS],
    ) -> Result<(), ResourceError> {
        let group = self.device.texture_bind_group(textures)?;
        self.pass.set_bind_group(1, group.as_ref(), &[]);
        Ok(())
    }

    fn set_uniforms(&mut self, mvp: &Mat4, mode: FragmentMode) -> Result<(), ResourceError> {
        let uniforms = Uniforms {
            mvp: mvp.to_cols_array(),
            fs_mode: match mode {
                FragmentMode::Normal => 0,
                FragmentMode::ModColorAddAlpha => 1,
            },
            gamma: self.gamma,
            _pad: [0; 2],
        };
        let offset = self.device.push_uniforms(&uniforms)?;
        self.pass
            .set_bind_group(0, self.device.uniform_bind_group(), &[offset]);
        Ok(())
    }

    fn draw_indexed(
        &mut self,
        indices: Range<u32>,
        base_vertex: i32,
    ) -> Result<(), ResourceError> {
        self.pass.draw_indexed(indices, base_vertex, 0..1);
        Ok(())
    }

    fn draw(&mut self, vertices: Range<u32>) -> Result<(), ResourceError> {
        self.pass.draw(vertices, 0..1);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), ResourceError> {
        let WgpuFramePass {
            device,
            pass,
            encoder,
            ..
        } = *self;
        // The pass borrows the encoder; it must end before the encoder can
        // finish.
        drop(pass);
        device.queue().submit(Some(encoder.finish()));
        Ok(())
    }
}
