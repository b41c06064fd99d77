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

//! Accumulates draw requests into batched commands over shared dynamic
//! buffers.
//!
//! Consecutive draws merge into one command while the pipeline key, the
//! texture slots, the transform reference and the fragment mode all stay
//! identical; any change closes the batch in flight. Buffer growth retires
//! the old shared buffer by handing its ownership to the last command that
//! references it, so earlier batches stay valid until the command list is
//! cleared after submission.

use std::borrow::Cow;

use crate::renderer::api::{
    BufferDescriptor, BufferId, BufferKind, BufferRef, DrawCommand, FragmentMode, MatrixRef,
    PipelineKey, TextureId, TEXTURE_SLOTS,
};
use crate::renderer::error::{RenderError, ResourceError, UsageError};
use crate::renderer::traits::GraphicsDevice;

const MIN_VERTEX_BYTES: u64 = 4096;
const MIN_INDEX_COUNT: usize = 1024;

// u16 indices address at most this many vertices within one command.
const MAX_COMMAND_VERTICES: usize = u16::MAX as usize + 1;

/// The batching command recorder.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    active: Option<DrawCommand>,

    // Recorded state carried into the next command.
    key: Option<PipelineKey>,
    stride: usize,
    textures: [Option<TextureId>; TEXTURE_SLOTS],
    mvp: Option<MatrixRef>,
    fragment_mode: FragmentMode,

    // Host staging for the shared dynamic buffers.
    vertex_data: Vec<u8>,
    index_data: Vec<u16>,
    vertex_buffer: Option<BufferId>,
    vertex_capacity: u64,
    index_buffer: Option<BufferId>,
    index_capacity: usize,
}

impl CommandRecorder {
    /// Creates an empty recorder. Shared buffers are allocated on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// The finalized commands, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Sets the pipeline state for subsequent draws, closing the batch in
    /// flight if it differs.
    pub fn set_pipeline_state(&mut self, key: PipelineKey, stride: usize) {
        if self.key != Some(key) {
            self.finish();
            self.key = Some(key);
            self.stride = stride;
        }
    }

    /// Sets the texture slots, closing the batch in flight if they differ.
    pub fn set_textures(&mut self, textures: [Option<TextureId>; TEXTURE_SLOTS]) {
        if self.textures != textures {
            self.finish();
            self.textures = textures;
        }
    }

    /// Sets the transform reference, closing the batch in flight if it
    /// differs. Shared matrices compare by identity, owned ones by value.
    pub fn set_uniform_matrix(&mut self, mvp: Option<MatrixRef>) {
        if self.mvp != mvp {
            self.finish();
            self.mvp = mvp;
        }
    }

    /// Sets the fragment flag, closing the batch in flight if it differs.
    pub fn set_fragment_mode(&mut self, mode: FragmentMode) {
        if self.fragment_mode != mode {
            self.finish();
            self.fragment_mode = mode;
        }
    }

    /// Ensures the shared buffers can hold `vertices` more elements of the
    /// recorded stride and `indices` more u16 indices, growing them if not.
    pub fn prepare(
        &mut self,
        device: &dyn GraphicsDevice,
        vertices: usize,
        indices: usize,
    ) -> Result<(), RenderError> {
        if self.key.is_none() {
            return Err(UsageError::SceneNotActive.into());
        }
        // Account for the stride alignment a fresh command would insert.
        let aligned = align_up(self.vertex_data.len(), self.stride);
        let needed_bytes = (aligned + vertices * self.stride) as u64;
        if needed_bytes > self.vertex_capacity {
            self.grow_vertex(device, needed_bytes)?;
        }
        let needed_indices = self.index_data.len() + indices;
        if needed_indices > self.index_capacity {
            self.grow_index(device, needed_indices)?;
        }
        Ok(())
    }

    /// Appends geometry to the batch in flight, starting one if needed.
    ///
    /// `vertices` must be a whole number of elements of the recorded stride;
    /// `indices` are relative to the appended vertices and are rebased onto
    /// the command.
    pub fn push(&mut self, vertices: &[u8], indices: &[u16]) -> Result<(), RenderError> {
        let key = self.key.ok_or(UsageError::SceneNotActive)?;
        debug_assert_eq!(vertices.len() % self.stride, 0);
        let incoming = vertices.len() / self.stride;
        let mut cmd = match self.active.take() {
            // The rebased indices must stay addressable as u16, so a batch
            // that would outgrow that range closes here instead of merging.
            Some(cmd) if cmd.vertices + incoming > MAX_COMMAND_VERTICES => {
                if !cmd.is_empty() {
                    self.commands.push(cmd);
                }
                self.start_command(key)
            }
            Some(cmd) => cmd,
            None => self.start_command(key),
        };
        let base = cmd.vertices as u16;
        self.index_data.extend(indices.iter().map(|&i| i + base));
        self.vertex_data.extend_from_slice(vertices);
        cmd.vertices += incoming;
        cmd.indices += indices.len();
        self.active = Some(cmd);
        Ok(())
    }

    /// Opens a fresh command carrying the recorded state, padding the
    /// vertex staging so the command's base vertex lands on an element
    /// boundary.
    fn start_command(&mut self, key: PipelineKey) -> DrawCommand {
        let pad = align_up(self.vertex_data.len(), self.stride) - self.vertex_data.len();
        self.vertex_data.extend(std::iter::repeat(0).take(pad));
        let mut cmd = DrawCommand::new(key, self.stride);
        cmd.textures = self.textures;
        cmd.mvp = self.mvp.clone();
        cmd.fragment_mode = self.fragment_mode;
        cmd.vertex_buffer = self.vertex_buffer.map(BufferRef::External);
        cmd.index_buffer = self.index_buffer.map(BufferRef::External);
        cmd.vertex_offset = self.vertex_data.len();
        cmd.first_index = self.index_data.len();
        cmd
    }

    /// Closes the batch in flight, keeping the recorded state for the next
    /// one. Empty batches are dropped.
    pub fn finish(&mut self) {
        if let Some(cmd) = self.active.take() {
            if !cmd.is_empty() {
                self.commands.push(cmd);
            }
        }
    }

    /// Uploads the staged geometry into the shared buffers.
    pub fn flush_staging(&mut self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        if let (Some(id), false) = (self.vertex_buffer, self.vertex_data.is_empty()) {
            device.write_buffer(id, 0, &self.vertex_data)?;
        }
        if let (Some(id), false) = (self.index_buffer, self.index_data.is_empty()) {
            device.write_buffer(id, 0, bytemuck::cast_slice(&self.index_data))?;
        }
        Ok(())
    }

    /// Releases every command and all resources they own, and resets the
    /// staging memory. The shared buffers and recorded state survive.
    pub fn clear_commands(&mut self, device: &dyn GraphicsDevice) {
        for cmd in &mut self.commands {
            cmd.release(device);
        }
        self.commands.clear();
        if let Some(mut cmd) = self.active.take() {
            cmd.release(device);
        }
        self.vertex_data.clear();
        self.index_data.clear();
    }

    /// Releases everything, including the shared buffers.
    pub fn release(&mut self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        self.clear_commands(device);
        for id in [self.vertex_buffer.take(), self.index_buffer.take()]
            .into_iter()
            .flatten()
        {
            device.destroy_buffer(id)?;
        }
        self.vertex_capacity = 0;
        self.index_capacity = 0;
        self.key = None;
        self.mvp = None;
        self.textures = [None; TEXTURE_SLOTS];
        Ok(())
    }

    fn grow_vertex(
        &mut self,
        device: &dyn GraphicsDevice,
        needed: u64,
    ) -> Result<(), ResourceError> {
        let capacity = needed
            .next_power_of_two()
            .max(self.vertex_capacity * 2)
            .max(MIN_VERTEX_BYTES);
        // Commands already recorded keep drawing from the retired buffer, so
        // its staged contents must reach the GPU before it is abandoned.
        if let Some(old) = self.vertex_buffer {
            if !self.vertex_data.is_empty() {
                device.write_buffer(old, 0, &self.vertex_data)?;
            }
            self.finish();
            self.retire(device, old, true)?;
            self.vertex_data.clear();
        }
        let id = device.create_buffer(&BufferDescriptor {
            label: Some(Cow::Borrowed("batch-vertex")),
            size: capacity,
            kind: BufferKind::Vertex,
            dynamic: true,
        })?;
        log::debug!("grew shared vertex buffer to {capacity} bytes ({id:?})");
        self.vertex_buffer = Some(id);
        self.vertex_capacity = capacity;
        Ok(())
    }

    fn grow_index(
        &mut self,
        device: &dyn GraphicsDevice,
        needed: usize,
    ) -> Result<(), ResourceError> {
        let capacity = needed
            .next_power_of_two()
            .max(self.index_capacity * 2)
            .max(MIN_INDEX_COUNT);
        if let Some(old) = self.index_buffer {
            if !self.index_data.is_empty() {
                device.write_buffer(old, 0, bytemuck::cast_slice(&self.index_data))?;
            }
            self.finish();
            self.retire(device, old, false)?;
            self.index_data.clear();
        }
        let id = device.create_buffer(&BufferDescriptor {
            label: Some(Cow::Borrowed("batch-index")),
            size: capacity as u64 * 2,
            kind: BufferKind::Index,
            dynamic: true,
        })?;
        log::debug!("grew shared index buffer to {capacity} indices ({id:?})");
        self.index_buffer = Some(id);
        self.index_capacity = capacity;
        Ok(())
    }

    /// Hands ownership of a retired shared buffer to the last command that
    /// draws from it, or destroys it if no command does.
    fn retire(
        &mut self,
        device: &dyn GraphicsDevice,
        old: BufferId,
        vertex: bool,
    ) -> Result<(), ResourceError> {
        let slot = self.commands.iter_mut().rev().find_map(|cmd| {
            let r = if vertex {
                cmd.vertex_buffer.as_mut()
            } else {
                cmd.index_buffer.as_mut()
            };
            r.filter(|r| r.id() == old)
        });
        match slot {
            Some(r) => *r = BufferRef::Owned(old),
            None => device.destroy_buffer(old)?,
        }
        Ok(())
    }
}

fn align_up(value: usize, align: usize) -> usize {
    if align == 0 {
        value
    } else {
        value.div_ceil(align) * align
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_stride() {
        assert_eq!(align_up(0, 24), 0);
        assert_eq!(align_up(1, 24), 24);
        assert_eq!(align_up(24, 24), 24);
        assert_eq!(align_up(25, 16), 32);
        assert_eq!(align_up(7, 0), 7);
    }
}
