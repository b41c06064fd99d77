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

//! Caller-visible vertex and index buffers with a lock/unlock discipline.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::renderer::api::{
    BufferDescriptor, BufferId, BufferKind, IndexBuffer, VertexBuffer, VertexFormat,
    INDICES_PER_POLYGON,
};
use crate::renderer::error::{RenderError, UsageError};
use crate::renderer::traits::GraphicsDevice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    Unlocked,
    Locked,
}

#[derive(Debug)]
enum Staging {
    Vertex(Vec<u8>),
    Index(Vec<u16>),
}

#[derive(Debug)]
struct BufferEntry {
    dynamic: bool,
    state: LockState,
    staging: Staging,
    write_count: usize,
}

/// Tracks every caller-visible buffer and enforces the lock state machine.
///
/// Locking returns a staging view into host memory; unlocking uploads it.
/// Buffers have fixed capacity. Static buffers accept exactly one
/// lock/unlock cycle; re-locking one is a usage error, as is deleting a
/// buffer that is still locked.
#[derive(Debug, Default)]
pub struct BufferManager {
    entries: HashMap<BufferId, BufferEntry>,
}

impl BufferManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a vertex buffer of `count` elements of `format`.
    pub fn create_vertex_buffer(
        &mut self,
        device: &dyn GraphicsDevice,
        count: u32,
        format: VertexFormat,
        dynamic: bool,
    ) -> Result<VertexBuffer, RenderError> {
        let size = count as u64 * format.stride() as u64;
        let id = device.create_buffer(&BufferDescriptor {
            label: Some(Cow::Borrowed("user-vertex")),
            size,
            kind: BufferKind::Vertex,
            dynamic,
        })?;
        self.entries.insert(
            id,
            BufferEntry {
                dynamic,
                state: LockState::Unlocked,
                staging: Staging::Vertex(vec![0; size as usize]),
                write_count: 0,
            },
        );
        Ok(VertexBuffer {
            id,
            capacity: count,
            format,
            dynamic,
        })
    }

    /// Allocates an index buffer covering `polygons` triangles of u16
    /// indices.
    pub fn create_index_buffer(
        &mut self,
        device: &dyn GraphicsDevice,
        polygons: u32,
    ) -> Result<IndexBuffer, RenderError> {
        let count = polygons * INDICES_PER_POLYGON as u32;
        let id = device.create_buffer(&BufferDescriptor {
            label: Some(Cow::Borrowed("user-index")),
            size: count as u64 * 2,
            kind: BufferKind::Index,
            dynamic: false,
        })?;
        self.entries.insert(
            id,
            BufferEntry {
                dynamic: false,
                state: LockState::Unlocked,
                staging: Staging::Index(vec![0; count as usize]),
                write_count: 0,
            },
        );
        Ok(IndexBuffer {
            id,
            capacity: count,
        })
    }

    fn lock_entry(
        &mut self,
        id: BufferId,
        want_vertex: bool,
    ) -> Result<&mut BufferEntry, UsageError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(UsageError::UnknownBuffer)?;
        if matches!(entry.staging, Staging::Vertex(_)) != want_vertex {
            return Err(UsageError::UnknownBuffer);
        }
        match entry.state {
            LockState::Locked => return Err(UsageError::BufferAlreadyLocked),
            LockState::Unlocked if !entry.dynamic && entry.write_count > 0 => {
                return Err(UsageError::StaticBufferRelock)
            }
            LockState::Unlocked => {}
        }
        entry.state = LockState::Locked;
        Ok(entry)
    }

    /// Locks a vertex buffer, returning its staging bytes.
    pub fn lock_vertex(&mut self, buffer: &VertexBuffer) -> Result<&mut [u8], RenderError> {
        let entry = self.lock_entry(buffer.id, true)?;
        match &mut entry.staging {
            Staging::Vertex(bytes) => Ok(bytes.as_mut_slice()),
            Staging::Index(_) => Err(UsageError::UnknownBuffer.into()),
        }
    }

    /// Locks an index buffer, returning its staging indices.
    pub fn lock_index(&mut self, buffer: &IndexBuffer) -> Result<&mut [u16], RenderError> {
        let entry = self.lock_entry(buffer.id, false)?;
        match &mut entry.staging {
            Staging::Index(indices) => Ok(indices.as_mut_slice()),
            Staging::Vertex(_) => Err(UsageError::UnknownBuffer.into()),
        }
    }

    fn unlock(
        &mut self,
        device: &dyn GraphicsDevice,
        id: BufferId,
    ) -> Result<(), RenderError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(UsageError::UnknownBuffer)?;
        if entry.state != LockState::Locked {
            return Err(UsageError::BufferNotLocked.into());
        }
        match &entry.staging {
            Staging::Vertex(bytes) => device.write_buffer(id, 0, bytes)?,
            Staging::Index(indices) => {
                device.write_buffer(id, 0, bytemuck::cast_slice(indices))?
            }
        }
        entry.state = LockState::Unlocked;
        entry.write_count += 1;
        Ok(())
    }

    /// Unlocks a vertex buffer, uploading the staged bytes.
    pub fn unlock_vertex(
        &mut self,
        device: &dyn GraphicsDevice,
        buffer: &VertexBuffer,
    ) -> Result<(), RenderError> {
        self.unlock(device, buffer.id)
    }

    /// Unlocks an index buffer, uploading the staged indices.
    pub fn unlock_index(
        &mut self,
        device: &dyn GraphicsDevice,
        buffer: &IndexBuffer,
    ) -> Result<(), RenderError> {
        self.unlock(device, buffer.id)
    }

    /// Destroys a buffer. Fails if it is still locked.
    pub fn delete(
        &mut self,
        device: &dyn GraphicsDevice,
        id: BufferId,
    ) -> Result<(), RenderError> {
        match self.entries.get(&id) {
            None => return Err(UsageError::UnknownBuffer.into()),
            Some(entry) if entry.state == LockState::Locked => {
                return Err(UsageError::BufferLocked.into())
            }
            Some(_) => {}
        }
        self.entries.remove(&id);
        device.destroy_buffer(id)?;
        Ok(())
    }

    /// Destroys every remaining buffer.
    pub fn release(&mut self, device: &dyn GraphicsDevice) -> Result<(), RenderError> {
        for (id, entry) in self.entries.drain() {
            if entry.state == LockState::Locked {
                log::warn!("releasing buffer {id:?} while locked");
            }
            device.destroy_buffer(id)?;
        }
        Ok(())
    }
}
