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

//! Key-indexed pipeline cache and the shader-by-name registry.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::renderer::api::{
    PipelineKey, RenderPipelineDescriptor, RenderPipelineId, ShaderModuleId, VertexFormat,
};
use crate::renderer::error::{ResourceError, ShaderError};
use crate::renderer::traits::GraphicsDevice;

/// The shader name the cache resolves for each vertex format.
pub fn shader_name_for(format: VertexFormat) -> &'static str {
    match format {
        VertexFormat::V3fC4b => "flat",
        VertexFormat::V3fT2f => "unlit_tex",
        VertexFormat::V3fC4bT2f => "sprite",
        VertexFormat::V3fC4bT2fT2f => "sprite_dual",
    }
}

/// Lazily builds render pipelines keyed by their encoded state.
///
/// Pipelines are created on first use and reused until [`clear`] drops them
/// all, which happens on resolution change. Shader modules are registered by
/// name and resolved through the vertex format of the decoded key.
///
/// [`clear`]: PipelineCache::clear
#[derive(Debug, Default)]
pub struct PipelineCache {
    pipelines: HashMap<PipelineKey, RenderPipelineId>,
    shaders: HashMap<String, ShaderModuleId>,
    created: usize,
}

impl PipelineCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a shader module to a name.
    ///
    /// Re-registering a name replaces the binding and destroys the displaced
    /// module so nothing leaks.
    pub fn register_shader(
        &mut self,
        device: &dyn GraphicsDevice,
        name: &str,
        module: ShaderModuleId,
    ) -> Result<(), ResourceError> {
        if let Some(old) = self.shaders.insert(name.to_owned(), module) {
            if old != module {
                log::debug!("shader '{name}' re-registered, destroying {old:?}");
                device.destroy_shader_module(old)?;
            }
        }
        Ok(())
    }

    /// The registered module for a name, if any.
    pub fn shader(&self, name: &str) -> Option<ShaderModuleId> {
        self.shaders.get(name).copied()
    }

    /// Returns the pipeline for a key, building it on first use.
    ///
    /// A failed build leaves the cache untouched.
    pub fn get_or_create(
        &mut self,
        device: &dyn GraphicsDevice,
        key: PipelineKey,
    ) -> Result<RenderPipelineId, ResourceError> {
        if let Some(&id) = self.pipelines.get(&key) {
            return Ok(id);
        }
        let state = key.decode()?;
        let name = shader_name_for(state.vertex_format());
        let shader = self
            .shaders
            .get(name)
            .copied()
            .ok_or_else(|| ShaderError::NotRegistered {
                name: name.to_owned(),
            })?;
        let id = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(Cow::Owned(format!("pipeline-{:#010x}", key.0))),
            shader,
            state,
        })?;
        log::debug!("created pipeline {id:?} for key {:#010x}", key.0);
        self.pipelines.insert(key, id);
        self.created += 1;
        Ok(id)
    }

    /// Number of pipelines built since construction. Survives [`clear`].
    ///
    /// [`clear`]: PipelineCache::clear
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of pipelines currently cached.
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    /// Whether no pipelines are cached.
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Destroys every cached pipeline. Shader registrations survive.
    ///
    /// A failed destroy does not stop the sweep; the first error is
    /// reported once the map is empty.
    pub fn clear(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let mut first_error = None;
        for (_, id) in self.pipelines.drain() {
            if let Err(err) = device.destroy_render_pipeline(id) {
                log::warn!("failed to destroy pipeline {id:?}: {err}");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Destroys every cached pipeline and every registered shader module.
    pub fn release(&mut self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let mut first_error = self.clear(device).err();
        for (_, id) in self.shaders.drain() {
            if let Err(err) = device.destroy_shader_module(id) {
                log::warn!("failed to destroy shader module {id:?}: {err}");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
