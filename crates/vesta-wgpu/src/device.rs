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

//! The headless wgpu implementation of [`GraphicsDevice`].
//!
//! Frames render into an offscreen color target sized from the frame
//! descriptor; surface creation and presentation belong to the windowing
//! layer.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use vesta_core::math::Extent2D;
use vesta_core::renderer::api::{
    BufferDescriptor, BufferId, FrameDescriptor, RenderPipelineDescriptor, RenderPipelineId,
    ShaderModuleDescriptor, ShaderModuleId, ShaderSourceData, TextureDescriptor, TextureId,
    TEXTURE_SLOTS,
};
use vesta_core::renderer::error::{RenderError, ResourceError};
use vesta_core::renderer::traits::{GraphicsDevice, RenderPass};

use crate::conversions::{blend_state, primitive_state, vertex_layout, IntoWgpu};
use crate::pass::{Uniforms, WgpuFramePass, UNIFORM_STRIDE};

/// The format of the offscreen color target. Plain (non-sRGB) since the
/// shaders apply display gamma themselves.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const MAX_DRAWS_PER_FRAME: u32 = 4096;

#[derive(Debug)]
struct WgpuShaderEntry {
    module: Arc<wgpu::ShaderModule>,
    vs_entry: String,
    fs_entry: String,
}

#[derive(Debug)]
struct WgpuTextureEntry {
    _texture: Arc<wgpu::Texture>,
    view: Arc<wgpu::TextureView>,
}

#[derive(Debug)]
struct OffscreenTarget {
    extent: Extent2D,
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// A headless wgpu graphics device.
#[derive(Debug)]
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,

    shader_modules: Mutex<HashMap<ShaderModuleId, WgpuShaderEntry>>,
    pipelines: Mutex<HashMap<RenderPipelineId, Arc<wgpu::RenderPipeline>>>,
    buffers: Mutex<HashMap<BufferId, Arc<wgpu::Buffer>>>,
    textures: Mutex<HashMap<TextureId, WgpuTextureEntry>>,
    // One bind group per bound texture pair, built lazily.
    bind_groups: Mutex<HashMap<(TextureId, TextureId), Arc<wgpu::BindGroup>>>,
    target: Mutex<Option<OffscreenTarget>>,

    next_shader_id: AtomicUsize,
    next_pipeline_id: AtomicUsize,
    next_buffer_id: AtomicUsize,
    next_texture_id: AtomicUsize,

    sampler: wgpu::Sampler,
    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_cursor: AtomicU32,

    placeholder: TextureId,
}

fn lock<'m, T>(mutex: &'m Mutex<T>, what: &str) -> Result<MutexGuard<'m, T>, ResourceError> {
    mutex
        .lock()
        .map_err(|e| ResourceError::Backend(format!("mutex poisoned ({what}): {e}")))
}

impl WgpuDevice {
    /// Initializes a device on the first suitable adapter.
    pub fn new() -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| RenderError::InitializationFailed(format!("no suitable adapter: {e}")))?;
        let info = adapter.get_info();
        log::info!(
            "using graphics adapter \"{}\" (backend: {:?})",
            info.name,
            info.backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("vesta-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        }))
        .map_err(|e| RenderError::InitializationFailed(format!("device request failed: {e}")))?;

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("uncaptured wgpu error: {e:?}");
        }));

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vesta-uniforms"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<Uniforms>() as u64),
                },
                count: None,
            }],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vesta-textures"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vesta-pipeline-layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vesta-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vesta-uniform-ring"),
            size: (MAX_DRAWS_PER_FRAME * UNIFORM_STRIDE) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vesta-uniforms"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<Uniforms>() as u64),
                }),
            }],
        });

        let mut this = Self {
            device,
            queue,
            shader_modules: Mutex::new(HashMap::new()),
            pipelines: Mutex::new(HashMap::new()),
            buffers: Mutex::new(HashMap::new()),
            textures: Mutex::new(HashMap::new()),
            bind_groups: Mutex::new(HashMap::new()),
            target: Mutex::new(None),
            next_shader_id: AtomicUsize::new(0),
            next_pipeline_id: AtomicUsize::new(0),
            next_buffer_id: AtomicUsize::new(0),
            next_texture_id: AtomicUsize::new(0),
            sampler,
            texture_layout,
            pipeline_layout,
            uniform_buffer,
            uniform_bind_group,
            uniform_cursor: AtomicU32::new(0),
            placeholder: TextureId(0),
        };

        // The 1x1 white texture bound to empty slots.
        this.placeholder = this.create_texture(
            &TextureDescriptor {
                label: Some("vesta-placeholder".into()),
                size: Extent2D {
                    width: 1,
                    height: 1,
                },
            },
            &[255, 255, 255, 255],
        )?;
        Ok(this)
    }

    pub(crate) fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub(crate) fn pipeline(
        &self,
        id: RenderPipelineId,
    ) -> Result<Arc<wgpu::RenderPipeline>, ResourceError> {
        lock(&self.pipelines, "pipelines")?
            .get(&id)
            .cloned()
            .ok_or(ResourceError::InvalidHandle)
    }

    pub(crate) fn buffer(&self, id: BufferId) -> Result<Arc<wgpu::Buffer>, ResourceError> {
        lock(&self.buffers, "buffers")?
            .get(&id)
            .cloned()
            .ok_or(ResourceError::InvalidHandle)
    }

    /// The bind group for a texture pair, built on first use and cached.
    pub(crate) fn texture_bind_group(
        &self,
        pair: [TextureId; TEXTURE_SLOTS],
    ) -> Result<Arc<wgpu::BindGroup>, ResourceError> {
        let key = (pair[0], pair[1]);
        if let Some(group) = lock(&self.bind_groups, "bind_groups")?.get(&key) {
            return Ok(group.clone());
        }
        let textures = lock(&self.textures, "textures")?;
        let view0 = &textures
            .get(&pair[0])
            .ok_or(ResourceError::InvalidHandle)?
            .view;
        let view1 = &textures
            .get(&pair[1])
            .ok_or(ResourceError::InvalidHandle)?
            .view;
        let group = Arc::new(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vesta-texture-pair"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view0),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view1),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }));
        drop(textures);
        lock(&self.bind_groups, "bind_groups")?.insert(key, group.clone());
        Ok(group)
    }

    /// Writes one per-draw uniform record into the ring, returning its
    /// dynamic offset.
    pub(crate) fn push_uniforms(&self, uniforms: &Uniforms) -> Result<u32, ResourceError> {
        let offset = self.uniform_cursor.fetch_add(UNIFORM_STRIDE, Ordering::Relaxed);
        if offset + UNIFORM_STRIDE > MAX_DRAWS_PER_FRAME * UNIFORM_STRIDE {
            return Err(ResourceError::Backend(format!(
                "uniform ring exhausted ({MAX_DRAWS_PER_FRAME} draws per frame)"
            )));
        }
        self.queue.write_buffer(
            &self.uniform_buffer,
            offset as u64,
            bytemuck::bytes_of(uniforms),
        );
        Ok(offset)
    }

    pub(crate) fn uniform_bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform_bind_group
    }

    /// Reuses or recreates the offscreen color target for the frame size.
    fn target_view(&self, extent: Extent2D) -> Result<wgpu::TextureView, ResourceError> {
        let mut target = lock(&self.target, "target")?;
        let stale = target.as_ref().map(|t| t.extent != extent).unwrap_or(true);
        if stale {
            log::debug!(
                "creating {}x{} offscreen color target",
                extent.width,
                extent.height
            );
            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("vesta-frame-target"),
                size: wgpu::Extent3d {
                    width: extent.width.max(1),
                    height: extent.height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: TARGET_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            *target = Some(OffscreenTarget {
                extent,
                _texture: texture,
                view,
            });
        }
        match target.as_ref() {
            Some(t) => Ok(t.view.clone()),
            None => Err(ResourceError::InvalidHandle),
        }
    }
}

impl GraphicsDevice for WgpuDevice {
    fn create_shader_module(
        &self,
        desc: &ShaderModuleDescriptor<'_>,
    ) -> Result<ShaderModuleId, ResourceError> {
        let source = match &desc.source {
            ShaderSourceData::Wgsl(text) => wgpu::ShaderSource::Wgsl(text.clone()),
        };
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: desc.label,
                source,
            });
        let id = ShaderModuleId(self.next_shader_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.shader_modules, "shader_modules")?.insert(
            id,
            WgpuShaderEntry {
                module: Arc::new(module),
                vs_entry: desc.vs_entry.to_owned(),
                fs_entry: desc.fs_entry.to_owned(),
            },
        );
        log::debug!("created shader module {id:?} ({:?})", desc.label);
        Ok(id)
    }

    fn destroy_shader_module(&self, id: ShaderModuleId) -> Result<(), ResourceError> {
        lock(&self.shader_modules, "shader_modules")?
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::InvalidHandle)
    }

    fn create_render_pipeline(
        &self,
        desc: &RenderPipelineDescriptor<'_>,
    ) -> Result<RenderPipelineId, ResourceError> {
        let modules = lock(&self.shader_modules, "shader_modules")?;
        let shader = modules
            .get(&desc.shader)
            .ok_or(ResourceError::InvalidHandle)?;

        let layout = vertex_layout(desc.state.vertex_format());
        let targets = [Some(wgpu::ColorTargetState {
            format: TARGET_FORMAT,
            blend: blend_state(&desc.state),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: desc.label.as_deref(),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader.module,
                    entry_point: Some(&shader.vs_entry),
                    buffers: &[layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader.module,
                    entry_point: Some(&shader.fs_entry),
                    targets: &targets,
                    compilation_options: Default::default(),
                }),
                primitive: primitive_state(&desc.state),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });
        drop(modules);

        let id = RenderPipelineId(self.next_pipeline_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.pipelines, "pipelines")?.insert(id, Arc::new(pipeline));
        log::debug!("created render pipeline {id:?} ({:?})", desc.label);
        Ok(id)
    }

    fn destroy_render_pipeline(&self, id: RenderPipelineId) -> Result<(), ResourceError> {
        lock(&self.pipelines, "pipelines")?
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::InvalidHandle)
    }

    fn create_buffer(&self, desc: &BufferDescriptor<'_>) -> Result<BufferId, ResourceError> {
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: desc.label.as_deref(),
            size: desc.size.max(wgpu::COPY_BUFFER_ALIGNMENT),
            usage: desc.kind.into_wgpu(),
            mapped_at_creation: false,
        });
        let id = BufferId(self.next_buffer_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.buffers, "buffers")?.insert(id, Arc::new(buffer));
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        lock(&self.buffers, "buffers")?
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::InvalidHandle)
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let buffer = self.buffer(id)?;
        self.queue.write_buffer(&buffer, offset, data);
        Ok(())
    }

    fn create_texture(
        &self,
        desc: &TextureDescriptor<'_>,
        data: &[u8],
    ) -> Result<TextureId, ResourceError> {
        if data.len() != desc.data_len() {
            return Err(ResourceError::Backend(format!(
                "texture data is {} bytes, expected {}",
                data.len(),
                desc.data_len()
            )));
        }
        let size = wgpu::Extent3d {
            width: desc.size.width,
            height: desc.size.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: desc.label.as_deref(),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * desc.size.width),
                rows_per_image: None,
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = TextureId(self.next_texture_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.textures, "textures")?.insert(
            id,
            WgpuTextureEntry {
                _texture: Arc::new(texture),
                view: Arc::new(view),
            },
        );
        log::debug!(
            "created {}x{} texture {id:?} ({:?})",
            desc.size.width,
            desc.size.height,
            desc.label
        );
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        lock(&self.textures, "textures")?
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle)?;
        // Cached bind groups referencing the texture are stale now.
        lock(&self.bind_groups, "bind_groups")?.retain(|(a, b), _| *a != id && *b != id);
        Ok(())
    }

    fn placeholder_texture(&self) -> TextureId {
        self.placeholder
    }

    fn begin_frame(
        &self,
        frame: &FrameDescriptor,
    ) -> Result<Box<dyn RenderPass + '_>, ResourceError> {
        let view = self.target_view(frame.viewport_extent)?;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vesta-frame"),
            });
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("vesta-frame"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear_color.into_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        let extent = frame.viewport_extent;
        pass.set_viewport(
            frame.viewport_origin.x as f32,
            frame.viewport_origin.y as f32,
            extent.width as f32,
            extent.height as f32,
            0.0,
            1.0,
        );
        let x = frame.clip.xmin.clamp(0, extent.width as i32) as u32;
        let y = frame.clip.ymin.clamp(0, extent.height as i32) as u32;
        let xmax = frame.clip.xmax.clamp(0, extent.width as i32) as u32;
        let ymax = frame.clip.ymax.clamp(0, extent.height as i32) as u32;
        pass.set_scissor_rect(x, y, xmax.saturating_sub(x), ymax.saturating_sub(y));

        self.uniform_cursor.store(0, Ordering::Relaxed);
        Ok(Box::new(WgpuFramePass::new(self, pass, encoder, frame.gamma)))
    }

    fn flush(&self) -> Result<(), ResourceError> {
        self.device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| ResourceError::Backend(format!("device poll failed: {e}")))?;
        Ok(())
    }
}
