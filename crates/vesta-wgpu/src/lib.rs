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

//! # Vesta wgpu backend
//!
//! The concrete, headless [`vesta_core::GraphicsDevice`] implementation:
//! frames render into an offscreen color target, per-draw uniforms go
//! through a dynamic-offset ring, and texture pairs are bound through a
//! cached bind group per pair.

#![warn(missing_docs)]

pub mod conversions;
pub mod device;
pub mod pass;
pub mod shaders;

pub use device::WgpuDevice;
pub use shaders::register_builtin_shaders;

use vesta_core::renderer::error::RenderError;
use vesta_core::BatchRenderer;

/// Initializes a batching renderer over a fresh wgpu device with the
/// built-in shaders registered.
pub fn init(width: u32, height: u32) -> Result<BatchRenderer<WgpuDevice>, RenderError> {
    let device = WgpuDevice::new()?;
    let mut renderer = BatchRenderer::new(device, width, height);
    register_builtin_shaders(&mut renderer)?;
    Ok(renderer)
}
