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

//! Built-in WGSL programs, one per supported vertex format.

use std::borrow::Cow;

use vesta_core::renderer::api::{ShaderModuleDescriptor, ShaderSourceData};
use vesta_core::renderer::error::RenderError;
use vesta_core::renderer::{BatchRenderer, GraphicsDevice};

/// The built-in shader programs, keyed by the names the pipeline cache
/// resolves vertex formats to.
pub const BUILTIN_SHADERS: [(&str, &str); 4] = [
    ("flat", include_str!("shaders/flat.wgsl")),
    ("unlit_tex", include_str!("shaders/unlit_tex.wgsl")),
    ("sprite", include_str!("shaders/sprite.wgsl")),
    ("sprite_dual", include_str!("shaders/sprite_dual.wgsl")),
];

/// Compiles and registers every built-in shader on a renderer.
pub fn register_builtin_shaders<D: GraphicsDevice>(
    renderer: &mut BatchRenderer<D>,
) -> Result<(), RenderError> {
    for (name, source) in BUILTIN_SHADERS {
        renderer.register_shader(
            name,
            &ShaderModuleDescriptor {
                label: Some(name),
                source: ShaderSourceData::Wgsl(Cow::Borrowed(source)),
                vs_entry: "vs_main",
                fs_entry: "fs_main",
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_declare_both_entry_points() {
        for (name, source) in BUILTIN_SHADERS {
            assert!(source.contains("fn vs_main"), "{name} misses vs_main");
            assert!(source.contains("fn fs_main"), "{name} misses fs_main");
        }
    }
}
