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

//! Shader module handles and descriptors.
//!
//! Shader source generation is external: the asset layer compiles modules
//! through the device and registers the resulting handles with the
//! pipeline cache by name.

use std::borrow::Cow;

/// The source data for a shader module.
#[derive(Debug, Clone)]
pub enum ShaderSourceData<'a> {
    /// WGSL source text.
    Wgsl(Cow<'a, str>),
}

/// Describes one shader program (vertex + fragment stages in a single
/// module) to be created by the graphics device.
#[derive(Debug, Clone)]
pub struct ShaderModuleDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<&'a str>,
    /// The shader source.
    pub source: ShaderSourceData<'a>,
    /// The vertex-stage entry point.
    pub vs_entry: &'a str,
    /// The fragment-stage entry point.
    pub fs_entry: &'a str,
}

/// An opaque handle to a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderModuleId(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_module_id_equality() {
        assert_eq!(ShaderModuleId(1), ShaderModuleId(1));
        assert_ne!(ShaderModuleId(1), ShaderModuleId(2));
    }

    #[test]
    fn descriptor_carries_source() {
        let descriptor = ShaderModuleDescriptor {
            label: Some("sprite"),
            source: ShaderSourceData::Wgsl(Cow::Borrowed("fn vs_main() {}")),
            vs_entry: "vs_main",
            fs_entry: "fs_main",
        };
        let ShaderSourceData::Wgsl(ref source) = descriptor.source;
        assert!(source.contains("vs_main"));
    }
}
