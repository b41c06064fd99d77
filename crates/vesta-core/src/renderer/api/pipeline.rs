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

//! Pipeline state enums, the pipeline handle and its construction
//! descriptor.

use std::borrow::Cow;

use super::key::PipelineState;
use super::shader::ShaderModuleId;

/// Defines how vertices are connected to form a geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Every three vertices form an isolated triangle.
    TriangleList,
    /// Vertices form a connected triangle strip.
    TriangleStrip,
    /// Every two vertices form an isolated line.
    LineList,
    /// Vertices form a connected line strip.
    LineStrip,
}

/// The memory layout of one vertex, limited to the formats the 2D device
/// emits.
///
/// Component key: `V3f` position, `C4b` packed byte color, `T2f` texture
/// coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Position + color. Used for flat-colored primitives.
    V3fC4b,
    /// Position + one texture coordinate set, no color.
    V3fT2f,
    /// Position + color + one texture coordinate set. The sprite format.
    V3fC4bT2f,
    /// Position + color + two texture coordinate sets. The dual-texture
    /// sprite format.
    V3fC4bT2fT2f,
}

impl VertexFormat {
    /// The byte distance between consecutive vertices of this format.
    #[inline]
    pub const fn stride(&self) -> usize {
        match self {
            VertexFormat::V3fC4b => 16,
            VertexFormat::V3fT2f => 20,
            VertexFormat::V3fC4bT2f => 24,
            VertexFormat::V3fC4bT2fT2f => 32,
        }
    }
}

/// Fixed-function style blending between fragment output and framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Opaque write, no blending.
    None,
    /// Alpha test: fragments below the alpha threshold are discarded,
    /// surviving fragments write opaquely.
    Test,
    /// Classic `src * a + dst * (1 - a)` alpha blending.
    Blend,
    /// Additive blending weighted by source alpha.
    AddBlend,
    /// Subtractive blending.
    SubBlend,
    /// Multiplicative blending (`dst * src`).
    Mul,
}

/// The compositing preset of the shorthand "mode" pipeline-key variant,
/// covering the fixed-function fog/alpha combos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposeMode {
    /// Opaque compositing.
    Normal,
    /// Alpha-blended compositing.
    Alpha,
    /// Opaque compositing with fog applied.
    Fog,
    /// Alpha-blended compositing with fog applied.
    AlphaFog,
}

/// The per-command fragment-stage flag. Unlike the blend mode this is not
/// baked into the pipeline; the shader branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FragmentMode {
    /// Plain modulate: `texture * vertex color`.
    #[default]
    Normal,
    /// Modulate color channels, add the alpha contribution.
    ModColorAddAlpha,
}

/// How two texture stages are combined in the dual-texture paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Modulate the stages.
    #[default]
    Mod,
    /// Add the second stage.
    Add,
}

impl ColorMode {
    /// The fragment-stage flag this color mode selects.
    #[inline]
    pub const fn fragment_mode(&self) -> FragmentMode {
        match self {
            ColorMode::Mod => FragmentMode::Normal,
            ColorMode::Add => FragmentMode::ModColorAddAlpha,
        }
    }
}

/// An opaque handle to a compiled render pipeline state object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderPipelineId(pub usize);

/// A complete descriptor for a render pipeline.
///
/// The backend derives the full fixed-function state (vertex layout,
/// blending, rasterizer) from the typed [`PipelineState`].
#[derive(Debug, Clone)]
pub struct RenderPipelineDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The compiled shader program to bind.
    pub shader: ShaderModuleId,
    /// The decoded pipeline state.
    pub state: PipelineState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_strides_match_packed_layouts() {
        assert_eq!(VertexFormat::V3fC4b.stride(), 12 + 4);
        assert_eq!(VertexFormat::V3fT2f.stride(), 12 + 8);
        assert_eq!(VertexFormat::V3fC4bT2f.stride(), 12 + 4 + 8);
        assert_eq!(VertexFormat::V3fC4bT2fT2f.stride(), 12 + 4 + 8 + 8);
    }

    #[test]
    fn color_mode_selects_fragment_mode() {
        assert_eq!(ColorMode::Mod.fragment_mode(), FragmentMode::Normal);
        assert_eq!(
            ColorMode::Add.fragment_mode(),
            FragmentMode::ModColorAddAlpha
        );
    }
}
