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

//! Conversions from core render types into their wgpu counterparts.

use vesta_core::math::Rgba;
use vesta_core::renderer::api::{
    BlendMode, BufferKind, ComposeMode, PipelineState, PrimitiveTopology, VertexFormat,
};

/// A local extension trait to convert core types into WGPU-compatible
/// types. This avoids Rust's orphan rules while keeping an idiomatic
/// `.into_wgpu()` syntax.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a WGPU-compatible type.
    fn into_wgpu(self) -> T;
}

impl IntoWgpu<wgpu::PrimitiveTopology> for PrimitiveTopology {
    fn into_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveTopology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveTopology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            PrimitiveTopology::LineList => wgpu::PrimitiveTopology::LineList,
            PrimitiveTopology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        }
    }
}

impl IntoWgpu<Option<wgpu::BlendState>> for BlendMode {
    fn into_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            // Alpha testing happens in the shader; the target itself does
            // not blend.
            BlendMode::None | BlendMode::Test => None,
            BlendMode::Blend => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendMode::AddBlend => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            BlendMode::SubBlend => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::ReverseSubtract,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Zero,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            BlendMode::Mul => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Dst,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::DstAlpha,
                    dst_factor: wgpu::BlendFactor::Zero,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }
}

impl IntoWgpu<Option<wgpu::BlendState>> for ComposeMode {
    fn into_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            ComposeMode::Normal | ComposeMode::Fog => None,
            ComposeMode::Alpha | ComposeMode::AlphaFog => {
                Some(wgpu::BlendState::ALPHA_BLENDING)
            }
        }
    }
}

impl IntoWgpu<wgpu::BufferUsages> for BufferKind {
    fn into_wgpu(self) -> wgpu::BufferUsages {
        match self {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            BufferKind::Index => wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        }
    }
}

impl IntoWgpu<wgpu::Color> for Rgba {
    fn into_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

const FLAT_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Unorm8x4,
];

const TEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x2,
];

const SPRITE_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Unorm8x4,
    2 => Float32x2,
];

const SPRITE2_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Unorm8x4,
    2 => Float32x2,
    3 => Float32x2,
];

/// The wgpu vertex layout for a core vertex format.
pub fn vertex_layout(format: VertexFormat) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match format {
        VertexFormat::V3fC4b => &FLAT_ATTRIBUTES,
        VertexFormat::V3fT2f => &TEX_ATTRIBUTES,
        VertexFormat::V3fC4bT2f => &SPRITE_ATTRIBUTES,
        VertexFormat::V3fC4bT2fT2f => &SPRITE2_ATTRIBUTES,
    };
    wgpu::VertexBufferLayout {
        array_stride: format.stride() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// The blend state of either pipeline-state variant.
pub fn blend_state(state: &PipelineState) -> Option<wgpu::BlendState> {
    match *state {
        PipelineState::Full { blend, .. } => blend.into_wgpu(),
        PipelineState::Mode { mode, .. } => mode.into_wgpu(),
    }
}

/// The rasterizer state of either pipeline-state variant. The compose-mode
/// variant never culls.
pub fn primitive_state(state: &PipelineState) -> wgpu::PrimitiveState {
    let (cull, face_ccw) = match *state {
        PipelineState::Full { cull, face_ccw, .. } => (cull, face_ccw),
        PipelineState::Mode { .. } => (false, true),
    };
    wgpu::PrimitiveState {
        topology: state.topology().into_wgpu(),
        strip_index_format: None,
        front_face: if face_ccw {
            wgpu::FrontFace::Ccw
        } else {
            wgpu::FrontFace::Cw
        },
        cull_mode: cull.then_some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}
