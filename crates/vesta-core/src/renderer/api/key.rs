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

//! The pipeline key codec: a lossless mapping between typed draw state and
//! a compact 32-bit identifier used for cache lookup.
//!
//! Layout (low to high):
//!
//! ```text
//! bits 0..3   primitive topology
//! bits 3..6   vertex format
//! bit  6      variant tag (0 = full state, 1 = compose mode)
//! full state: bits 7..10 blend mode, bit 10 cull enabled, bit 11 front CCW
//! mode:       bits 7..9  compose mode
//! bits 12..32 always zero
//! ```
//!
//! The tag bit keeps the two variants in disjoint key ranges, so distinct
//! state tuples can never collide. Field values out of these ranges are
//! unrepresentable: construction goes through the typed enums, and
//! [`PipelineKey::decode`] rejects every bit pattern `encode` cannot
//! produce.

use super::pipeline::{BlendMode, ComposeMode, PrimitiveTopology, VertexFormat};
use crate::renderer::error::PipelineError;

const TOPOLOGY_SHIFT: u32 = 0;
const FORMAT_SHIFT: u32 = 3;
const TAG_SHIFT: u32 = 6;
const FIELD_SHIFT: u32 = 7;
const CULL_SHIFT: u32 = 10;
const CCW_SHIFT: u32 = 11;

const TOPOLOGY_MASK: u32 = 0b111;
const FORMAT_MASK: u32 = 0b111;
const FIELD_MASK: u32 = 0b111;
const MODE_MASK: u32 = 0b11;
const TAG_BIT: u32 = 1 << TAG_SHIFT;
const USED_BITS_FULL: u32 = (1 << 12) - 1;
const USED_BITS_MODE: u32 = TAG_BIT | 0b111_1111 | (MODE_MASK << FIELD_SHIFT);

/// The encoded pipeline identifier. Hashable and cheap to compare; the
/// pipeline cache is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipelineKey(pub u32);

/// The typed draw state a pipeline key encodes: either the full blend/cull
/// record or the fixed-function compose-mode shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    /// Full render state.
    Full {
        /// The primitive topology.
        topology: PrimitiveTopology,
        /// The vertex memory layout.
        format: VertexFormat,
        /// The framebuffer blend mode.
        blend: BlendMode,
        /// Whether back-face culling is enabled.
        cull: bool,
        /// Whether counter-clockwise winding is the front face.
        face_ccw: bool,
    },
    /// Fixed-function compositing shorthand.
    Mode {
        /// The primitive topology.
        topology: PrimitiveTopology,
        /// The vertex memory layout.
        format: VertexFormat,
        /// The compositing preset.
        mode: ComposeMode,
    },
}

impl PipelineState {
    /// Shorthand constructor for the full-state variant.
    #[inline]
    pub const fn full(
        topology: PrimitiveTopology,
        format: VertexFormat,
        blend: BlendMode,
        cull: bool,
        face_ccw: bool,
    ) -> Self {
        PipelineState::Full {
            topology,
            format,
            blend,
            cull,
            face_ccw,
        }
    }

    /// Shorthand constructor for the compose-mode variant.
    #[inline]
    pub const fn mode(topology: PrimitiveTopology, format: VertexFormat, mode: ComposeMode) -> Self {
        PipelineState::Mode {
            topology,
            format,
            mode,
        }
    }

    /// The vertex memory layout this state draws with.
    #[inline]
    pub const fn vertex_format(&self) -> VertexFormat {
        match self {
            PipelineState::Full { format, .. } | PipelineState::Mode { format, .. } => *format,
        }
    }

    /// The primitive topology this state draws with.
    #[inline]
    pub const fn topology(&self) -> PrimitiveTopology {
        match self {
            PipelineState::Full { topology, .. } | PipelineState::Mode { topology, .. } => {
                *topology
            }
        }
    }

    /// Packs the state into its key. Infallible: the typed fields cannot
    /// take out-of-range values.
    pub fn encode(&self) -> PipelineKey {
        let bits = match *self {
            PipelineState::Full {
                topology,
                format,
                blend,
                cull,
                face_ccw,
            } => {
                (topology_bits(topology) << TOPOLOGY_SHIFT)
                    | (format_bits(format) << FORMAT_SHIFT)
                    | (blend_bits(blend) << FIELD_SHIFT)
                    | ((cull as u32) << CULL_SHIFT)
                    | ((face_ccw as u32) << CCW_SHIFT)
            }
            PipelineState::Mode {
                topology,
                format,
                mode,
            } => {
                TAG_BIT
                    | (topology_bits(topology) << TOPOLOGY_SHIFT)
                    | (format_bits(format) << FORMAT_SHIFT)
                    | (mode_bits(mode) << FIELD_SHIFT)
            }
        };
        PipelineKey(bits)
    }
}

impl PipelineKey {
    /// Unpacks the key back into typed state.
    ///
    /// This is the exact inverse of [`PipelineState::encode`] and fails for
    /// every bit pattern `encode` cannot produce.
    pub fn decode(self) -> Result<PipelineState, PipelineError> {
        let bits = self.0;
        let invalid = || PipelineError::InvalidKey(bits);

        let topology =
            topology_from_bits((bits >> TOPOLOGY_SHIFT) & TOPOLOGY_MASK).ok_or_else(invalid)?;
        let format = format_from_bits((bits >> FORMAT_SHIFT) & FORMAT_MASK).ok_or_else(invalid)?;

        if bits & TAG_BIT == 0 {
            if bits & !USED_BITS_FULL != 0 {
                return Err(invalid());
            }
            let blend = blend_from_bits((bits >> FIELD_SHIFT) & FIELD_MASK).ok_or_else(invalid)?;
            Ok(PipelineState::Full {
                topology,
                format,
                blend,
                cull: bits & (1 << CULL_SHIFT) != 0,
                face_ccw: bits & (1 << CCW_SHIFT) != 0,
            })
        } else {
            if bits & !USED_BITS_MODE != 0 {
                return Err(invalid());
            }
            let mode = mode_from_bits((bits >> FIELD_SHIFT) & MODE_MASK).ok_or_else(invalid)?;
            Ok(PipelineState::Mode {
                topology,
                format,
                mode,
            })
        }
    }
}

fn topology_bits(t: PrimitiveTopology) -> u32 {
    match t {
        PrimitiveTopology::TriangleList => 0,
        PrimitiveTopology::TriangleStrip => 1,
        PrimitiveTopology::LineList => 2,
        PrimitiveTopology::LineStrip => 3,
    }
}

fn topology_from_bits(bits: u32) -> Option<PrimitiveTopology> {
    match bits {
        0 => Some(PrimitiveTopology::TriangleList),
        1 => Some(PrimitiveTopology::TriangleStrip),
        2 => Some(PrimitiveTopology::LineList),
        3 => Some(PrimitiveTopology::LineStrip),
        _ => None,
    }
}

fn format_bits(f: VertexFormat) -> u32 {
    match f {
        VertexFormat::V3fC4b => 0,
        VertexFormat::V3fT2f => 1,
        VertexFormat::V3fC4bT2f => 2,
        VertexFormat::V3fC4bT2fT2f => 3,
    }
}

fn format_from_bits(bits: u32) -> Option<VertexFormat> {
    match bits {
        0 => Some(VertexFormat::V3fC4b),
        1 => Some(VertexFormat::V3fT2f),
        2 => Some(VertexFormat::V3fC4bT2f),
        3 => Some(VertexFormat::V3fC4bT2fT2f),
        _ => None,
    }
}

fn blend_bits(b: BlendMode) -> u32 {
    match b {
        BlendMode::None => 0,
        BlendMode::Test => 1,
        BlendMode::Blend => 2,
        BlendMode::AddBlend => 3,
        BlendMode::SubBlend => 4,
        BlendMode::Mul => 5,
    }
}

fn blend_from_bits(bits: u32) -> Option<BlendMode> {
    match bits {
        0 => Some(BlendMode::None),
        1 => Some(BlendMode::Test),
        2 => Some(BlendMode::Blend),
        3 => Some(BlendMode::AddBlend),
        4 => Some(BlendMode::SubBlend),
        5 => Some(BlendMode::Mul),
        _ => None,
    }
}

fn mode_bits(m: ComposeMode) -> u32 {
    match m {
        ComposeMode::Normal => 0,
        ComposeMode::Alpha => 1,
        ComposeMode::Fog => 2,
        ComposeMode::AlphaFog => 3,
    }
}

fn mode_from_bits(bits: u32) -> Option<ComposeMode> {
    match bits {
        0 => Some(ComposeMode::Normal),
        1 => Some(ComposeMode::Alpha),
        2 => Some(ComposeMode::Fog),
        3 => Some(ComposeMode::AlphaFog),
        _ => None,
    }
}
