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

//! Concrete vertex layouts matching the wire formats of [`VertexFormat`].
//!
//! [`VertexFormat`]: super::pipeline::VertexFormat

use bytemuck::{Pod, Zeroable};

use crate::math::Rgba8;

/// Position-plus-color vertex, 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    /// Object-space position.
    pub pos: [f32; 3],
    /// Diffuse color.
    pub color: Rgba8,
}

/// Position-plus-uv vertex, 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexVertex {
    /// Object-space position.
    pub pos: [f32; 3],
    /// Texture coordinates for slot 0.
    pub uv: [f32; 2],
}

/// Position, color and one uv channel, 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    /// Object-space position.
    pub pos: [f32; 3],
    /// Diffuse color.
    pub color: Rgba8,
    /// Texture coordinates for slot 0.
    pub uv: [f32; 2],
}

/// Position, color and two uv channels, 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Sprite2Vertex {
    /// Object-space position.
    pub pos: [f32; 3],
    /// Diffuse color.
    pub color: Rgba8,
    /// Texture coordinates for slot 0.
    pub uv: [f32; 2],
    /// Texture coordinates for slot 1.
    pub uv2: [f32; 2],
}
