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

//! Backend-agnostic data types for the render device.

pub mod buffer;
pub mod command;
pub mod key;
pub mod pipeline;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use buffer::{BufferDescriptor, BufferId, BufferKind, IndexBuffer, VertexBuffer, INDICES_PER_POLYGON};
pub use command::{BufferRef, DrawCommand, FrameDescriptor, MatrixRef};
pub use key::{PipelineKey, PipelineState};
pub use pipeline::{
    BlendMode, ColorMode, ComposeMode, FragmentMode, PrimitiveTopology, RenderPipelineDescriptor,
    RenderPipelineId, VertexFormat,
};
pub use shader::{ShaderModuleDescriptor, ShaderModuleId, ShaderSourceData};
pub use texture::{TextureDescriptor, TextureId, TEXTURE_SLOTS};
pub use vertex::{FlatVertex, Sprite2Vertex, SpriteVertex, TexVertex};
