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

//! # Vesta Core
//!
//! Backend-agnostic contracts and the command-batching core of the Vesta
//! render device: pipeline-state keys, the pipeline cache, buffer
//! management, command recording and the frame driver.
//!
//! The one concrete graphics backend lives in the `vesta-wgpu` crate, which
//! implements this crate's [`renderer::GraphicsDevice`] trait.

#![warn(missing_docs)]

pub mod math;
pub mod renderer;

pub use renderer::{BatchRenderer, GraphicsDevice, RenderDevice};
