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

//! The batching render layer: state types, the pipeline key codec, the
//! recorder, buffer management and the frame driver.

pub mod api;
pub mod buffers;
pub mod device;
pub mod error;
pub mod pipeline_cache;
pub mod recorder;
pub mod traits;

pub use device::BatchRenderer;
pub use error::{PipelineError, RenderError, ResourceError, ShaderError, UsageError};
pub use traits::{GraphicsDevice, RenderDevice, RenderPass};
