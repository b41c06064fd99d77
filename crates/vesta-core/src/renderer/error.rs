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

//! Defines the hierarchy of error types for the render device.
//!
//! Usage errors indicate caller-side logic defects and are surfaced as
//! typed `Err` values rather than being silently absorbed; resource errors
//! come back from the graphics backend through the initializing call.

use std::fmt;

/// A caller-side protocol violation: the operation was legal to express but
/// issued in a state that forbids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// `begin_scene` was called while a scene was already active.
    SceneAlreadyActive,
    /// A draw or `end_scene` was issued outside an active scene.
    SceneNotActive,
    /// A buffer was locked while already locked.
    BufferAlreadyLocked,
    /// A buffer was unlocked without a matching lock.
    BufferNotLocked,
    /// A static buffer was locked again after its one-time data upload.
    StaticBufferRelock,
    /// A locked buffer was deleted or submitted.
    BufferLocked,
    /// The buffer handle does not name a live buffer of that kind.
    UnknownBuffer,
    /// `change_size` was called while a scene was active.
    ResizeDuringScene,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::SceneAlreadyActive => {
                write!(f, "begin_scene called while a scene is already active")
            }
            UsageError::SceneNotActive => {
                write!(f, "operation requires an active scene")
            }
            UsageError::BufferAlreadyLocked => {
                write!(f, "buffer is already locked")
            }
            UsageError::BufferNotLocked => {
                write!(f, "buffer is not locked")
            }
            UsageError::StaticBufferRelock => {
                write!(f, "static buffer cannot be locked after its initial upload")
            }
            UsageError::BufferLocked => {
                write!(f, "buffer is locked and cannot be deleted or submitted")
            }
            UsageError::UnknownBuffer => {
                write!(f, "buffer handle does not name a live buffer")
            }
            UsageError::ResizeDuringScene => {
                write!(f, "change_size is not allowed while a scene is active")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// An error related to a shader program required by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// No shader module has been registered under the requested name.
    NotRegistered {
        /// The name the pipeline cache looked up.
        name: String,
    },
    /// The backend failed to build a module from the provided source.
    Compilation {
        /// A descriptive label for the shader, if available.
        label: String,
        /// Detailed error messages from the shader compiler.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::NotRegistered { name } => {
                write!(f, "no shader registered under the name '{name}'")
            }
            ShaderError::Compilation { label, details } => {
                write!(f, "shader compilation failed for '{label}': {details}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// An error related to the creation or decoding of a render pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The integer is not a bit pattern the key codec can produce.
    InvalidKey(u32),
    /// The graphics backend failed to construct the pipeline state object.
    CreationFailed {
        /// A descriptive label for the pipeline, if available.
        label: Option<String>,
        /// Detailed error messages from the backend.
        details: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidKey(bits) => {
                write!(f, "invalid pipeline key bit pattern {bits:#010x}")
            }
            PipelineError::CreationFailed { label, details } => {
                write!(
                    f,
                    "pipeline creation failed for {:?}: {details}",
                    label.as_deref().unwrap_or("<unlabeled>")
                )
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// An error from creating, writing or destroying a GPU resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A shader-specific error occurred.
    Shader(ShaderError),
    /// A pipeline-specific error occurred.
    Pipeline(PipelineError),
    /// The handle or ID used to reference a resource is invalid.
    InvalidHandle,
    /// An error originating from the graphics backend implementation.
    Backend(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Shader(err) => write!(f, "shader resource error: {err}"),
            ResourceError::Pipeline(err) => write!(f, "pipeline resource error: {err}"),
            ResourceError::InvalidHandle => write!(f, "invalid resource handle"),
            ResourceError::Backend(msg) => write!(f, "backend resource error: {msg}"),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Shader(err) => Some(err),
            ResourceError::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        ResourceError::Shader(err)
    }
}

impl From<PipelineError> for ResourceError {
    fn from(err: PipelineError) -> Self {
        ResourceError::Pipeline(err)
    }
}

/// The top-level error of the render device surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The caller violated the device protocol.
    Usage(UsageError),
    /// The graphics backend failed to provide a resource.
    Resource(ResourceError),
    /// A failure occurred during device initialization.
    InitializationFailed(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Usage(err) => write!(f, "usage error: {err}"),
            RenderError::Resource(err) => write!(f, "resource error: {err}"),
            RenderError::InitializationFailed(msg) => {
                write!(f, "render device initialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Usage(err) => Some(err),
            RenderError::Resource(err) => Some(err),
            RenderError::InitializationFailed(_) => None,
        }
    }
}

impl From<UsageError> for RenderError {
    fn from(err: UsageError) -> Self {
        RenderError::Usage(err)
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_nest_and_display() {
        let err: RenderError = ResourceError::from(ShaderError::NotRegistered {
            name: "sprite".into(),
        })
        .into();
        let text = err.to_string();
        assert!(text.contains("sprite"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn usage_errors_are_comparable() {
        assert_eq!(UsageError::BufferNotLocked, UsageError::BufferNotLocked);
        assert_ne!(UsageError::BufferNotLocked, UsageError::BufferAlreadyLocked);
    }
}
