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

//! GPU texture handles and descriptors.

use std::borrow::Cow;

use crate::math::Extent2D;

/// The number of texture slots a single draw command can bind.
pub const TEXTURE_SLOTS: usize = 2;

/// An opaque handle to a GPU texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// A descriptor used to create an RGBA8 2D texture.
///
/// The device core only deals in decoded pixel data; file-format decoding
/// belongs to the asset layer.
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label for the texture.
    pub label: Option<Cow<'a, str>>,
    /// The texture size in pixels.
    pub size: Extent2D,
}

impl TextureDescriptor<'_> {
    /// The expected length of the pixel payload in bytes.
    #[inline]
    pub const fn data_len(&self) -> usize {
        self.size.width as usize * self.size.height as usize * 4
    }
}
