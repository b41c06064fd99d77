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

//! The small mathematics surface the 2D render device needs: colors,
//! integer dimensions/rectangles and a column-major `Mat4` with an
//! orthographic constructor.

pub mod color;
pub mod dimension;
pub mod matrix;

pub use self::color::{Rgba, Rgba8};
pub use self::dimension::{Extent2D, Origin2D, Rect};
pub use self::matrix::{Mat4, Vec4};
