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

//! Integer origins, extents and rectangles used for viewport and clip state.

/// A 2D position in pixels, e.g. the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin2D {
    /// The horizontal coordinate.
    pub x: i32,
    /// The vertical coordinate.
    pub y: i32,
}

impl Origin2D {
    /// The origin `(0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new origin.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A 2D size in pixels, e.g. the viewport or a texture extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned pixel rectangle given by its inclusive minimum and
/// exclusive maximum corners, used for clip/scissor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// The left edge.
    pub xmin: i32,
    /// The top edge.
    pub ymin: i32,
    /// The right edge (exclusive).
    pub xmax: i32,
    /// The bottom edge (exclusive).
    pub ymax: i32,
}

impl Rect {
    /// Creates a new rectangle from its corners.
    #[inline]
    pub const fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// The rectangle covering an extent placed at the origin.
    #[inline]
    pub const fn from_extent(extent: Extent2D) -> Self {
        Self {
            xmin: 0,
            ymin: 0,
            xmax: extent.width as i32,
            ymax: extent.height as i32,
        }
    }

    /// The rectangle width, clamped to zero for degenerate rectangles.
    #[inline]
    pub const fn width(&self) -> u32 {
        if self.xmax > self.xmin {
            (self.xmax - self.xmin) as u32
        } else {
            0
        }
    }

    /// The rectangle height, clamped to zero for degenerate rectangles.
    #[inline]
    pub const fn height(&self) -> u32 {
        if self.ymax > self.ymin {
            (self.ymax - self.ymin) as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_extent_covers_it() {
        let r = Rect::from_extent(Extent2D::new(800, 600));
        assert_eq!(r.width(), 800);
        assert_eq!(r.height(), 600);
        assert_eq!(r.xmin, 0);
    }

    #[test]
    fn degenerate_rect_has_zero_size() {
        let r = Rect::new(10, 10, 5, 5);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
    }
}
