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

//! Defines the `Vec4` and column-major `Mat4` types used for draw
//! transforms, plus the orthographic projection the 2D device renders with.

use std::ops::Mul;

/// A 4-component `f32` vector, primarily a `Mat4` column.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vec4 {
    /// The X component.
    pub x: f32,
    /// The Y component.
    pub y: f32,
    /// The Z component.
    pub z: f32,
    /// The W component.
    pub w: f32,
}

impl Vec4 {
    /// A vector with all components set to zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// The X unit vector.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// The Y unit vector.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// The Z unit vector.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The W unit vector.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// The dot product of two vectors.
    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }
}

/// A 4x4 column-major matrix.
///
/// Only the operations the render device needs are provided: identity,
/// the orthographic projection, matrix/vector and matrix/matrix products,
/// and a flat-array view for uniform upload.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Creates a right-handed orthographic projection mapping the given
    /// volume onto clip space with a `[0, 1]` depth range.
    pub fn orthographic_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let rcp_w = 1.0 / (right - left);
        let rcp_h = 1.0 / (top - bottom);
        let rcp_d = 1.0 / (far - near);
        Self::from_cols(
            Vec4::new(2.0 * rcp_w, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * rcp_h, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -rcp_d, 0.0),
            Vec4::new(
                -(right + left) * rcp_w,
                -(top + bottom) * rcp_h,
                -near * rcp_d,
                1.0,
            ),
        )
    }

    /// The projection for a pixel-space viewport with the origin in the
    /// top-left corner and the Y axis pointing down, as 2D drawing expects.
    #[inline]
    pub fn orthographic_screen(width: u32, height: u32) -> Self {
        Self::orthographic_rh(0.0, width as f32, height as f32, 0.0, 0.0, 1.0)
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0].get(index),
            self.cols[1].get(index),
            self.cols[2].get(index),
            self.cols[3].get(index),
        )
    }

    /// The matrix as 16 consecutive floats in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }
}

impl Vec4 {
    #[inline]
    fn get(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => self.w,
        }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_multiplicative_neutral() {
        let v = Vec4::new(3.0, -2.0, 0.5, 1.0);
        assert_eq!(Mat4::IDENTITY * v, v);

        let m = Mat4::orthographic_screen(640, 480);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn screen_ortho_maps_corners_to_clip_space() {
        let m = Mat4::orthographic_screen(800, 600);

        // Top-left pixel corner maps to (-1, 1), bottom-right to (1, -1).
        let tl = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(tl.x, -1.0);
        assert_relative_eq!(tl.y, 1.0);

        let br = m * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert_relative_eq!(br.x, 1.0);
        assert_relative_eq!(br.y, -1.0);
    }

    #[test]
    fn cols_array_is_column_major() {
        let m = Mat4::orthographic_screen(100, 100);
        let a = m.to_cols_array();
        assert_relative_eq!(a[0], m.cols[0].x);
        assert_relative_eq!(a[5], m.cols[1].y);
        assert_relative_eq!(a[15], m.cols[3].w);
    }
}
