// Copyright 2025 eraflo
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

//! Logical resolution and integer magnification of a session.

/// The logical resolution of a session and its integer magnification onto
/// the physical surface.
///
/// Fixed once at startup. The scale factor is always 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
    width: u32,
    height: u32,
    scale: u32,
}

impl DisplayGeometry {
    /// Creates a geometry from a logical size, doubling it on screen when
    /// `scaled` is set.
    pub fn new(width: u32, height: u32, scaled: bool) -> Self {
        Self {
            width,
            height,
            scale: if scaled { 2 } else { 1 },
        }
    }

    /// Derives the logical size from a surface size imposed by an embedding
    /// host. The host size is the physical one, so it is divided by the scale.
    pub fn from_host_size(host_width: u32, host_height: u32, scaled: bool) -> Self {
        let scale = if scaled { 2 } else { 1 };
        Self {
            width: host_width / scale,
            height: host_height / scale,
            scale,
        }
    }

    /// Logical width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Integer magnification factor (1 or 2).
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Size of the presentable surface, `(width * scale, height * scale)`.
    pub fn physical_size(&self) -> (u32, u32) {
        (self.width * self.scale, self.height * self.scale)
    }

    /// Returns `true` if either logical dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maps a raw surface coordinate to logical space.
    pub fn to_logical(&self, raw: i32) -> i32 {
        raw / self.scale as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscaled_geometry_is_identity() {
        let geometry = DisplayGeometry::new(320, 240, false);
        assert_eq!(geometry.scale(), 1);
        assert_eq!(geometry.physical_size(), (320, 240));
        assert_eq!(geometry.to_logical(101), 101);
    }

    #[test]
    fn scaled_geometry_doubles_physical_size() {
        let geometry = DisplayGeometry::new(320, 240, true);
        assert_eq!(geometry.scale(), 2);
        assert_eq!(geometry.physical_size(), (640, 480));
        assert_eq!(geometry.to_logical(101), 50);
    }

    #[test]
    fn host_size_is_divided_by_scale() {
        let geometry = DisplayGeometry::from_host_size(641, 480, true);
        assert_eq!((geometry.width(), geometry.height()), (320, 240));
        assert!(!geometry.is_empty());

        assert!(DisplayGeometry::from_host_size(1, 1, true).is_empty());
    }
}
